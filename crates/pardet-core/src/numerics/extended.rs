//! Double-double floating point used as the working precision of elimination.
//!
//! A value is the unevaluated sum `hi + lo` with `|lo| <= ulp(hi) / 2`, giving
//! roughly 106 significant bits. Arithmetic is built from error-free
//! transformations (two-sum and the FMA two-product), the same compensation idea
//! as Kahan summation carried through every operation.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, LowerExp};
use std::iter::Product;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extended {
    hi: f64,
    lo: f64,
}

impl Extended {
    pub const ZERO: Self = Self::from_f64(0.0);
    pub const ONE: Self = Self::from_f64(1.0);
    pub const NAN: Self = Self::from_f64(f64::NAN);

    pub const fn from_f64(value: f64) -> Self {
        Self { hi: value, lo: 0.0 }
    }

    /// Builds a value from two parts that need not be normalized.
    pub fn from_parts(hi: f64, lo: f64) -> Self {
        let (hi, lo) = quick_two_sum(hi, lo);
        Self { hi, lo }
    }

    pub const fn hi(self) -> f64 {
        self.hi
    }

    pub const fn lo(self) -> f64 {
        self.lo
    }

    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    pub fn is_nan(self) -> bool {
        self.hi.is_nan() || self.lo.is_nan()
    }

    pub fn is_finite(self) -> bool {
        self.hi.is_finite() && self.lo.is_finite()
    }

    pub fn is_sign_negative(self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }

    pub fn abs(self) -> Self {
        if self.is_sign_negative() { -self } else { self }
    }

    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    pub fn powi(self, exponent: i32) -> Self {
        let mut base = self;
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::ONE;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result *= base;
            }
            base *= base;
            remaining >>= 1;
        }

        if exponent < 0 { result.recip() } else { result }
    }
}

fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let error = (a - (sum - b_virtual)) + (b - b_virtual);
    (sum, error)
}

fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    if !sum.is_finite() {
        return (sum, 0.0);
    }
    (sum, b - (sum - a))
}

fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let product = a * b;
    (product, a.mul_add(b, -product))
}

impl Add for Extended {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (sum, error) = two_sum(self.hi, rhs.hi);
        if !sum.is_finite() {
            return Self::from_f64(sum);
        }
        let (tail, tail_error) = two_sum(self.lo, rhs.lo);
        let (sum, error) = quick_two_sum(sum, error + tail);
        Self::from_parts(sum, error + tail_error)
    }
}

impl Sub for Extended {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for Extended {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (product, error) = two_prod(self.hi, rhs.hi);
        if !product.is_finite() {
            return Self::from_f64(product);
        }
        Self::from_parts(product, error + (self.hi * rhs.lo + self.lo * rhs.hi))
    }
}

impl Div for Extended {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let first = self.hi / rhs.hi;
        if !first.is_finite() || !rhs.is_finite() {
            return Self::from_f64(first);
        }
        let remainder = self - rhs * Self::from_f64(first);
        let second = remainder.hi / rhs.hi;
        let remainder = remainder - rhs * Self::from_f64(second);
        let third = remainder.hi / rhs.hi;

        Self::from_parts(first, second) + Self::from_f64(third)
    }
}

impl Neg for Extended {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

macro_rules! impl_assign_ops {
    ($($assign_trait:ident $assign_fn:ident => $op_fn:ident),* $(,)?) => {
        $(
            impl $assign_trait for Extended {
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = (*self).$op_fn(rhs);
                }
            }
        )*
    };
}

impl_assign_ops!(
    AddAssign add_assign => add,
    SubAssign sub_assign => sub,
    MulAssign mul_assign => mul,
    DivAssign div_assign => div,
);

impl PartialOrd for Extended {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi)? {
            Ordering::Equal => self.lo.partial_cmp(&other.lo),
            ordering => Some(ordering),
        }
    }
}

impl Product for Extended {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, value| acc * value)
    }
}

impl From<Extended> for f64 {
    fn from(value: Extended) -> Self {
        value.to_f64()
    }
}

impl Display for Extended {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_f64(), f)
    }
}

impl LowerExp for Extended {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        LowerExp::fmt(&self.to_f64(), f)
    }
}
