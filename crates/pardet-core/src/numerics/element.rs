use super::Extended;

/// A matrix element that can be widened into the working precision.
///
/// Every primitive integer and float widens without loss: 64-bit integers that
/// do not fit in an `f64` mantissa keep their low bits in the tail component.
pub trait Element: Copy + Send + Sync {
    fn widen(self) -> Extended;
}

impl Element for Extended {
    fn widen(self) -> Extended {
        self
    }
}

macro_rules! impl_exact_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                fn widen(self) -> Extended {
                    Extended::from_f64(f64::from(self))
                }
            }

            impl From<$ty> for Extended {
                fn from(value: $ty) -> Self {
                    value.widen()
                }
            }
        )*
    };
}

macro_rules! impl_wide_integer_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                fn widen(self) -> Extended {
                    let value = self as i128;
                    let hi = value as f64;
                    let lo = (value - hi as i128) as f64;
                    Extended::from_parts(hi, lo)
                }
            }

            impl From<$ty> for Extended {
                fn from(value: $ty) -> Self {
                    value.widen()
                }
            }
        )*
    };
}

impl_exact_element!(i8, i16, i32, u8, u16, u32, f32, f64);
impl_wide_integer_element!(i64, u64, isize, usize);
