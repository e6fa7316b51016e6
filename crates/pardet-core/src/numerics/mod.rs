pub mod element;
pub mod extended;

pub use element::Element;
pub use extended::Extended;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Tolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
    #[serde(rename = "relativeFloor")]
    pub relative_floor: f64,
}

impl Tolerance {
    pub const fn absolute(abs_tol: f64) -> Self {
        Self {
            abs_tol,
            rel_tol: 0.0,
            relative_floor: 0.0,
        }
    }

    pub const fn relative(rel_tol: f64, relative_floor: f64) -> Self {
        Self {
            abs_tol: 0.0,
            rel_tol,
            relative_floor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

pub fn compare_with_tolerance(
    baseline: Extended,
    actual: Extended,
    tolerance: Tolerance,
) -> ToleranceComparison {
    let abs_diff = (actual - baseline).abs().to_f64();
    let rel_denominator = baseline.abs().to_f64().max(tolerance.relative_floor);
    let rel_diff = abs_diff / rel_denominator;
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * rel_denominator;

    ToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

pub fn approx_eq(expected: Extended, actual: Extended, abs_tol: f64) -> bool {
    compare_with_tolerance(expected, actual, Tolerance::absolute(abs_tol)).passes
}

pub fn format_extended(value: Extended) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let value = value.to_f64();
    if value == f64::INFINITY {
        return "inf".to_string();
    }

    if value == f64::NEG_INFINITY {
        return "-inf".to_string();
    }

    format!("{value:.15E}")
}
