//! Range checks applied to stage arguments before any work is done.

use crate::error::{Bound, Result, SynthError};

/// Check that `min <= value <= max`.
///
/// Pass `f64::NEG_INFINITY` / `f64::INFINITY` for an open side. NaN never
/// passes; it is reported against the lower bound.
pub fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min {
        return Err(SynthError::InvalidParameter {
            name,
            bound: Bound::AtLeast(min),
            value,
        });
    }
    if value > max {
        return Err(SynthError::InvalidParameter {
            name,
            bound: Bound::AtMost(max),
            value,
        });
    }
    Ok(())
}

/// Check that `value >= min`.
pub fn check_min(name: &'static str, value: f64, min: f64) -> Result<()> {
    check_range(name, value, min, f64::INFINITY)
}

/// Check that `value <= max`.
pub fn check_max(name: &'static str, value: f64, max: f64) -> Result<()> {
    check_range(name, value, f64::NEG_INFINITY, max)
}

/// Check that `value < limit` (exclusive upper bound).
pub fn check_below(name: &'static str, value: f64, limit: f64) -> Result<()> {
    if value.is_nan() || value >= limit {
        return Err(SynthError::InvalidParameter {
            name,
            bound: Bound::Below(limit),
            value,
        });
    }
    Ok(())
}
