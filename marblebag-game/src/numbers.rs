//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn count_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert a finite, integral f64 to u32, returning `None` for fractional,
/// non-finite or out-of-range values.
#[must_use]
pub fn f64_to_u32_exact(value: f64) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    cast::<f64, u32>(value)
}

/// Share of `part` in `total`, 0.0 when `total` is zero.
#[must_use]
pub fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count_to_f64(part) / count_to_f64(total)
}
