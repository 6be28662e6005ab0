//! Fixed-precision rounding applied to every emitted metric.

/// Decimal places for time and keys-per-second fields
pub const TIME_PRECISION: u32 = 2;
/// Decimal places for backspace / delete rates
pub const RATE_PRECISION: u32 = 4;

/// Round the exact binary value of `value` to `places` decimals. Precision formatting is
/// correctly rounded, so values just above or below a decimal midpoint land on the
/// right side of it. Non-finite values pass through.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places as usize, value)
        .parse::<f64>()
        .unwrap_or(value)
}
