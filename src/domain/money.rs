//! Currency rounding helpers.

const CENTS: f64 = 100.0;

// Absorbs representation error such as 980.0000000000001 before ceil/floor.
const CENT_TOLERANCE: f64 = 1e-6;

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * CENTS).round() / CENTS
}

/// Smallest 2-decimal value that is not below `value`.
pub fn ceil2(value: f64) -> f64 {
    (value * CENTS - CENT_TOLERANCE).ceil() / CENTS
}

/// Largest 2-decimal value that is not above `value`.
pub fn floor2(value: f64) -> f64 {
    (value * CENTS + CENT_TOLERANCE).floor() / CENTS
}
