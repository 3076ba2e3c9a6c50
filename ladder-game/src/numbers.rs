//! Numeric conversion helpers centralizing the integer-to-float projection.

use num_traits::cast::cast;

/// Convert a count or index to f32, returning 0.0 if it cannot be represented.
#[must_use]
pub fn usize_to_f32(value: usize) -> f32 {
    cast::<usize, f32>(value).unwrap_or(0.0)
}

/// Fraction `numerator / denominator` clamped to `[0.0, 1.0]`.
///
/// A zero denominator yields 0.0.
#[must_use]
pub fn unit_fraction(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        return 0.0;
    }
    (usize_to_f32(numerator) / usize_to_f32(denominator)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_clamp_to_unit_interval() {
        assert!((unit_fraction(1, 4) - 0.25).abs() < f32::EPSILON);
        assert!((unit_fraction(9, 3) - 1.0).abs() < f32::EPSILON);
        assert!(unit_fraction(3, 0).abs() < f32::EPSILON);
    }

    #[test]
    fn small_counts_convert_exactly() {
        assert!((usize_to_f32(11) - 11.0).abs() < f32::EPSILON);
    }
}
