//! 2MASS colour and synthetic V magnitude.

/// J − Ks colour index.
#[inline]
pub fn jk_color(jmag: f64, kmag: f64) -> f64 {
    jmag - kmag
}

/// Empirical V magnitude from 2MASS J and Ks.
///
/// `V = Ks + 2((J−Ks) + 0.14) + 0.382·exp(2(J−Ks−0.2))`
pub fn jk_to_vmag(jmag: f64, kmag: f64) -> f64 {
    let color = jk_color(jmag, kmag);
    kmag + 2.0 * (color + 0.14) + 0.382 * libm::exp((color - 0.2) * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_color() {
        assert_abs_diff_eq!(jk_color(10.6, 10.0), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_vmag_at_pivot_color() {
        // J−K = 0.2 makes the exponential term exactly 0.382.
        let v = jk_to_vmag(10.2, 10.0);
        assert_abs_diff_eq!(v, 10.0 + 2.0 * 0.34 + 0.382, epsilon = 1e-12);
    }

    #[test]
    fn test_vmag_red_star() {
        let v = jk_to_vmag(11.0, 10.0);
        let expected = 10.0 + 2.0 * 1.14 + 0.382 * (1.6f64).exp();
        assert_abs_diff_eq!(v, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_vmag_increases_with_color() {
        let blue = jk_to_vmag(10.5, 10.0);
        let red = jk_to_vmag(10.9, 10.0);
        assert!(red > blue);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(jk_to_vmag(f64::NAN, 10.0).is_nan());
    }
}
