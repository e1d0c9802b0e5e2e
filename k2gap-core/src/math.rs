#[inline]
pub(crate) fn vincenty_angular_separation(
    sin_lat1: f64,
    cos_lat1: f64,
    sin_lat2: f64,
    cos_lat2: f64,
    delta_lon: f64,
) -> f64 {
    let (sin_delta_lon, cos_delta_lon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_delta_lon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon;

    libm::atan2(num, den)
}

/// Vincenty great-circle distance between two points given in degrees.
///
/// Well conditioned at every separation. The selection function itself uses
/// the chord formula in [`crate::spherical`]; this one serves as the reference
/// it is checked against.
pub(crate) fn vincenty_separation_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};

    let (s1, c1) = libm::sincos(lat1 * DEG_TO_RAD);
    let (s2, c2) = libm::sincos(lat2 * DEG_TO_RAD);
    vincenty_angular_separation(s1, c1, s2, c2, (lon2 - lon1) * DEG_TO_RAD) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vincenty_quadrant() {
        assert_abs_diff_eq!(vincenty_separation_deg(0.0, 0.0, 90.0, 0.0), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vincenty_separation_deg(0.0, 90.0, 0.0, -90.0), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vincenty_wraps_longitude() {
        let a = vincenty_separation_deg(359.5, 0.0, 0.5, 0.0);
        assert_abs_diff_eq!(a, 1.0, epsilon = 1e-12);
    }
}
