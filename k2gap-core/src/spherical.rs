//! Spherical-to-Cartesian conversion and great-circle separation.
//!
//! Separations use the chord formulation `2·asin(c/2)`, where `c` is the
//! straight-line distance between the two unit vectors. Unlike `acos` of the
//! dot product it keeps full precision for separations of a fraction of a
//! degree, which is the regime the region classifier works in.

use crate::constants::RAD_TO_DEG;
use crate::vector3::Vector3;

/// Convert (longitude, latitude, radius) to Cartesian coordinates.
///
/// `lon` and `lat` are in degrees; `r` is in arbitrary units and scales the
/// result. Returns `r·(cos(lat)cos(lon), cos(lat)sin(lon), sin(lat))`.
pub fn to_cartesian(lon: f64, lat: f64, r: f64) -> Vector3 {
    Vector3::from_spherical_deg(lon, lat) * r
}

/// Angle in degrees subtended by a chord of the unit sphere.
///
/// Chords a rounding error beyond the diameter are clamped to 180°. NaN
/// passes through.
#[inline]
pub fn chord_to_degrees(chord: f64) -> f64 {
    let half = if chord > 2.0 { 1.0 } else { chord / 2.0 };
    2.0 * libm::asin(half) * RAD_TO_DEG
}

/// Angular distance in degrees between (lon1, lat1) and (lon2, lat2).
///
/// All arguments are in degrees. The result lies in `[0, 180]` and is exactly
/// zero for identical inputs.
pub fn angular_separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let a = Vector3::from_spherical_deg(lon1, lat1);
    let b = Vector3::from_spherical_deg(lon2, lat2);
    chord_to_degrees(a.chord(&b))
}

/// Angular distance in degrees from each of many points to one reference point.
///
/// The reference vector is computed once. Separation is symmetric, so this
/// also serves the "one point against many" direction.
///
/// # Panics
/// Panics if `lons` and `lats` have different lengths.
pub fn angular_separation_many(lons: &[f64], lats: &[f64], ref_lon: f64, ref_lat: f64) -> Vec<f64> {
    assert_eq!(
        lons.len(),
        lats.len(),
        "longitude and latitude slices must have equal length"
    );
    let reference = Vector3::from_spherical_deg(ref_lon, ref_lat);
    lons.iter()
        .zip(lats)
        .map(|(&lon, &lat)| chord_to_degrees(Vector3::from_spherical_deg(lon, lat).chord(&reference)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vincenty_separation_deg;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_to_cartesian_radius() {
        let v = to_cartesian(0.0, 0.0, 2.5);
        assert_abs_diff_eq!(v.x, 2.5, epsilon = 1e-15);

        let v = to_cartesian(90.0, 0.0, 3.0);
        assert_abs_diff_eq!(v.y, 3.0, epsilon = 1e-15);

        let v = to_cartesian(42.0, -90.0, 1.0);
        assert_abs_diff_eq!(v.z, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_angular_separation_same_point() {
        for (l, b) in [(0.0, 0.0), (173.9, 1.4), (359.99, -89.5), (12.0, 90.0)] {
            assert_eq!(angular_separation(l, b, l, b), 0.0);
        }
    }

    #[test]
    fn test_angular_separation_symmetric() {
        let pairs = [
            (10.0, 20.0, 11.5, 19.0),
            (359.0, -5.0, 1.0, 5.0),
            (246.1, -22.4, 66.1, 22.4),
        ];
        for (a, b, c, d) in pairs {
            assert_eq!(angular_separation(a, b, c, d), angular_separation(c, d, a, b));
        }
    }

    #[test]
    fn test_angular_separation_known_values() {
        assert_abs_diff_eq!(angular_separation(0.0, 0.0, 90.0, 0.0), 90.0, epsilon = 1e-10);
        // asin is flat at the antipode, so a rounding error in the chord costs ~1e-6°.
        assert_abs_diff_eq!(angular_separation(0.0, 90.0, 0.0, -90.0), 180.0, epsilon = 1e-6);
        assert_abs_diff_eq!(angular_separation(0.0, 0.0, 180.0, 0.0), 180.0, epsilon = 1e-6);

        let dist = angular_separation(0.0, 0.0, 0.1, 0.1);
        assert!(dist > 0.14 && dist < 0.15);
    }

    #[test]
    fn test_agrees_with_vincenty() {
        let points = [
            (173.94, 1.42, 175.1, 2.9),
            (336.67, -11.09, 333.0, -8.0),
            (98.3, 21.6, 98.3001, 21.6001),
            (0.0, 89.0, 180.0, 89.0),
        ];
        for (a, b, c, d) in points {
            assert_abs_diff_eq!(
                angular_separation(a, b, c, d),
                vincenty_separation_deg(a, b, c, d),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_separation_many_matches_scalar() {
        let lons = [173.0, 174.0, 175.5];
        let lats = [1.0, 1.5, -0.5];
        let seps = angular_separation_many(&lons, &lats, 173.9, 1.4);
        assert_eq!(seps.len(), 3);
        for i in 0..3 {
            assert_abs_diff_eq!(
                seps[i],
                angular_separation(lons[i], lats[i], 173.9, 1.4),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(angular_separation(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }
}
