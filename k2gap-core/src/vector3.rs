//! 3D Cartesian vectors for sky positions.
//!
//! Sky positions arrive as (longitude, latitude) pairs in degrees but distances
//! between them are cleanest in Cartesian form: two unit vectors separated by an
//! angle θ sit a chord `2 sin(θ/2)` apart, and that chord is cheap to compute and
//! well behaved for the small separations the region classifier cares about.
//!
//! ```
//! use k2gap_core::Vector3;
//!
//! let a = Vector3::from_spherical_deg(0.0, 0.0);
//! let b = Vector3::from_spherical_deg(90.0, 0.0);
//! assert!((a.chord(&b) - 2f64.sqrt()).abs() < 1e-15);
//! ```
use crate::constants::DEG_TO_RAD;

/// A 3D Cartesian vector.
///
/// Components are public for direct access:
/// - `x`: toward longitude 0 on the equator
/// - `y`: toward longitude 90° on the equator
/// - `z`: toward latitude +90°
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a new vector from x, y, z components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a unit vector from spherical coordinates in radians.
    ///
    /// - `lon`: azimuthal angle from +X toward +Y
    /// - `lat`: elevation from the XY plane
    pub fn from_spherical(lon: f64, lat: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon);
        let (sin_lat, cos_lat) = libm::sincos(lat);
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Creates a unit vector from spherical coordinates in degrees.
    #[inline]
    pub fn from_spherical_deg(lon_deg: f64, lat_deg: f64) -> Self {
        Self::from_spherical(lon_deg * DEG_TO_RAD, lat_deg * DEG_TO_RAD)
    }

    /// Returns the Euclidean length (L2 norm) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.magnitude_squared())
    }

    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Straight-line distance between the tips of two vectors.
    ///
    /// For unit vectors this is the chord subtending their angular separation.
    #[inline]
    pub fn chord(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }
}

/// Vector - Vector
impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Vector * scalar
impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}
