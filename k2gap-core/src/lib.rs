//! Spherical geometry for the K2GAP selection function.
//!
//! `k2gap-core` holds the small amount of sky geometry the selection function
//! needs: turning (longitude, latitude) pairs into Cartesian vectors and
//! measuring great-circle distances between them.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`spherical`] | [`to_cartesian`], [`angular_separation`] and its batch form |
//! | [`vector3`] | [`Vector3`] Cartesian type |
//! | [`constants`] | Degree/radian conversion factors |
//!
//! # Conventions
//!
//! Public functions take and return **degrees**. Radians only appear inside
//! the trigonometry. Longitude is measured from +X toward +Y, latitude from
//! the XY plane toward +Z, matching right ascension and declination.
//!
//! ```
//! use k2gap_core::{angular_separation, to_cartesian};
//!
//! let pole = to_cartesian(0.0, 90.0, 1.0);
//! assert!((pole.z - 1.0).abs() < 1e-15);
//!
//! let d = angular_separation(10.0, 0.0, 10.0, 1.0);
//! assert!((d - 1.0).abs() < 1e-12);
//! ```

pub mod constants;
#[cfg(test)]
mod math;
pub mod spherical;
pub mod vector3;

pub use spherical::{angular_separation, angular_separation_many, chord_to_degrees, to_cartesian};
pub use vector3::Vector3;
