//! Target selection function of the K2 Galactic Archaeology Program (K2GAP).
//!
//! Given campaign numbers, sky positions and 2MASS J/H/Ks magnitudes, decide
//! for each star whether it satisfies its campaign's photometric and spatial
//! selection. Useful for forward-modelling the K2GAP sample from a mock or
//! observed catalogue.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`regions`] | [`RegionTable`] of per-campaign module circles, bundled JSON loader |
//! | [`classify`] | [`assign_regions`]: nearest module of the star's own campaign |
//! | [`photometry`] | J−Ks colour and synthetic V magnitude |
//! | [`rules`] | [`campaign_rule`] lookup table of per-campaign cuts |
//! | [`selection`] | [`select`], [`evaluate`], [`sf`] and [`SelectionConfig`] |
//! | [`error`] | [`SelectionError`] and [`SelectionResult`] |
//!
//! The region table bundled with the crate approximates the survey's module
//! layout (see [`regions`]). Load the survey's own `k2circles.json` with
//! [`RegionTable::from_path`] and call [`select`] when module identity matters.
//!
//! # Quick Start
//!
//! ```
//! use k2gap_select::{sf, DEFAULT_RADIUS_DEG};
//!
//! let campaign = [1i64, 18];
//! let ra = [173.9, 130.1];
//! let dec = [1.4, 16.8];
//! let jmag = [10.8, 10.8];
//! let hmag = [10.0, 10.0];
//! let kmag = [10.2, 10.2];
//!
//! let selected = sf(&campaign[..], &ra, &dec, &jmag, &hmag, &kmag, DEFAULT_RADIUS_DEG, false)?;
//! assert_eq!(selected.len(), 2);
//! assert!(!selected[1]); // campaign 18 selects nothing
//! # Ok::<(), k2gap_select::SelectionError>(())
//! ```
//!
//! # Features
//!
//! - **`parallel`**: classify stars on a `rayon` thread pool. Results are
//!   identical to the sequential path.
//! - **`cli`**: builds the `k2gap-select` binary for running the selection
//!   over a CSV file.

pub mod classify;
pub mod error;
pub mod photometry;
pub mod regions;
pub mod rules;
pub mod selection;

pub use classify::{assign_regions, Campaigns, RegionAssignment};
pub use error::{SelectionError, SelectionResult};
pub use regions::{Region, RegionTable, BUNDLED_MODULE_PITCH_DEG};
pub use rules::{campaign_rule, CampaignRule, StarObservables};
pub use selection::{
    evaluate, select, sf, SelectionConfig, StarColumns, StarEvaluation, DEFAULT_RADIUS_DEG,
    NARROW_RADIUS_DEG, ON_SILICON_RADIUS_DEG,
};
