//! The K2GAP selection function.
//!
//! [`select`] decides, star by star, whether a 2MASS source would have been
//! proposed as a K2 Galactic Archaeology target:
//!
//! 1. colour `J−Ks` and synthetic V magnitude from J and Ks;
//! 2. module assignment at 1.0° (`ccd_narrow`) and at the operative radius
//!    (`ccd_wide`, 1.75° by default, 1.4° when simulating on-silicon checks);
//! 3. the campaign's own cut from [`crate::rules`];
//! 4. two gates applied to every campaign: the star must lie on the wide
//!    field and have `J < 15`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{assign_regions, Campaigns, RegionAssignment};
use crate::error::{SelectionError, SelectionResult};
use crate::photometry::{jk_color, jk_to_vmag};
use crate::regions::RegionTable;
use crate::rules::{passes_campaign_rule, StarObservables};

/// Search radius in degrees used for precise module identity.
pub const NARROW_RADIUS_DEG: f64 = 1.0;

/// Default operative radius; encloses a whole CCD module.
pub const DEFAULT_RADIUS_DEG: f64 = 1.75;

/// Radius that stands in for a full on-silicon footprint test.
pub const ON_SILICON_RADIUS_DEG: f64 = 1.4;

/// Stars at or fainter than this J magnitude are never selected.
pub const J_MAG_LIMIT: f64 = 15.0;

/// Options for a selection pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Distance in degrees from the centre of the nearest module within which
    /// a star counts as on the field.
    ///
    /// Module circles do not overlap below 1.6°. Use 1.75 for data that
    /// already passed an on-silicon check (e.g. observed K2 targets).
    pub radius: f64,
    /// Emulate an on-silicon footprint check by forcing `radius` to 1.4°,
    /// whose circle has roughly the area of one module. Useful for mock
    /// catalogues where the exact footprint test would be too slow.
    pub simulate_on_silicon: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_DEG,
            simulate_on_silicon: false,
        }
    }
}

impl SelectionConfig {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn simulating_on_silicon() -> Self {
        Self {
            simulate_on_silicon: true,
            ..Self::default()
        }
    }

    /// Radius actually used for `ccd_wide`.
    pub fn effective_radius(&self) -> f64 {
        if self.simulate_on_silicon {
            ON_SILICON_RADIUS_DEG
        } else {
            self.radius
        }
    }
}

/// Borrowed star columns. Every slice must have the same length.
#[derive(Debug, Clone, Copy)]
pub struct StarColumns<'a> {
    pub campaign: Campaigns<'a>,
    /// Right ascension, degrees.
    pub ra: &'a [f64],
    /// Declination, degrees.
    pub dec: &'a [f64],
    /// 2MASS J.
    pub jmag: &'a [f64],
    /// 2MASS H.
    pub hmag: &'a [f64],
    /// 2MASS Ks.
    pub kmag: &'a [f64],
}

impl<'a> StarColumns<'a> {
    pub fn new(
        campaign: impl Into<Campaigns<'a>>,
        ra: &'a [f64],
        dec: &'a [f64],
        jmag: &'a [f64],
        hmag: &'a [f64],
        kmag: &'a [f64],
    ) -> Self {
        Self {
            campaign: campaign.into(),
            ra,
            dec,
            jmag,
            hmag,
            kmag,
        }
    }

    /// Number of stars, taken from the `ra` column.
    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    /// Check that all columns have the same length.
    ///
    /// # Errors
    /// [`SelectionError::InvalidInput`] naming the first mismatched column.
    pub fn validate(&self) -> SelectionResult<()> {
        let n = self.len();
        let mut lengths = vec![
            ("dec", self.dec.len()),
            ("jmag", self.jmag.len()),
            ("hmag", self.hmag.len()),
            ("kmag", self.kmag.len()),
        ];
        if let Some(len) = self.campaign.per_star_len() {
            lengths.insert(0, ("campaign", len));
        }
        match lengths.into_iter().find(|(_, len)| *len != n) {
            Some((name, len)) => Err(SelectionError::invalid_input(format!(
                "column `{}` has {} entries, expected {} (length of `ra`)",
                name, len, n
            ))),
            None => Ok(()),
        }
    }
}

/// Per-star intermediate quantities together with the final decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarEvaluation {
    pub campaign: i64,
    pub observables: StarObservables,
    /// Raw assignment at the operative radius.
    pub wide_assignment: RegionAssignment,
    pub selected: bool,
}

/// Evaluate the selection function and keep the intermediate quantities.
///
/// # Errors
/// [`SelectionError::InvalidInput`] if the columns differ in length. Nothing
/// is computed in that case. A NaN or negative radius is not an error: no
/// star lands in the wide field, so nothing is selected.
pub fn evaluate(
    table: &RegionTable,
    stars: &StarColumns<'_>,
    config: &SelectionConfig,
) -> SelectionResult<Vec<StarEvaluation>> {
    stars.validate()?;
    let radius = config.effective_radius();

    let narrow = assign_regions(table, stars.campaign, stars.ra, stars.dec, NARROW_RADIUS_DEG)?;
    let wide = assign_regions(table, stars.campaign, stars.ra, stars.dec, radius)?;

    let evaluations: Vec<StarEvaluation> = (0..stars.len())
        .map(|i| {
            let campaign = stars.campaign.get(i);
            let (jmag, kmag) = (stars.jmag[i], stars.kmag[i]);
            let observables = StarObservables {
                color: jk_color(jmag, kmag),
                hmag: stars.hmag[i],
                vmag: jk_to_vmag(jmag, kmag),
                ccd_narrow: narrow[i].module_index(),
                ccd_wide: wide[i].module_index(),
            };
            let selected = passes_campaign_rule(campaign, &observables)
                && observables.ccd_wide.is_some()
                && jmag < J_MAG_LIMIT;
            StarEvaluation {
                campaign,
                observables,
                wide_assignment: wide[i],
                selected,
            }
        })
        .collect();

    debug!(
        stars = evaluations.len(),
        selected = evaluations.iter().filter(|e| e.selected).count(),
        radius,
        "selection complete"
    );

    Ok(evaluations)
}

/// Evaluate the selection function. One boolean per star, in input order.
pub fn select(
    table: &RegionTable,
    stars: &StarColumns<'_>,
    config: &SelectionConfig,
) -> SelectionResult<Vec<bool>> {
    Ok(evaluate(table, stars, config)?
        .into_iter()
        .map(|e| e.selected)
        .collect())
}

/// Selection function against the bundled region table.
///
/// `campaign` may be one value per star or a single campaign for all of them.
///
/// The bundled module centres are an approximate layout (see
/// [`crate::regions`]), so stars near module edges, and campaigns whose cuts
/// name specific modules, can differ from a selection made with the survey's
/// table. Pass that table to [`select`] via [`RegionTable::from_path`] instead.
///
/// A NaN or negative `radius` selects nothing.
#[allow(clippy::too_many_arguments)]
pub fn sf<'a>(
    campaign: impl Into<Campaigns<'a>>,
    ra: &'a [f64],
    dec: &'a [f64],
    jmag: &'a [f64],
    hmag: &'a [f64],
    kmag: &'a [f64],
    radius: f64,
    simulate_on_silicon: bool,
) -> SelectionResult<Vec<bool>> {
    let table = RegionTable::bundled()?;
    let stars = StarColumns::new(campaign, ra, dec, jmag, hmag, kmag);
    let config = SelectionConfig {
        radius,
        simulate_on_silicon,
    };
    select(table, &stars, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::Region;

    fn toy_table() -> RegionTable {
        RegionTable::from_regions(
            vec![
                Region::new(105, 174.0, 1.0),
                Region::new(101, 177.2, 1.0),
                Region::new(1001, 186.0, -4.0),
                Region::new(1002, 189.2, -4.0),
            ],
            "toy",
        )
    }

    #[test]
    fn test_default_config() {
        let config = SelectionConfig::default();
        assert_eq!(config.radius, 1.75);
        assert!(!config.simulate_on_silicon);
        assert_eq!(config.effective_radius(), 1.75);
    }

    #[test]
    fn test_simulate_on_silicon_overrides_radius() {
        let config = SelectionConfig {
            radius: 3.0,
            simulate_on_silicon: true,
        };
        assert_eq!(config.effective_radius(), ON_SILICON_RADIUS_DEG);
        assert_eq!(SelectionConfig::with_radius(1.2).effective_radius(), 1.2);
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config: SelectionConfig = serde_json::from_str(r#"{"simulate_on_silicon": true}"#).unwrap();
        assert_eq!(config.radius, DEFAULT_RADIUS_DEG);
        assert!(config.simulate_on_silicon);
    }

    #[test]
    fn test_validate_names_column() {
        let x = [1.0, 2.0];
        let short = [1.0];
        let two = [1i64, 1];
        let one = [1i64];
        let stars = StarColumns::new(&two[..], &x, &x, &x, &short, &x);
        let err = stars.validate().unwrap_err();
        assert!(err.to_string().contains("hmag"));

        let stars = StarColumns::new(&one[..], &x, &x, &x, &x, &x);
        assert!(stars.validate().unwrap_err().to_string().contains("campaign"));

        let stars = StarColumns::new(1i64, &x, &x, &x, &x, &x);
        assert!(stars.validate().is_ok());
    }

    #[test]
    fn test_selects_star_on_module() {
        let table = toy_table();
        let stars = StarColumns::new(1i64, &[174.0], &[1.0], &[10.8], &[10.0], &[10.2]);
        let out = evaluate(&table, &stars, &SelectionConfig::default()).unwrap();
        assert_eq!(out[0].observables.ccd_narrow, Some(5));
        assert_eq!(out[0].observables.ccd_wide, Some(5));
        assert_eq!(out[0].wide_assignment, RegionAssignment::Region(105));
        assert!(out[0].selected);
    }

    #[test]
    fn test_j_limit_gate() {
        let table = toy_table();
        let stars = StarColumns::new(1i64, &[174.0], &[1.0], &[15.0], &[10.0], &[14.4]);
        let out = select(&table, &stars, &SelectionConfig::default()).unwrap();
        assert_eq!(out, vec![false]);
    }

    #[test]
    fn test_wide_field_gate() {
        let table = toy_table();
        // Campaign 3 accepts stars off every narrow module, but the wide gate still applies.
        let stars = StarColumns::new(3i64, &[174.0], &[1.0], &[10.8], &[10.0], &[10.2]);
        assert_eq!(select(&table, &stars, &SelectionConfig::default()).unwrap(), vec![false]);
    }

    #[test]
    fn test_on_silicon_shrinks_field() {
        let table = toy_table();
        // 1.5° from the module 5 centre: inside 1.75°, outside 1.4°.
        let stars = StarColumns::new(1i64, &[174.0], &[2.5], &[10.8], &[10.0], &[10.2]);
        assert_eq!(select(&table, &stars, &SelectionConfig::default()).unwrap(), vec![true]);
        let config = SelectionConfig::simulating_on_silicon();
        assert_eq!(select(&table, &stars, &config).unwrap(), vec![false]);
    }

    #[test]
    fn test_campaign_10_module_1_excluded() {
        let table = toy_table();
        let stars = StarColumns::new(
            10i64,
            &[186.0, 189.2],
            &[-4.0, -4.0],
            &[12.0, 12.0],
            &[11.4, 11.4],
            &[11.3, 11.3],
        );
        let out = evaluate(&table, &stars, &SelectionConfig::default()).unwrap();
        assert_eq!(out[0].observables.ccd_wide, Some(1));
        assert!(!out[0].selected);
        assert_eq!(out[1].observables.ccd_wide, Some(2));
        assert!(out[1].selected, "vmag = {}", out[1].observables.vmag);
    }

    #[test]
    fn test_empty_input() {
        let table = toy_table();
        let no_campaigns: [i64; 0] = [];
        let empty: [f64; 0] = [];
        let stars = StarColumns::new(&no_campaigns[..], &empty, &empty, &empty, &empty, &empty);
        assert!(select(&table, &stars, &SelectionConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_radius_selects_nothing() {
        let table = toy_table();
        let stars = StarColumns::new(1i64, &[174.0], &[1.0], &[10.8], &[10.0], &[10.2]);
        for radius in [f64::NAN, -1.0] {
            let out = evaluate(&table, &stars, &SelectionConfig::with_radius(radius)).unwrap();
            assert_eq!(out[0].wide_assignment, RegionAssignment::Unassigned);
            assert!(!out[0].selected);
        }
    }

    #[test]
    fn test_nan_magnitudes_not_selected() {
        let table = toy_table();
        let stars = StarColumns::new(1i64, &[174.0], &[1.0], &[f64::NAN], &[10.0], &[10.2]);
        assert_eq!(select(&table, &stars, &SelectionConfig::default()).unwrap(), vec![false]);
    }
}
