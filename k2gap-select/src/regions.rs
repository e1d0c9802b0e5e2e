//! Reference table of K2 detector-module circles.
//!
//! Each campaign's field of view is split into up to 21 CCD modules. The table
//! stores one circle centre per module, keyed by `circ_id = campaign * 100 +
//! module_index`. On disk it is a JSON object of three parallel arrays:
//!
//! ```json
//! {"circ_id": [100, 101, ...], "ra": [...], "dec": [...]}
//! ```
//!
//! The bundled copy is compiled into the library and parsed once per process
//! by [`RegionTable::bundled`]. Tables are immutable after loading.
//!
//! # Bundled centres are approximate
//!
//! The bundled table is not the survey's own `k2circles.json`. Its centres
//! are an idealised layout: each campaign's published boresight with the 21
//! modules on a 5×5 grid without corners, [`BUNDLED_MODULE_PITCH_DEG`] apart,
//! projected gnomonically with no roll and numbered row by row from the
//! north-west corner. Module 10 sits on the boresight. Real module positions
//! and numbering differ, so campaigns whose cuts name specific modules
//! (2, 3, 7, 11, 13, 15 and 17) select different stars than the survey table
//! would. For science use load the survey table with
//! [`RegionTable::from_path`] (or `--regions` on the command line).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use k2gap_core::Vector3;
use serde::Deserialize;
use tracing::debug;

use crate::error::{SelectionError, SelectionResult};

const BUNDLED_JSON: &str = include_str!("../data/k2circles.json");
const BUNDLED_NAME: &str = "k2circles.json";

/// Tangent-plane spacing, in degrees, between neighbouring module centres of
/// the bundled table. See the module docs: the bundled layout is approximate.
pub const BUNDLED_MODULE_PITCH_DEG: f64 = 3.2;

/// Highest campaign number the table can describe.
pub const MAX_CAMPAIGN: i64 = 20;

/// Highest valid module index within a campaign.
pub const MAX_MODULE_INDEX: u32 = 20;

/// One module circle on the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// `campaign * 100 + module_index`.
    pub id: u32,
    /// Centre right ascension, in degrees.
    pub ra: f64,
    /// Centre declination, in degrees.
    pub dec: f64,
    unit: Vector3,
}

impl Region {
    pub fn new(id: u32, ra: f64, dec: f64) -> Self {
        Self {
            id,
            ra,
            dec,
            unit: Vector3::from_spherical_deg(ra, dec),
        }
    }

    /// Campaign that owns this region (`id / 100`).
    #[inline]
    pub fn campaign(&self) -> u32 {
        self.id / 100
    }

    /// Module index within the campaign (`id % 100`).
    #[inline]
    pub fn module_index(&self) -> u32 {
        self.id % 100
    }

    /// Unit vector of the circle centre.
    #[inline]
    pub fn unit_vector(&self) -> &Vector3 {
        &self.unit
    }
}

#[derive(Deserialize)]
struct RawTable {
    circ_id: Vec<f64>,
    ra: Vec<f64>,
    dec: Vec<f64>,
}

/// Immutable collection of [`Region`]s, indexed by campaign.
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
    by_campaign: BTreeMap<u32, Vec<usize>>,
    source_name: String,
}

impl RegionTable {
    /// The region table shipped with this crate.
    ///
    /// Parsed on first use and shared for the rest of the process.
    ///
    /// The centres are an approximate grid about each campaign boresight, not
    /// the survey's measured module positions (see the [module docs](self)).
    /// Use [`RegionTable::from_path`] with the survey's `k2circles.json` when
    /// module identity matters.
    ///
    /// # Errors
    /// Returns [`SelectionError::DataLoad`] if the embedded table is malformed.
    pub fn bundled() -> SelectionResult<&'static RegionTable> {
        static BUNDLED: OnceLock<Result<RegionTable, String>> = OnceLock::new();

        BUNDLED
            .get_or_init(|| {
                RegionTable::from_json_str(BUNDLED_JSON, BUNDLED_NAME).map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|message| SelectionError::data_load(BUNDLED_NAME, message.clone()))
    }

    /// Load a region table from a JSON file.
    ///
    /// # Errors
    /// Returns [`SelectionError::DataLoad`] if the file cannot be read or its
    /// contents are not a valid table.
    pub fn from_path(path: impl AsRef<Path>) -> SelectionResult<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let json = fs::read_to_string(path)
            .map_err(|e| SelectionError::data_load(&name, format!("failed to read file: {}", e)))?;
        Self::from_json_str(&json, &name)
    }

    /// Parse a region table from JSON text. `source_name` labels errors and logs.
    pub fn from_json_str(json: &str, source_name: &str) -> SelectionResult<Self> {
        let raw: RawTable = serde_json::from_str(json)
            .map_err(|e| SelectionError::data_load(source_name, e.to_string()))?;
        let table = Self::from_raw(raw, source_name)?;
        debug!(
            source = source_name,
            regions = table.len(),
            campaigns = table.by_campaign.len(),
            "loaded region table"
        );
        Ok(table)
    }

    fn from_raw(raw: RawTable, source_name: &str) -> SelectionResult<Self> {
        let n = raw.circ_id.len();
        if raw.ra.len() != n || raw.dec.len() != n {
            return Err(SelectionError::data_load(
                source_name,
                format!(
                    "field lengths differ: circ_id={}, ra={}, dec={}",
                    n,
                    raw.ra.len(),
                    raw.dec.len()
                ),
            ));
        }
        if n == 0 {
            return Err(SelectionError::data_load(source_name, "table has no regions"));
        }

        let mut regions = Vec::with_capacity(n);
        for (i, ((&id, &ra), &dec)) in raw.circ_id.iter().zip(&raw.ra).zip(&raw.dec).enumerate() {
            if !(id >= 0.0 && id.fract() == 0.0 && id <= u32::MAX as f64) {
                return Err(SelectionError::data_load(
                    source_name,
                    format!("entry {}: circ_id {} is not a non-negative integer", i, id),
                ));
            }
            if !ra.is_finite() || !dec.is_finite() {
                return Err(SelectionError::data_load(
                    source_name,
                    format!("entry {}: non-finite centre ({}, {})", i, ra, dec),
                ));
            }
            regions.push(Region::new(id as u32, ra, dec));
        }

        Ok(Self::from_regions(regions, source_name))
    }

    /// Build a table from regions already in memory. Order is preserved.
    pub fn from_regions(regions: Vec<Region>, source_name: &str) -> Self {
        let mut by_campaign: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, region) in regions.iter().enumerate() {
            by_campaign.entry(region.campaign()).or_default().push(i);
        }
        Self {
            regions,
            by_campaign,
            source_name: source_name.to_string(),
        }
    }

    /// Regions of `campaign`, in table order.
    ///
    /// Table order is the tie-break order of the nearest-region search.
    pub fn campaign_regions(&self, campaign: i64) -> impl Iterator<Item = &Region> + '_ {
        let indices = u32::try_from(campaign)
            .ok()
            .and_then(|c| self.by_campaign.get(&c))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        indices.iter().map(move |&i| &self.regions[i])
    }

    /// Number of regions per campaign, in ascending campaign order.
    pub fn campaign_counts(&self) -> Vec<(u32, usize)> {
        self.by_campaign
            .iter()
            .map(|(&c, indices)| (c, indices.len()))
            .collect()
    }

    pub fn get(&self, id: u32) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}
