//! Nearest-module classification.
//!
//! [`assign_regions`] gives every star the circle of its own campaign whose
//! centre is nearest, provided it lies strictly closer than `radius`. Stars
//! only ever see the regions of their own campaign.
//!
//! Ties go to the region that comes first in table order: a later region
//! must be strictly nearer to replace the current best.

use std::collections::BTreeMap;

use k2gap_core::{chord_to_degrees, Vector3};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{SelectionError, SelectionResult};
use crate::regions::{Region, RegionTable, MAX_CAMPAIGN, MAX_MODULE_INDEX};

/// Raw id reported for stars with no region inside the search radius.
pub const UNASSIGNED_ID: i64 = -1;

/// Raw id reported for stars whose campaign is outside `0..=20`.
pub const INVALID_CAMPAIGN_MARKER: i64 = 8;

/// Outcome of the nearest-region search for one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionAssignment {
    /// Nearest region within the radius, by `circ_id`.
    Region(u32),
    /// No region of the star's campaign lies within the radius.
    Unassigned,
    /// The star's campaign number is outside the modelled range.
    InvalidCampaign,
}

impl RegionAssignment {
    /// Numeric encoding: the `circ_id`, [`UNASSIGNED_ID`] or
    /// [`INVALID_CAMPAIGN_MARKER`].
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::Region(id) => i64::from(*id),
            Self::Unassigned => UNASSIGNED_ID,
            Self::InvalidCampaign => INVALID_CAMPAIGN_MARKER,
        }
    }

    /// Module index (`circ_id % 100`) of an assigned region.
    ///
    /// `None` for unassigned stars, for the invalid-campaign marker, and for
    /// indices above 20. The marker is opaque and never reads as module 8.
    pub fn module_index(&self) -> Option<u8> {
        match self {
            Self::Region(id) => {
                let module = id % 100;
                (module <= MAX_MODULE_INDEX).then_some(module as u8)
            }
            Self::Unassigned | Self::InvalidCampaign => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Region(_))
    }
}

/// Campaign numbers for a batch of stars.
#[derive(Debug, Clone, Copy)]
pub enum Campaigns<'a> {
    /// Every star belongs to the same campaign.
    Uniform(i64),
    /// One campaign number per star.
    PerStar(&'a [i64]),
}

impl Campaigns<'_> {
    #[inline]
    pub fn get(&self, index: usize) -> i64 {
        match self {
            Self::Uniform(c) => *c,
            Self::PerStar(cs) => cs[index],
        }
    }

    /// Number of entries, or `None` for a broadcast campaign.
    pub fn per_star_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::PerStar(cs) => Some(cs.len()),
        }
    }

    /// Star indices grouped by campaign, campaigns ascending.
    pub(crate) fn group(&self, n: usize) -> BTreeMap<i64, Vec<usize>> {
        let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for i in 0..n {
            groups.entry(self.get(i)).or_default().push(i);
        }
        groups
    }
}

impl<'a> From<&'a [i64]> for Campaigns<'a> {
    fn from(cs: &'a [i64]) -> Self {
        Self::PerStar(cs)
    }
}

impl From<i64> for Campaigns<'_> {
    fn from(c: i64) -> Self {
        Self::Uniform(c)
    }
}

/// Whether `campaign` has a region set in the table's numbering scheme.
#[inline]
pub fn is_valid_campaign(campaign: i64) -> bool {
    (0..=MAX_CAMPAIGN).contains(&campaign)
}

/// Assign each star the nearest region of its campaign within `radius` degrees.
///
/// `ra` and `dec` are in degrees. Stars with a campaign outside `0..=20` get
/// [`RegionAssignment::InvalidCampaign`] regardless of position. Stars with
/// NaN coordinates stay [`RegionAssignment::Unassigned`], as does every star
/// when `radius` is NaN or negative.
///
/// # Errors
/// [`SelectionError::InvalidInput`] if the columns differ in length.
pub fn assign_regions<'a>(
    table: &RegionTable,
    campaigns: impl Into<Campaigns<'a>>,
    ra: &[f64],
    dec: &[f64],
    radius: f64,
) -> SelectionResult<Vec<RegionAssignment>> {
    let campaigns = campaigns.into();
    let n = ra.len();
    if dec.len() != n {
        return Err(SelectionError::invalid_input(format!(
            "column `dec` has {} entries, expected {}",
            dec.len(),
            n
        )));
    }
    if let Some(len) = campaigns.per_star_len() {
        if len != n {
            return Err(SelectionError::invalid_input(format!(
                "column `campaign` has {} entries, expected {}",
                len, n
            )));
        }
    }

    let mut assigned = vec![RegionAssignment::Unassigned; n];

    for (campaign, indices) in campaigns.group(n) {
        if !is_valid_campaign(campaign) {
            for &i in &indices {
                assigned[i] = RegionAssignment::InvalidCampaign;
            }
            debug!(campaign, stars = indices.len(), "campaign outside modelled range");
            continue;
        }

        let regions: Vec<&Region> = table.campaign_regions(campaign).collect();
        let results = classify_group(&regions, &indices, ra, dec, radius);

        let mut hits = 0usize;
        for (&i, result) in indices.iter().zip(results) {
            hits += usize::from(result.is_assigned());
            assigned[i] = result;
        }
        debug!(
            campaign,
            radius,
            regions = regions.len(),
            stars = indices.len(),
            assigned = hits,
            "classified campaign"
        );
    }

    Ok(assigned)
}

#[cfg(not(feature = "parallel"))]
fn classify_group(
    regions: &[&Region],
    indices: &[usize],
    ra: &[f64],
    dec: &[f64],
    radius: f64,
) -> Vec<RegionAssignment> {
    indices
        .iter()
        .map(|&i| nearest_region(regions, &Vector3::from_spherical_deg(ra[i], dec[i]), radius))
        .collect()
}

#[cfg(feature = "parallel")]
fn classify_group(
    regions: &[&Region],
    indices: &[usize],
    ra: &[f64],
    dec: &[f64],
    radius: f64,
) -> Vec<RegionAssignment> {
    indices
        .par_iter()
        .map(|&i| nearest_region(regions, &Vector3::from_spherical_deg(ra[i], dec[i]), radius))
        .collect()
}

fn nearest_region(regions: &[&Region], star: &Vector3, radius: f64) -> RegionAssignment {
    let mut best = RegionAssignment::Unassigned;
    let mut best_sep = radius;
    for region in regions {
        let sep = chord_to_degrees(star.chord(region.unit_vector()));
        if sep < best_sep {
            best_sep = sep;
            best = RegionAssignment::Region(region.id);
        }
    }
    best
}
