//! Per-campaign photometric and module cuts.
//!
//! Every campaign of the K2 Galactic Archaeology Program picked its giants
//! with its own combination of a J−Ks colour cut, a magnitude window (2MASS H
//! for campaigns 1–3, synthetic V afterwards) and a restriction on which CCD
//! modules a star may fall on. [`campaign_rule`] maps a campaign number to its
//! cut; campaigns without one select nothing.
//!
//! | Campaign | Cut (all require `J−Ks ≥ 0.5`) |
//! |----------|-------------------------------|
//! | 1 | `7.0 ≤ H < 12.927`, wide field |
//! | 2 | `7.0 ≤ H < 11.5`, narrow module ∈ {17, 12, 6, 14, 10} |
//! | 3 | `7.0 ≤ H < 12.0` on a narrow module, else `7.0 ≤ H < 10.929` |
//! | 4 | `9.0 ≤ V < 13.447`, wide field |
//! | 5, 6 | `9.0 ≤ V < 15.0`, wide field |
//! | 7 | `9.0 ≤ V < 14.5` on modules 17 or 6, `14.276 ≤ V < 14.5` on module 14 |
//! | 8 | `9.0 ≤ V < 14.5`, plus `0.5 ≤ J−Ks < 0.7` for `14.5 ≤ V < 14.580`, wide field |
//! | 10 | as 8 with upper bound 15.577, wide module ≠ 1 |
//! | 11 | module 3 `V < 15.0`, module 2 `V < 14.5`, module 8 `V < 14.175` |
//! | 12 | `9.0 ≤ V < 16.0`, wide module ≠ 1 |
//! | 13 | module 3 `< 15.0`, 8 `< 14.5`, {0, 13, 7, 9, 4, 12} `< 14.0`, 14 `< 12.818` |
//! | 14, 16 | `9.0 ≤ V < 15.0`, wide module ≠ 1 |
//! | 15 | module 3 `< 15.5`, 8 `< 15.0`, {13, 7, 9, 4, 12, 14, 2} `< 14.5`, 5 `< 13.838` |
//! | 17 | `9.0 ≤ V < 16.0` on modules 8 or 3, else `9.0 ≤ V < 12.414` off wide module 1 |
//! | 19 | `9.0 ≤ V < 14.8`, wide module ≠ 1 |
//!
//! Campaign 9 and campaign 18 have no cut. Per-module V windows all start at
//! 9.0. "Narrow" and "wide" refer to the module assignment at the 1.0° and the
//! operative search radius respectively.

/// Minimum J−Ks colour shared by every campaign.
pub const MIN_COLOR: f64 = 0.5;

/// Derived quantities a campaign rule reads for one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarObservables {
    /// J − Ks.
    pub color: f64,
    /// 2MASS H magnitude.
    pub hmag: f64,
    /// Synthetic V magnitude.
    pub vmag: f64,
    /// Module index within 1.0°, `None` off every module.
    pub ccd_narrow: Option<u8>,
    /// Module index within the operative radius, `None` off every module.
    pub ccd_wide: Option<u8>,
}

/// A campaign's selection cut.
pub type CampaignRule = fn(&StarObservables) -> bool;

/// Look up the cut for `campaign`. `None` means the campaign selects nothing.
pub fn campaign_rule(campaign: i64) -> Option<CampaignRule> {
    let rule: CampaignRule = match campaign {
        1 => campaign_1,
        2 => campaign_2,
        3 => campaign_3,
        4 => campaign_4,
        5 | 6 => campaigns_5_6,
        7 => campaign_7,
        8 => campaign_8,
        10 => campaign_10,
        11 => campaign_11,
        12 => campaign_12,
        13 => campaign_13,
        14 | 16 => campaigns_14_16,
        15 => campaign_15,
        17 => campaign_17,
        19 => campaign_19,
        // Campaign 9 never had a cut recorded and campaign 18 selected nothing.
        _ => return None,
    };
    Some(rule)
}

/// Apply the cut for `campaign`, treating a missing rule as "not selected".
#[inline]
pub fn passes_campaign_rule(campaign: i64, star: &StarObservables) -> bool {
    campaign_rule(campaign).is_some_and(|rule| rule(star))
}

/// `lo ≤ x < hi`. False for NaN.
#[inline]
pub fn in_range(x: f64, lo: f64, hi: f64) -> bool {
    x >= lo && x < hi
}

#[inline]
fn module_in(module: Option<u8>, set: &[u8]) -> bool {
    module.is_some_and(|m| set.contains(&m))
}

#[inline]
fn red(s: &StarObservables) -> bool {
    s.color >= MIN_COLOR
}

#[inline]
fn on_wide_field(s: &StarObservables) -> bool {
    s.ccd_wide.is_some()
}

#[inline]
fn on_wide_field_except_module_1(s: &StarObservables) -> bool {
    s.ccd_wide.is_some() && s.ccd_wide != Some(1)
}

/// Faint extension for marginally red stars used by campaigns 8 and 10.
#[inline]
fn faint_extension(s: &StarObservables, v_max: f64) -> bool {
    in_range(s.color, MIN_COLOR, 0.7) && in_range(s.vmag, 14.5, v_max)
}

fn campaign_1(s: &StarObservables) -> bool {
    red(s) && in_range(s.hmag, 7.0, 12.927) && on_wide_field(s)
}

fn campaign_2(s: &StarObservables) -> bool {
    red(s) && in_range(s.hmag, 7.0, 11.5) && module_in(s.ccd_narrow, &[17, 12, 6, 14, 10])
}

fn campaign_3(s: &StarObservables) -> bool {
    let on_module = red(s) && in_range(s.hmag, 7.0, 12.0) && s.ccd_narrow.is_some();
    let off_module = red(s) && in_range(s.hmag, 7.0, 10.929) && s.ccd_narrow.is_none();
    on_module || off_module
}

fn campaign_4(s: &StarObservables) -> bool {
    red(s) && in_range(s.vmag, 9.0, 13.447) && on_wide_field(s)
}

fn campaigns_5_6(s: &StarObservables) -> bool {
    red(s) && in_range(s.vmag, 9.0, 15.0) && on_wide_field(s)
}

fn campaign_7(s: &StarObservables) -> bool {
    let bright = red(s) && in_range(s.vmag, 9.0, 14.5);
    let faint = red(s) && in_range(s.vmag, 14.276, 14.5);
    (bright && s.ccd_narrow == Some(17))
        || (bright && s.ccd_narrow == Some(6))
        || (faint && s.ccd_narrow == Some(14))
}

fn campaign_8(s: &StarObservables) -> bool {
    let main = red(s) && in_range(s.vmag, 9.0, 14.5) && on_wide_field(s);
    let extension = faint_extension(s, 14.580) && on_wide_field(s);
    main || extension
}

fn campaign_10(s: &StarObservables) -> bool {
    let main = red(s) && in_range(s.vmag, 9.0, 14.5) && on_wide_field_except_module_1(s);
    let extension = faint_extension(s, 15.577) && on_wide_field_except_module_1(s);
    main || extension
}

fn campaign_11(s: &StarObservables) -> bool {
    let v_max = match s.ccd_narrow {
        Some(3) => 15.0,
        Some(2) => 14.5,
        Some(8) => 14.175,
        _ => return false,
    };
    red(s) && in_range(s.vmag, 9.0, v_max)
}

fn campaign_12(s: &StarObservables) -> bool {
    red(s) && in_range(s.vmag, 9.0, 16.0) && on_wide_field_except_module_1(s)
}

fn campaign_13(s: &StarObservables) -> bool {
    let v_max = match s.ccd_narrow {
        Some(3) => 15.0,
        Some(8) => 14.5,
        Some(0 | 13 | 7 | 9 | 4 | 12) => 14.0,
        Some(14) => 12.818,
        _ => return false,
    };
    red(s) && in_range(s.vmag, 9.0, v_max)
}

fn campaigns_14_16(s: &StarObservables) -> bool {
    red(s) && in_range(s.vmag, 9.0, 15.0) && on_wide_field_except_module_1(s)
}

fn campaign_15(s: &StarObservables) -> bool {
    let v_max = match s.ccd_narrow {
        Some(3) => 15.5,
        Some(8) => 15.0,
        Some(13 | 7 | 9 | 4 | 12 | 14 | 2) => 14.5,
        Some(5) => 13.838,
        _ => return false,
    };
    red(s) && in_range(s.vmag, 9.0, v_max)
}

fn campaign_17(s: &StarObservables) -> bool {
    let on_centre = module_in(s.ccd_narrow, &[8, 3]);
    let centre = red(s) && in_range(s.vmag, 9.0, 16.0) && on_centre;
    let elsewhere =
        red(s) && in_range(s.vmag, 9.0, 12.414) && !on_centre && s.ccd_wide != Some(1);
    centre || elsewhere
}

fn campaign_19(s: &StarObservables) -> bool {
    red(s) && in_range(s.vmag, 9.0, 14.8) && on_wide_field_except_module_1(s)
}
