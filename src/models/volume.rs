//! Loblolly pine green-ton equations.
//!
//! - PMRC 1990 (Univ. of Georgia, Borders et al.), Lower and Upper Coastal Plain.
//! - Baldwin & Feduccia, USDA Southern Forest Experiment Station SO-236 (1987),
//!   West Gulf region.
//!
//! All functions take outside-bark diameters in inches and heights in feet,
//! and return US short tons (2000 lb) of green wood.

use serde::{Deserialize, Serialize};

use crate::error::YieldError;

/// Default merchantable top diameter outside bark, in inches.
pub const DEFAULT_MERCH_TOP: f64 = 3.0;

/// Default stand age in years for the Baldwin stem model.
pub const DEFAULT_STAND_AGE: u32 = 15;

const POUNDS_PER_TON: f64 = 2000.0;
const BREAST_HEIGHT_FT: f64 = 4.5;

/// Coefficients for the PMRC green weight equation:
///
/// `tons = (k1 * dbh^a * ht^b - k2 * (top^c / dbh^d) * (ht - 4.5)) / 2000`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmrcCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub k1: f64,
    pub k2: f64,
}

impl PmrcCoefficients {
    /// Lower Coastal Plain parameters.
    pub const LOWER_COASTAL_PLAIN: Self = Self {
        a: 1.829983,
        b: 1.247669,
        c: 3.523107,
        d: 1.449947,
        k1: 0.0740959,
        k2: 0.123329,
    };

    /// Upper Coastal Plain parameters.
    pub const UPPER_COASTAL_PLAIN: Self = Self {
        a: 1.917146,
        b: 1.038452,
        c: 3.589155,
        d: 1.413061,
        k1: 0.141534,
        k2: 0.0932063,
    };

    /// Evaluate the equation. The result is not clamped and can be negative
    /// when the top is large relative to the stem.
    pub fn green_tons(&self, dbh: f64, tot_ht: f64, m_top: f64) -> Result<f64, YieldError> {
        require_positive("dbh", dbh)?;
        require_positive("total height", tot_ht)?;
        require_positive("merchantable top", m_top)?;

        let stem = self.k1 * dbh.powf(self.a) * tot_ht.powf(self.b);
        let top = self.k2 * (m_top.powf(self.c) / dbh.powf(self.d)) * (tot_ht - BREAST_HEIGHT_FT);
        require_finite_result("PMRC green tons", (stem - top) / POUNDS_PER_TON)
    }
}

/// Coefficients for the Baldwin & Feduccia merchantable ratio:
///
/// `ratio = exp(p1 * (top^p2 / dbh^p3))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MerchRatioCoefficients {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
}

impl MerchRatioCoefficients {
    pub const UNTHINNED: Self = Self {
        p1: -1.153726,
        p2: 4.911545,
        p3: 4.723876,
    };

    pub const THINNED: Self = Self {
        p1: -2.058914,
        p2: 5.124867,
        p3: 5.170415,
    };

    /// Evaluate the ratio. Not clamped to (0, 1].
    pub fn ratio(&self, dbh: f64, m_top: f64) -> Result<f64, YieldError> {
        require_positive("dbh", dbh)?;
        require_positive("merchantable top", m_top)?;

        let ratio = (self.p1 * (m_top.powf(self.p2) / dbh.powf(self.p3))).exp();
        require_finite_result("merchantable ratio", ratio)
    }
}

/// Coefficients for the Baldwin & Feduccia total stem weight:
///
/// `tons = exp(q1 + q2*ln(dbh) + q3*ln(ht) + q4*age^2) / 2000`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaldwinStemCoefficients {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl BaldwinStemCoefficients {
    pub const WEST_GULF: Self = Self {
        q1: -2.06033,
        q2: 1.93926,
        q3: 1.05077,
        q4: 0.000061,
    };

    pub fn total_tons(&self, dbh: f64, tot_ht: f64, age: u32) -> Result<f64, YieldError> {
        require_positive("dbh", dbh)?;
        require_positive("total height", tot_ht)?;
        require_positive_age(age)?;

        let age = f64::from(age);
        let exponent = self.q1 + self.q2 * dbh.ln() + self.q3 * tot_ht.ln() + self.q4 * (age * age);
        require_finite_result("total stem tons", exponent.exp() / POUNDS_PER_TON)
    }
}

/// Green tons (wood + bark) for loblolly pine in the Lower Coastal Plain.
pub fn pmrc_lcp_tons(dbh: f64, tot_ht: f64, m_top: f64) -> Result<f64, YieldError> {
    PmrcCoefficients::LOWER_COASTAL_PLAIN.green_tons(dbh, tot_ht, m_top)
}

/// Green tons (wood + bark) for loblolly pine in the Upper Coastal Plain.
pub fn pmrc_ucp_tons(dbh: f64, tot_ht: f64, m_top: f64) -> Result<f64, YieldError> {
    PmrcCoefficients::UPPER_COASTAL_PLAIN.green_tons(dbh, tot_ht, m_top)
}

/// Proportion of stem weight below `m_top` in an unthinned stand.
pub fn baldwin_merch_ratio_unthinned(dbh: f64, m_top: f64) -> Result<f64, YieldError> {
    MerchRatioCoefficients::UNTHINNED.ratio(dbh, m_top)
}

/// Proportion of stem weight below `m_top` in a thinned stand.
pub fn baldwin_merch_ratio_thinned(dbh: f64, m_top: f64) -> Result<f64, YieldError> {
    MerchRatioCoefficients::THINNED.ratio(dbh, m_top)
}

/// Pick the thinned or unthinned ratio curve.
pub fn baldwin_merch_ratio(dbh: f64, m_top: f64, thinned: bool) -> Result<f64, YieldError> {
    if thinned {
        baldwin_merch_ratio_thinned(dbh, m_top)
    } else {
        baldwin_merch_ratio_unthinned(dbh, m_top)
    }
}

/// Proportion of the stem between two top diameters, e.g. the pulpwood
/// section between a 6" sawtimber top (`lower_top`) and a 3" pulp top
/// (`upper_top`).
pub fn baldwin_section_ratio(
    dbh: f64,
    lower_top: f64,
    upper_top: f64,
    thinned: bool,
) -> Result<f64, YieldError> {
    if lower_top < upper_top {
        return Err(YieldError::InvalidMeasurement(format!(
            "lower top ({lower_top}) must be at least the upper top ({upper_top})"
        )));
    }
    let upper = baldwin_merch_ratio(dbh, upper_top, thinned)?;
    let lower = baldwin_merch_ratio(dbh, lower_top, thinned)?;
    Ok(upper - lower)
}

/// Whole-stem green tons for the West Gulf region, before any merchantable
/// top is applied.
pub fn baldwin_total_stem_tons(dbh: f64, tot_ht: f64, age: u32) -> Result<f64, YieldError> {
    BaldwinStemCoefficients::WEST_GULF.total_tons(dbh, tot_ht, age)
}

/// Merchantable stem green tons for the West Gulf region.
///
/// Thinning history changes stem form, so `thinned` selects which
/// merchantable ratio curve is applied to the whole-stem weight.
pub fn baldwin_stem_tons(
    dbh: f64,
    tot_ht: f64,
    age: u32,
    thinned: bool,
    top: f64,
) -> Result<f64, YieldError> {
    let ratio = baldwin_merch_ratio(dbh, top, thinned)?;
    let tons = baldwin_total_stem_tons(dbh, tot_ht, age)?;
    require_finite_result("stem tons", tons * ratio)
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), YieldError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(YieldError::InvalidMeasurement(format!(
            "{name} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn require_positive_age(age: u32) -> Result<(), YieldError> {
    if age == 0 {
        return Err(YieldError::InvalidMeasurement(
            "age must be positive, got 0".to_string(),
        ));
    }
    Ok(())
}

// Positive inputs can still overflow or underflow into 0/0 or inf - inf.
fn require_finite_result(name: &str, value: f64) -> Result<f64, YieldError> {
    if !value.is_finite() {
        return Err(YieldError::InvalidMeasurement(format!(
            "{name} is not finite ({value}); inputs are outside the model's numeric range"
        )));
    }
    Ok(value)
}
