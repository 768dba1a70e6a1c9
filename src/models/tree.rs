use serde::{Deserialize, Serialize};

use super::volume::{
    baldwin_merch_ratio, baldwin_stem_tons, pmrc_lcp_tons, pmrc_ucp_tons, require_positive,
    require_positive_age, DEFAULT_MERCH_TOP, DEFAULT_STAND_AGE,
};
use crate::error::YieldError;

/// Regional green-ton equation to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemModel {
    /// PMRC 1990, Lower Coastal Plain
    PmrcLowerCoastal,
    /// PMRC 1990, Upper Coastal Plain
    PmrcUpperCoastal,
    /// Baldwin & Feduccia 1987, West Gulf
    BaldwinWestGulf,
}

impl StemModel {
    pub const ALL: [StemModel; 3] = [
        StemModel::PmrcLowerCoastal,
        StemModel::PmrcUpperCoastal,
        StemModel::BaldwinWestGulf,
    ];

    /// Published source of the equation.
    pub fn citation(&self) -> &'static str {
        match self {
            StemModel::PmrcLowerCoastal | StemModel::PmrcUpperCoastal => {
                "PMRC 1990, Univ. of Georgia (Borders et al.)"
            }
            StemModel::BaldwinWestGulf => "Baldwin & Feduccia, USDA SO-236 (1987)",
        }
    }
}

impl std::fmt::Display for StemModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StemModel::PmrcLowerCoastal => write!(f, "PMRC Lower Coastal Plain"),
            StemModel::PmrcUpperCoastal => write!(f, "PMRC Upper Coastal Plain"),
            StemModel::BaldwinWestGulf => write!(f, "Baldwin West Gulf"),
        }
    }
}

impl std::str::FromStr for StemModel {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lcp" | "pmrc-lcp" | "lower" => Ok(StemModel::PmrcLowerCoastal),
            "ucp" | "pmrc-ucp" | "upper" => Ok(StemModel::PmrcUpperCoastal),
            "baldwin" | "wg" | "west-gulf" => Ok(StemModel::BaldwinWestGulf),
            _ => Err(YieldError::ParseError(format!("Unknown stem model: '{s}'"))),
        }
    }
}

fn default_merch_top() -> f64 {
    DEFAULT_MERCH_TOP
}

fn default_age() -> u32 {
    DEFAULT_STAND_AGE
}

fn default_thinned() -> bool {
    true
}

/// Field measurements for a single loblolly pine stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeMeasurement {
    /// Diameter outside bark at 4.5 ft, in inches
    pub dbh: f64,
    /// Total height in feet
    pub total_height: f64,
    /// Merchantable top diameter outside bark, in inches
    #[serde(default = "default_merch_top")]
    pub merch_top: f64,
    /// Stand age in years (Baldwin model only)
    #[serde(default = "default_age")]
    pub age: u32,
    /// Whether the stand has been thinned (Baldwin model only)
    #[serde(default = "default_thinned")]
    pub thinned: bool,
}

impl TreeMeasurement {
    /// A measurement with the default 3" top, age 15 and thinned stand.
    pub fn new(dbh: f64, total_height: f64) -> Self {
        Self {
            dbh,
            total_height,
            merch_top: DEFAULT_MERCH_TOP,
            age: DEFAULT_STAND_AGE,
            thinned: true,
        }
    }

    /// Check that every input lies inside the model domain.
    pub fn validate(&self) -> Result<(), YieldError> {
        require_positive("dbh", self.dbh)?;
        require_positive("total height", self.total_height)?;
        require_positive("merchantable top", self.merch_top)?;
        require_positive_age(self.age)
    }

    /// Green tons for this stem under the given model.
    pub fn green_tons(&self, model: StemModel) -> Result<f64, YieldError> {
        match model {
            StemModel::PmrcLowerCoastal => pmrc_lcp_tons(self.dbh, self.total_height, self.merch_top),
            StemModel::PmrcUpperCoastal => pmrc_ucp_tons(self.dbh, self.total_height, self.merch_top),
            StemModel::BaldwinWestGulf => baldwin_stem_tons(
                self.dbh,
                self.total_height,
                self.age,
                self.thinned,
                self.merch_top,
            ),
        }
    }

    /// Evaluate a model and keep the merchantable ratio alongside the tons.
    ///
    /// Only the inputs the chosen model reads are checked; call
    /// [`TreeMeasurement::validate`] to check all of them.
    pub fn estimate(&self, model: StemModel) -> Result<YieldEstimate, YieldError> {
        let green_tons = self.green_tons(model)?;
        let merch_ratio = match model {
            StemModel::BaldwinWestGulf => Some(baldwin_merch_ratio(
                self.dbh,
                self.merch_top,
                self.thinned,
            )?),
            _ => None,
        };
        Ok(YieldEstimate {
            model,
            green_tons,
            merch_ratio,
        })
    }
}

/// Result of evaluating one model against one stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub model: StemModel,
    pub green_tons: f64,
    /// Only the Baldwin model separates out a merchantable ratio
    pub merch_ratio: Option<f64>,
}
