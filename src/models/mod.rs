mod tree;
mod volume;

pub use tree::{StemModel, TreeMeasurement, YieldEstimate};
pub use volume::{
    baldwin_merch_ratio, baldwin_merch_ratio_thinned, baldwin_merch_ratio_unthinned,
    baldwin_section_ratio, baldwin_stem_tons, baldwin_total_stem_tons, pmrc_lcp_tons,
    pmrc_ucp_tons, BaldwinStemCoefficients, MerchRatioCoefficients, PmrcCoefficients,
    DEFAULT_MERCH_TOP, DEFAULT_STAND_AGE,
};
