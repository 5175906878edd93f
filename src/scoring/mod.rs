pub mod insight;
pub mod tier;

pub use insight::{synthesize, Insight, InsightCategory};
pub use tier::{
    absolute_tier_table, classify_absolute, classify_relative, relative_tier_table, AbsoluteTier,
    RelativeTier, TierInfo, ABSOLUTE_TIERS, RELATIVE_TIERS,
};
