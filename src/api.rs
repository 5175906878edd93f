use serde::{Deserialize, Serialize};
use channel_insights::keywords::{AirtableRecord, FieldDefinition};
use channel_insights::scoring::{
    absolute_tier_table, relative_tier_table, AbsoluteTier, RelativeTier, TierInfo,
};
use channel_insights::{AnalysisRequest, ScoredVideo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnalyzeRequest {
    pub videos: Vec<ScoredVideo>,
    #[serde(flatten)]
    pub analysis: AnalysisRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeywordRequest {
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub selected_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTierTables {
    pub absolute: Vec<TierInfo<AbsoluteTier>>,
    pub relative: Vec<TierInfo<RelativeTier>>,
}

impl ApiTierTables {
    pub fn current() -> Self {
        Self {
            absolute: absolute_tier_table(),
            relative: relative_tier_table(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiCleared {
    pub removed: usize,
}
