pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod keywords;
pub mod scoring;
pub mod store;
pub mod synthetic;
pub mod video;

use serde::{Deserialize, Serialize};

use crate::analytics::{
    calculate_stats, filter_by_dual_scoring, sort_by_dual_scoring_with, CombinedWeights,
    DualScoringFilters, DualScoringStats, SortKey,
};
use crate::error::{Error, Result};
use crate::keywords::{
    extract_titles_with_keywords, AirtableRecord, FieldDefinition, KeywordFilter,
};
pub use crate::video::{PerformanceMetrics, ScoredVideo, VideoView};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub filters: DualScoringFilters,
    pub sort: SortKey,
    pub limit: Option<usize>,
}

impl AnalysisRequest {
    /// Rejects a zero `limit` and non-finite score bounds.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(Error::InvalidInput("limit must be at least 1".to_string()));
        }
        let invalid_bound = [self.filters.min_absolute_score, self.filters.min_relative_score]
            .into_iter()
            .flatten()
            .any(|value| !value.is_finite());
        if invalid_bound {
            return Err(Error::InvalidInput(
                "minimum scores must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total: usize,
    pub matched: usize,
    pub sort: SortKey,
    /// Computed over the matched videos, before `limit` is applied.
    pub stats: DualScoringStats,
    pub videos: Vec<VideoView>,
}

/// Filter, sort, aggregate and truncate in one pass over a channel's videos.
pub fn analyze_videos(
    videos: &[ScoredVideo],
    request: &AnalysisRequest,
    weights: &CombinedWeights,
) -> AnalysisReport {
    let matched = filter_by_dual_scoring(videos, &request.filters);
    let stats = calculate_stats(matched.iter().copied());
    let sorted = sort_by_dual_scoring_with(matched.iter().copied(), request.sort, weights);
    let limit = request.limit.unwrap_or(sorted.len());

    tracing::debug!(
        total = videos.len(),
        matched = matched.len(),
        sort = request.sort.label(),
        "analyzed videos"
    );

    AnalysisReport {
        total: videos.len(),
        matched: matched.len(),
        sort: request.sort,
        stats,
        videos: sorted.into_iter().take(limit).map(VideoView::from).collect(),
    }
}

/// Keyword view for a table. Field definitions are inferred from the records
/// when none are given.
pub fn keyword_view(
    records: &[AirtableRecord],
    fields: &[FieldDefinition],
    selected: Vec<String>,
) -> KeywordFilter {
    let inferred;
    let fields = if fields.is_empty() {
        inferred = FieldDefinition::infer_from_records(records);
        inferred.as_slice()
    } else {
        fields
    };
    let titles = extract_titles_with_keywords(records, fields);
    KeywordFilter::compute(&titles, selected)
}
