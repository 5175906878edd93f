use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::{AbsoluteTier, InsightCategory, RelativeTier, ABSOLUTE_TIERS, RELATIVE_TIERS};
use crate::video::ScoredVideo;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualScoringStats {
    pub total_with_scores: usize,
    pub average_absolute_score: f64,
    pub average_relative_score: f64,
    /// Every absolute tier is present, zero when unused.
    pub absolute_tier_distribution: BTreeMap<AbsoluteTier, usize>,
    /// Every relative tier is present, zero when unused.
    pub relative_tier_distribution: BTreeMap<RelativeTier, usize>,
    /// Only categories that occur.
    pub insight_distribution: BTreeMap<InsightCategory, usize>,
}

impl Default for DualScoringStats {
    fn default() -> Self {
        Self {
            total_with_scores: 0,
            average_absolute_score: 0.0,
            average_relative_score: 0.0,
            absolute_tier_distribution: ABSOLUTE_TIERS.iter().map(|tier| (*tier, 0)).collect(),
            relative_tier_distribution: RELATIVE_TIERS.iter().map(|tier| (*tier, 0)).collect(),
            insight_distribution: BTreeMap::new(),
        }
    }
}

/// Aggregates over videos carrying both scores; the rest are ignored.
pub fn calculate_stats<'a, I>(videos: I) -> DualScoringStats
where
    I: IntoIterator<Item = &'a ScoredVideo>,
{
    let mut stats = DualScoringStats::default();
    let mut absolute_total = 0.0;
    let mut relative_total = 0.0;

    for video in videos {
        let (Some(absolute), Some(relative)) = (video.absolute_score, video.relative_score) else {
            continue;
        };

        stats.total_with_scores += 1;
        absolute_total += absolute;
        relative_total += relative;

        if let Some(tier) = video.absolute_tier() {
            *stats.absolute_tier_distribution.entry(tier).or_insert(0) += 1;
        }
        if let Some(tier) = video.relative_tier() {
            *stats.relative_tier_distribution.entry(tier).or_insert(0) += 1;
        }
        if let Some(insight) = video.insight() {
            *stats.insight_distribution.entry(insight.category).or_insert(0) += 1;
        }
    }

    if stats.total_with_scores > 0 {
        let count = stats.total_with_scores as f64;
        stats.average_absolute_score = round_one_decimal(absolute_total / count);
        stats.average_relative_score = round_one_decimal(relative_total / count);
    }

    stats
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
