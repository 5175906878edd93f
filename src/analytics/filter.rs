use serde::{Deserialize, Serialize};

use crate::scoring::{AbsoluteTier, InsightCategory, RelativeTier};
use crate::video::ScoredVideo;

/// Predicates combined with AND. Empty lists and `None` bounds do not
/// constrain anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DualScoringFilters {
    pub absolute_tiers: Vec<AbsoluteTier>,
    pub relative_tiers: Vec<RelativeTier>,
    pub min_absolute_score: Option<f64>,
    pub min_relative_score: Option<f64>,
    pub insight_categories: Vec<InsightCategory>,
}

impl DualScoringFilters {
    pub fn is_empty(&self) -> bool {
        self.absolute_tiers.is_empty()
            && self.relative_tiers.is_empty()
            && self.min_absolute_score.is_none()
            && self.min_relative_score.is_none()
            && self.insight_categories.is_empty()
    }

    /// A video missing the field a predicate needs fails that predicate.
    pub fn matches(&self, video: &ScoredVideo) -> bool {
        if !self.absolute_tiers.is_empty() {
            match video.absolute_tier() {
                Some(tier) if self.absolute_tiers.contains(&tier) => {}
                _ => return false,
            }
        }

        if !self.relative_tiers.is_empty() {
            match video.relative_tier() {
                Some(tier) if self.relative_tiers.contains(&tier) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_absolute_score {
            match video.absolute_score {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_relative_score {
            match video.relative_score {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }

        if !self.insight_categories.is_empty() {
            match video.insight() {
                Some(insight) if self.insight_categories.contains(&insight.category) => {}
                _ => return false,
            }
        }

        true
    }
}

pub fn filter_by_dual_scoring<'a, I>(
    videos: I,
    filters: &DualScoringFilters,
) -> Vec<&'a ScoredVideo>
where
    I: IntoIterator<Item = &'a ScoredVideo>,
{
    if filters.is_empty() {
        return videos.into_iter().collect();
    }
    videos
        .into_iter()
        .filter(|video| filters.matches(video))
        .collect()
}
