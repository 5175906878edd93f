use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

use crate::video::ScoredVideo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Absolute,
    Relative,
    Combined,
    Ratio,
    #[default]
    Views,
}

impl SortKey {
    /// Unknown keys fall back to view count.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "absolute" => SortKey::Absolute,
            "relative" => SortKey::Relative,
            "combined" => SortKey::Combined,
            "ratio" => SortKey::Ratio,
            _ => SortKey::Views,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Absolute => "absolute",
            SortKey::Relative => "relative",
            SortKey::Combined => "combined",
            SortKey::Ratio => "ratio",
            SortKey::Views => "views",
        }
    }
}

/// Accepts the same spellings as `from_str`, so wire requests with an
/// unknown or null key sort by views like the CLI does.
impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(SortKey::from_str).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedWeights {
    pub absolute: f64,
    pub relative: f64,
}

impl Default for CombinedWeights {
    fn default() -> Self {
        Self {
            absolute: 0.6,
            relative: 0.4,
        }
    }
}

impl CombinedWeights {
    pub fn combined_score(&self, video: &ScoredVideo) -> f64 {
        self.absolute * video.absolute_score.unwrap_or(0.0)
            + self.relative * video.relative_score.unwrap_or(0.0)
    }
}

pub fn sort_by_dual_scoring<'a, I>(videos: I, key: SortKey) -> Vec<&'a ScoredVideo>
where
    I: IntoIterator<Item = &'a ScoredVideo>,
{
    sort_by_dual_scoring_with(videos, key, &CombinedWeights::default())
}

/// Descending, stable sort into a new vector; the input is left untouched.
pub fn sort_by_dual_scoring_with<'a, I>(
    videos: I,
    key: SortKey,
    weights: &CombinedWeights,
) -> Vec<&'a ScoredVideo>
where
    I: IntoIterator<Item = &'a ScoredVideo>,
{
    let mut sorted: Vec<&ScoredVideo> = videos.into_iter().collect();
    let sort_value = |video: &ScoredVideo| -> f64 {
        match key {
            SortKey::Absolute => video.absolute_score.unwrap_or(0.0),
            SortKey::Relative => video.relative_score.unwrap_or(0.0),
            SortKey::Combined => weights.combined_score(video),
            SortKey::Ratio => video.relative_ratio.unwrap_or(0.0),
            SortKey::Views => video.view_count.unwrap_or(0) as f64,
        }
    };

    sorted.sort_by(|a, b| {
        sort_value(b)
            .partial_cmp(&sort_value(a))
            .unwrap_or(Ordering::Equal)
    });
    sorted
}
