use serde::{Deserialize, Serialize};

use crate::scoring::{
    classify_absolute, classify_relative, synthesize, AbsoluteTier, Insight, RelativeTier,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub engagement_rate: f64,
    pub like_rate: f64,
    pub comment_rate: f64,
}

impl PerformanceMetrics {
    pub fn from_counts(views: u64, likes: u64, comments: u64) -> Self {
        if views == 0 {
            return Self::default();
        }
        let views = views as f64;
        Self {
            engagement_rate: (likes as f64 + comments as f64) / views,
            like_rate: likes as f64 / views,
            comment_rate: comments as f64 / views,
        }
    }
}

/// A fetched video with the scores an upstream scorer attached to it.
///
/// Tiers and the insight category are not stored: they are recomputed from
/// the scores every time, so a tier can never disagree with its score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoredVideo {
    pub id: String,
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub absolute_score: Option<f64>,
    pub relative_score: Option<f64>,
    pub relative_ratio: Option<f64>,
    pub performance_metrics: Option<PerformanceMetrics>,
}

impl ScoredVideo {
    pub fn new(
        id: impl Into<String>,
        video_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            video_id: video_id.into(),
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    pub fn with_scores(mut self, absolute_score: f64, relative_score: f64) -> Self {
        self.absolute_score = Some(absolute_score);
        self.relative_score = Some(relative_score);
        self
    }

    pub fn absolute_tier(&self) -> Option<AbsoluteTier> {
        self.absolute_score.map(classify_absolute)
    }

    pub fn relative_tier(&self) -> Option<RelativeTier> {
        self.relative_score.map(classify_relative)
    }

    pub fn insight(&self) -> Option<Insight> {
        match (self.absolute_score, self.relative_score) {
            (Some(absolute), Some(relative)) => Some(synthesize(absolute, relative)),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<PerformanceMetrics> {
        if let Some(metrics) = &self.performance_metrics {
            return Some(metrics.clone());
        }
        self.view_count.map(|views| {
            PerformanceMetrics::from_counts(
                views,
                self.like_count.unwrap_or(0),
                self.comment_count.unwrap_or(0),
            )
        })
    }
}

/// Serialized view of a video with its derived tiers attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    #[serde(flatten)]
    pub video: ScoredVideo,
    pub absolute_tier: Option<AbsoluteTier>,
    pub relative_tier: Option<RelativeTier>,
    pub insight: Option<Insight>,
}

impl From<&ScoredVideo> for VideoView {
    fn from(video: &ScoredVideo) -> Self {
        Self {
            video: video.clone(),
            absolute_tier: video.absolute_tier(),
            relative_tier: video.relative_tier(),
            insight: video.insight(),
        }
    }
}
