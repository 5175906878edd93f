use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Channel-independent tier, rated against fixed universal thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsoluteTier {
    YoutubeTop,
    YoutubeHigh,
    YoutubeMedium,
    YoutubeNormal,
    NeedsImprovement,
}

/// Tier relative to the video's own channel median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelativeTier {
    ChannelStar,
    AboveAverage,
    NearAverage,
    BelowAverage,
}

/// One row of a tier table. `range.0` is inclusive and `range.1` exclusive.
/// The displayed range stops at [0, 100], but membership does not: the top
/// tier takes everything above its minimum and the lowest tier everything
/// below its maximum (NaN included), the same buckets `classify_*` picks.
#[derive(Debug, Clone, Serialize)]
pub struct TierInfo<T> {
    pub tier: T,
    pub label: &'static str,
    pub color: &'static str,
    pub range: (f64, f64),
}

impl<T: Copy> TierInfo<T> {
    pub fn contains(&self, score: f64) -> bool {
        let (min, max) = self.range;
        match (min <= SCORE_MIN, max >= SCORE_MAX) {
            (_, true) => score >= min,
            (true, false) => score < max || score.is_nan(),
            (false, false) => score >= min && score < max,
        }
    }
}

pub const ABSOLUTE_TIERS: [AbsoluteTier; 5] = [
    AbsoluteTier::YoutubeTop,
    AbsoluteTier::YoutubeHigh,
    AbsoluteTier::YoutubeMedium,
    AbsoluteTier::YoutubeNormal,
    AbsoluteTier::NeedsImprovement,
];

pub const RELATIVE_TIERS: [RelativeTier; 4] = [
    RelativeTier::ChannelStar,
    RelativeTier::AboveAverage,
    RelativeTier::NearAverage,
    RelativeTier::BelowAverage,
];

impl AbsoluteTier {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "youtube-top" | "top" => Some(AbsoluteTier::YoutubeTop),
            "youtube-high" | "high" => Some(AbsoluteTier::YoutubeHigh),
            "youtube-medium" | "medium" => Some(AbsoluteTier::YoutubeMedium),
            "youtube-normal" | "normal" => Some(AbsoluteTier::YoutubeNormal),
            "needs-improvement" => Some(AbsoluteTier::NeedsImprovement),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            AbsoluteTier::YoutubeTop => "youtube-top",
            AbsoluteTier::YoutubeHigh => "youtube-high",
            AbsoluteTier::YoutubeMedium => "youtube-medium",
            AbsoluteTier::YoutubeNormal => "youtube-normal",
            AbsoluteTier::NeedsImprovement => "needs-improvement",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AbsoluteTier::YoutubeTop => "YouTube Top",
            AbsoluteTier::YoutubeHigh => "YouTube High",
            AbsoluteTier::YoutubeMedium => "YouTube Medium",
            AbsoluteTier::YoutubeNormal => "YouTube Normal",
            AbsoluteTier::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            AbsoluteTier::YoutubeTop => "#7c3aed",
            AbsoluteTier::YoutubeHigh => "#2563eb",
            AbsoluteTier::YoutubeMedium => "#16a34a",
            AbsoluteTier::YoutubeNormal => "#ca8a04",
            AbsoluteTier::NeedsImprovement => "#dc2626",
        }
    }

    pub fn range(self) -> (f64, f64) {
        match self {
            AbsoluteTier::YoutubeTop => (85.0, SCORE_MAX),
            AbsoluteTier::YoutubeHigh => (70.0, 85.0),
            AbsoluteTier::YoutubeMedium => (55.0, 70.0),
            AbsoluteTier::YoutubeNormal => (40.0, 55.0),
            AbsoluteTier::NeedsImprovement => (SCORE_MIN, 40.0),
        }
    }

    pub fn info(self) -> TierInfo<AbsoluteTier> {
        TierInfo {
            tier: self,
            label: self.label(),
            color: self.color(),
            range: self.range(),
        }
    }
}

impl RelativeTier {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "channel-star" | "star" => Some(RelativeTier::ChannelStar),
            "above-average" | "above" => Some(RelativeTier::AboveAverage),
            "near-average" | "near" => Some(RelativeTier::NearAverage),
            "below-average" | "below" => Some(RelativeTier::BelowAverage),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            RelativeTier::ChannelStar => "channel-star",
            RelativeTier::AboveAverage => "above-average",
            RelativeTier::NearAverage => "near-average",
            RelativeTier::BelowAverage => "below-average",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RelativeTier::ChannelStar => "Channel Star",
            RelativeTier::AboveAverage => "Above Average",
            RelativeTier::NearAverage => "Near Average",
            RelativeTier::BelowAverage => "Below Average",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RelativeTier::ChannelStar => "#db2777",
            RelativeTier::AboveAverage => "#0891b2",
            RelativeTier::NearAverage => "#64748b",
            RelativeTier::BelowAverage => "#ea580c",
        }
    }

    pub fn range(self) -> (f64, f64) {
        match self {
            RelativeTier::ChannelStar => (70.0, SCORE_MAX),
            RelativeTier::AboveAverage => (50.0, 70.0),
            RelativeTier::NearAverage => (30.0, 50.0),
            RelativeTier::BelowAverage => (SCORE_MIN, 30.0),
        }
    }

    pub fn info(self) -> TierInfo<RelativeTier> {
        TierInfo {
            tier: self,
            label: self.label(),
            color: self.color(),
            range: self.range(),
        }
    }
}

pub fn absolute_tier_table() -> Vec<TierInfo<AbsoluteTier>> {
    ABSOLUTE_TIERS.iter().map(|tier| tier.info()).collect()
}

pub fn relative_tier_table() -> Vec<TierInfo<RelativeTier>> {
    RELATIVE_TIERS.iter().map(|tier| tier.info()).collect()
}

/// Scores outside [0, 100] are not rejected; they land in the lowest or
/// highest bucket. NaN lands in the lowest.
pub fn classify_absolute(score: f64) -> AbsoluteTier {
    if score >= 85.0 {
        AbsoluteTier::YoutubeTop
    } else if score >= 70.0 {
        AbsoluteTier::YoutubeHigh
    } else if score >= 55.0 {
        AbsoluteTier::YoutubeMedium
    } else if score >= 40.0 {
        AbsoluteTier::YoutubeNormal
    } else {
        AbsoluteTier::NeedsImprovement
    }
}

pub fn classify_relative(score: f64) -> RelativeTier {
    if score >= 70.0 {
        RelativeTier::ChannelStar
    } else if score >= 50.0 {
        RelativeTier::AboveAverage
    } else if score >= 30.0 {
        RelativeTier::NearAverage
    } else {
        RelativeTier::BelowAverage
    }
}
