use serde::{Deserialize, Serialize};

const ABSOLUTE_THRESHOLD: f64 = 60.0;
const RELATIVE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightCategory {
    StarPerformer,
    ConsistentQuality,
    HiddenGem,
    NeedsImprovement,
}

impl InsightCategory {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "star-performer" | "star" => Some(InsightCategory::StarPerformer),
            "consistent-quality" | "consistent" => Some(InsightCategory::ConsistentQuality),
            "hidden-gem" | "gem" => Some(InsightCategory::HiddenGem),
            "needs-improvement" => Some(InsightCategory::NeedsImprovement),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InsightCategory::StarPerformer => "star-performer",
            InsightCategory::ConsistentQuality => "consistent-quality",
            InsightCategory::HiddenGem => "hidden-gem",
            InsightCategory::NeedsImprovement => "needs-improvement",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InsightCategory::StarPerformer => {
                "Strong by YouTube-wide standards and a standout for this channel."
            }
            InsightCategory::ConsistentQuality => {
                "Solid by YouTube-wide standards but ordinary for this channel."
            }
            InsightCategory::HiddenGem => {
                "Outperforms the channel median despite a modest absolute score."
            }
            InsightCategory::NeedsImprovement => {
                "Below the bar both universally and against the channel median."
            }
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            InsightCategory::StarPerformer => "#7c3aed",
            InsightCategory::ConsistentQuality => "#2563eb",
            InsightCategory::HiddenGem => "#059669",
            InsightCategory::NeedsImprovement => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub description: &'static str,
    pub color: &'static str,
}

/// 2x2 decision over absolute >= 60 and relative >= 50.
pub fn synthesize(absolute_score: f64, relative_score: f64) -> Insight {
    let strong_absolute = absolute_score >= ABSOLUTE_THRESHOLD;
    let strong_relative = relative_score >= RELATIVE_THRESHOLD;

    let category = match (strong_absolute, strong_relative) {
        (true, true) => InsightCategory::StarPerformer,
        (true, false) => InsightCategory::ConsistentQuality,
        (false, true) => InsightCategory::HiddenGem,
        (false, false) => InsightCategory::NeedsImprovement,
    };

    Insight {
        category,
        description: category.description(),
        color: category.color(),
    }
}
