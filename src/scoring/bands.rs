use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    GreaterThan(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// Categorical performance label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Top Performer")]
    TopPerformer,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopPerformer => "Top Performer",
            Self::AboveAverage => "Above Average",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreBand {
    pub range: RangeOp,
    pub category: Category,
}

/// Bands are checked in order and the first match wins, so the shared
/// endpoints 1.2 and 0.9 belong to the higher band.
pub const SCORE_BANDS: [ScoreBand; 4] = [
    ScoreBand {
        range: RangeOp::GreaterThan(1.5),
        category: Category::TopPerformer,
    },
    ScoreBand {
        range: RangeOp::Between(1.2, 1.5),
        category: Category::AboveAverage,
    },
    ScoreBand {
        range: RangeOp::Between(0.9, 1.2),
        category: Category::Average,
    },
    ScoreBand {
        range: RangeOp::Between(0.7, 0.9),
        category: Category::BelowAverage,
    },
];

/// Label a performance ratio. Undefined or NaN ratios need improvement.
pub fn ratio_to_label(ratio: Option<f64>) -> Category {
    let Some(ratio) = ratio.filter(|r| !r.is_nan()) else {
        return Category::NeedsImprovement;
    };
    SCORE_BANDS
        .iter()
        .find(|band| band.range.matches(ratio))
        .map(|band| band.category)
        .unwrap_or(Category::NeedsImprovement)
}
