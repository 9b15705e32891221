use serde::Serialize;

use super::bands::{ratio_to_label, Category};

/// Score given to an undefined ratio.
pub const FLOOR_SCORE: u8 = 20;

/// Interpolation anchors, `(ratio, score)`, ascending by ratio.
pub const ANCHORS: [(f64, u8); 4] = [(0.70, 20), (0.90, 46), (1.20, 85), (1.50, 95)];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rating {
    pub score: u8,
    pub category: Category,
}

/// Score and label a performance ratio together.
pub fn rate(ratio: Option<f64>) -> Rating {
    Rating {
        score: score_continuous(ratio),
        category: ratio_to_label(ratio),
    }
}

/// Map a performance ratio onto 0-100 by piecewise-linear interpolation.
///
/// Ratios at or below the first anchor clamp to its score, ratios at or above
/// the last clamp to its score. Halfway values round to even.
pub fn score_continuous(ratio: Option<f64>) -> u8 {
    let Some(ratio) = ratio.filter(|r| !r.is_nan()) else {
        return FLOOR_SCORE;
    };

    let (first_x, first_y) = ANCHORS[0];
    let (last_x, last_y) = ANCHORS[ANCHORS.len() - 1];
    if ratio <= first_x {
        return first_y;
    }
    if ratio >= last_x {
        return last_y;
    }

    for pair in ANCHORS.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        if x1 <= ratio && ratio <= x2 {
            let t = (ratio - x1) / (x2 - x1);
            let score = f64::from(y1) + t * (f64::from(y2) - f64::from(y1));
            return score.round_ties_even().clamp(0.0, 100.0) as u8;
        }
    }
    FLOOR_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_ratio_scores_floor() {
        assert_eq!(score_continuous(None), 20);
        assert_eq!(score_continuous(Some(f64::NAN)), 20);
    }

    #[test]
    fn test_low_ratios_clamp() {
        for r in [0.70, 0.5, 0.0, -3.0, f64::NEG_INFINITY] {
            assert_eq!(score_continuous(Some(r)), 20, "ratio {}", r);
        }
    }

    #[test]
    fn test_high_ratios_clamp() {
        for r in [1.50, 1.75, 10.0, f64::INFINITY] {
            assert_eq!(score_continuous(Some(r)), 95, "ratio {}", r);
        }
    }

    #[test]
    fn test_anchor_values() {
        assert_eq!(score_continuous(Some(0.90)), 46);
        assert_eq!(score_continuous(Some(1.20)), 85);
    }

    #[test]
    fn test_interpolation_between_anchors() {
        // 20 + 0.5 * 26
        assert_eq!(score_continuous(Some(0.80)), 33);
        // 46 + (1/3) * 39
        assert_eq!(score_continuous(Some(1.00)), 59);
        // 85 + 0.5 * 10
        assert_eq!(score_continuous(Some(1.35)), 90);
    }

    #[test]
    fn test_interpolation_rounds_half_to_even() {
        // 78.5, 86.5, 88.5, 39.5
        assert_eq!(score_continuous(Some(1.15)), 78);
        assert_eq!(score_continuous(Some(1.245)), 86);
        assert_eq!(score_continuous(Some(1.305)), 88);
        assert_eq!(score_continuous(Some(0.85)), 40);
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0;
        for step in 0..=200 {
            let r = 0.5 + step as f64 * 0.006;
            let score = score_continuous(Some(r));
            assert!(score >= last, "score decreased at ratio {}", r);
            last = score;
        }
    }

    #[test]
    fn test_rate_combines_score_and_label() {
        let rating = rate(Some(1.35));
        assert_eq!(rating.score, 90);
        assert_eq!(rating.category, Category::AboveAverage);

        let rating = rate(None);
        assert_eq!(rating.score, 20);
        assert_eq!(rating.category, Category::NeedsImprovement);
    }
}
