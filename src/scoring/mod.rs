pub mod bands;
pub mod engine;

pub use bands::{ratio_to_label, Category, RangeOp, ScoreBand, SCORE_BANDS};
pub use engine::{rate, score_continuous, Rating, ANCHORS, FLOOR_SCORE};
