pub mod normalize;
pub mod similarity;

pub use normalize::normalize;
pub use similarity::{closest_match, similarity};
