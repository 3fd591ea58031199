pub mod get_high_scores;
pub mod set_score;

pub use get_high_scores::*;
pub use set_score::*;
