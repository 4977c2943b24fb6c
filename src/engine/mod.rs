pub mod constants;
pub mod ranking;
pub mod scoring;

pub use constants::*;
pub use ranking::{rank_against, rank_substitutes, score_choice};
pub use scoring::{MacroWeights, RankConfig, TargetProfile, score_nutrients};
