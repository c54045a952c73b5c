pub mod expression_based;

pub use expression_based::*;

use crate::model::{Feature, ScorerResult};

pub trait Scorer: Send + Sync {
    fn score(&self, features: &[Feature]) -> Vec<ScorerResult>;
}
