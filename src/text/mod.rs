// Word-level text handling — normalization and stop-word filtering.

pub mod normalize;
pub mod stopwords;
