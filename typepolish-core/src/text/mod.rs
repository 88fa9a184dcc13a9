//! Text normalization and sentence segmentation

pub mod normalize;
pub mod segment;

pub use normalize::{
    capitalize_and_punctuate, capitalize_first, ends_with_terminator, is_terminator, normalize,
};
pub use segment::{join, segment, Sentence};
