//! Separable resampling: kernels, contributor lists, the per-channel
//! streaming state machine, and the whole-image pipeline.

pub mod channel;
pub mod contributors;
pub mod filter;
pub mod pipeline;
