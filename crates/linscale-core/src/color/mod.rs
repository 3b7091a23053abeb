//! Color handling: transfer curves and the lookup tables built from them.

pub mod tables;
pub mod transfer;
