//! Sampling

mod batch;
mod distribution_1d;
mod distribution_2d;

// Re-export
pub use batch::*;
pub use distribution_1d::*;
pub use distribution_2d::*;
