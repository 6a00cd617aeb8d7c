//! Piecewise-constant 2D density sampling.

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod common;
pub mod density_sampler;
pub mod error;
pub mod fileutil;
pub mod geometry;
pub mod rng;
pub mod sampling;
pub mod stats;
