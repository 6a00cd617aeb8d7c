//! Statistics

mod histogram;

pub use histogram::*;
