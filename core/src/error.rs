//! Density sampler errors.

use std::error::Error;
use std::fmt;

/// Reasons a density grid can't be sampled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DensityError {
    /// The number of weights doesn't match the grid size.
    SizeMismatch {
        /// Number of weights provided.
        len: usize,

        /// Grid width.
        width: usize,

        /// Grid height.
        height: usize,
    },

    /// No weights were provided.
    Empty,
}

impl fmt::Display for DensityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { len, width, height } => write!(
                f,
                "the provided buffer size ({len}) doesn't match the provided size ({width}x{height})"
            ),
            Self::Empty => write!(f, "the provided buffer was empty"),
        }
    }
}

impl Error for DensityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = DensityError::SizeMismatch {
            len: 3,
            width: 2,
            height: 2,
        };
        assert_eq!(
            e.to_string(),
            "the provided buffer size (3) doesn't match the provided size (2x2)"
        );
        assert_eq!(DensityError::Empty.to_string(), "the provided buffer was empty");
    }
}
