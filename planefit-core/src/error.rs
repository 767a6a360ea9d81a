//! Error types for planefit

use thiserror::Error;

/// Main error type for planefit operations
#[derive(Error, Debug)]
pub enum Error {
    /// The consensus search found no inliers for any candidate plane.
    /// Raised for empty, sub-minimal, or fully degenerate input.
    #[error("unable to fit a plane to the data")]
    PlaneFitFailed,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for planefit operations
pub type Result<T> = std::result::Result<T, Error>;
