use thiserror::Error;

use crate::jets::RecombinationScheme;

/// Errors raised when setting up a jet clustering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Jet radius has to be positive, got {0}")]
    InvalidRadius(f64),

    #[error("Minimum jet transverse momentum must not be negative, got {0}")]
    InvalidMinPt(f64),

    #[error("Unknown clustering mode {0}, expected 1, 0 or -1")]
    UnknownMode(i32),

    #[error("Unknown recombination scheme {0}, expected 1, 2 or 3")]
    UnknownRecombination(i32),

    #[error("Recombination scheme {0} is not implemented")]
    UnsupportedRecombination(RecombinationScheme),

    #[error("Unknown jet algorithm: {0}")]
    UnknownJetAlgorithm(String),
}
