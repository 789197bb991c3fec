#![warn(clippy::all, rust_2018_idioms)]
//! Longitudinally invariant inclusive kt, Cambridge/Aachen and anti-kt
//! jet clustering in rapidity and azimuth.
//!
//! ```
//! use ktjet::{ClusterEngine, FourVector};
//!
//! let particles = [
//!     FourVector::from_pt_y_phi(10., 0., 0.),
//!     FourVector::from_pt_y_phi(10., 0.05, 0.05),
//!     FourVector::from_pt_y_phi(3., 3., 3.),
//! ];
//! // anti-kt with R = 0.4 and jets above 5 GeV
//! let mut engine = ClusterEngine::new(0.4, 1, -1, 5.).unwrap();
//! let jets = engine.build_jets(&particles);
//! assert_eq!(jets.len(), 1);
//! ```
mod clustering;
mod error;
mod four_vector;
mod jets;
mod particle;

pub use clustering::{
    delta_phi, delta_r2, ClusterEngine, ClusterStats, JetTable,
};
pub use error::Error;
pub use four_vector::{FourVector, MAX_RAP};
pub use jets::{JetAlgorithm, JetDefinition, RecombinationScheme};
pub use particle::Particle;
