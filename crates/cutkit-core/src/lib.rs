//! # CutKit Core
//!
//! Core types, aliases, and errors shared by the CutKit crates.
//! Provides the lattice point emitted by every plotting kernel and the
//! error types raised while building raster scan plans.

pub mod error;
pub mod plot;
pub mod types;

pub use error::{RasterError, RasterResult};
pub use plot::PlotPoint;

// Re-export type aliases for convenience
pub use types::{shared, BoxedIterator, Shared};
