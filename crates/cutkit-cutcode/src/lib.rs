//! # CutKit Cut Code
//!
//! The ordered sequence of cut objects a laser job is made of.
//!
//! - **Cut objects**: line, quadratic, cubic, arc and raster cuts behind one
//!   closed enum, each with endpoints, direction classifiers, in-place
//!   reversal and a lazy lattice point generator
//! - **Cut code**: the visitation order, sub-range reversal for path
//!   optimization, drawable export and the command stream handed to the
//!   execution layer

pub mod command;
pub mod cut;
pub mod cutcode;
pub mod drawable;
pub mod raster_cut;

pub use command::LaserCommand;
pub use cut::{ArcCut, CubicCut, CutObject, LineCut, QuadCut};
pub use cutcode::CutCode;
pub use drawable::Drawable;
pub use raster_cut::RasterCut;
