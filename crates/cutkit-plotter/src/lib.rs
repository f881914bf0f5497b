//! # CutKit Plotter
//!
//! Turns laser primitives into the integer lattice points a step-driven
//! laser head visits.
//!
//! - **Zingl kernels**: Bresenham lines, quadratic and cubic Bezier curves,
//!   and elliptical arcs, each producing a gap-free point stream
//! - **Raster images**: pixel buffers and their per-pixel laser power
//! - **Raster plans**: scan-line order, overscan, and the weighted point
//!   stream for engraving an image

pub mod raster;
pub mod raster_image;
pub mod zingl;

pub use raster::{
    InitialDirection, RasterPlan, RasterPlot, ScanAxis, ScanLine, ScanOrder, Traversal,
};
pub use raster_image::{ColorMode, IntensityMap, RasterImage};
pub use zingl::{plot_arc, plot_cubic_bezier, plot_line, plot_quad_bezier, LinePlotter};
