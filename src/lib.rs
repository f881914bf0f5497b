//! # CutKit
//!
//! Converts laser cutting and engraving primitives (lines, quadratic and
//! cubic curves, arcs, raster images) into an ordered sequence of cut
//! objects that a motion layer streams point by point.
//!
//! ## Architecture
//!
//! CutKit is organized as a workspace with multiple crates:
//!
//! 1. **cutkit-core** - Lattice points, shared aliases, errors
//! 2. **cutkit-settings** - Laser settings, builder, file loading
//! 3. **cutkit-plotter** - Zingl curve kernels and raster scan plans
//! 4. **cutkit-cutcode** - Cut objects, cut sequences, command stream
//! 5. **cutkit** - Facade re-exporting the crates above

use std::path::Path;

use anyhow::Context;

pub use cutkit_core::{shared, BoxedIterator, PlotPoint, RasterError, RasterResult, Shared};

pub use cutkit_settings::{
    LaserSettings, LaserSettingsBuilder, RasterDirection, SettingValue, SettingsError,
    SettingsResult, SharedSettings, DEFAULT_OVERSCAN,
};

pub use cutkit_plotter::{
    plot_arc, plot_cubic_bezier, plot_line, plot_quad_bezier, ColorMode, InitialDirection,
    IntensityMap, LinePlotter, RasterImage, RasterPlan, RasterPlot, ScanAxis, ScanLine, ScanOrder,
    Traversal,
};

pub use cutkit_cutcode::{
    ArcCut, CubicCut, CutCode, CutObject, Drawable, LaserCommand, LineCut, QuadCut, RasterCut,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load and validate laser settings from a JSON or TOML file, wrapped for
/// sharing between cut objects.
pub fn load_settings(path: &Path) -> anyhow::Result<SharedSettings> {
    let settings = LaserSettings::load_from_file(path)
        .with_context(|| format!("Failed to load laser settings from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Laser settings loaded");
    Ok(settings.into_shared())
}

/// Log filter read from `RUST_LOG`, falling back to `info` when the variable
/// is unset. Unparsable directives are skipped.
pub fn log_filter() -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::EnvFilter;

    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = log_filter();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the logging subscriber")?;

    Ok(())
}

/// Initialize logging as one JSON object per line on stderr, for hosts that
/// collect logs from an execution service.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = log_filter();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the logging subscriber")?;

    Ok(())
}
