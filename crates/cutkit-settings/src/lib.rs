//! CutKit Settings Crate
//!
//! Holds the configuration record shared by every cut object produced from
//! one laser operation: speed, power, raster parameters, and the paired
//! "custom" override flags with their implicit accessors.

pub mod builder;
pub mod error;
pub mod settings;

pub use builder::{LaserSettingsBuilder, SettingValue};
pub use error::{SettingsError, SettingsResult};
pub use settings::{LaserSettings, RasterDirection, SharedSettings, DEFAULT_OVERSCAN};
