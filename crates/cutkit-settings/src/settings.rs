//! Laser settings shared by cut objects.
//!
//! One `LaserSettings` value is built per laser operation and shared, read
//! only, by every cut object that operation produces. Several values come in
//! pairs (`dratio` / `dratio_custom`, ...): the raw value only takes effect
//! when its `_custom` flag is set, otherwise the implicit accessor reports the
//! default the execution layer should use.
//!
//! Settings can be stored as JSON or TOML. Missing keys take their defaults
//! and unknown keys are ignored.

use crate::builder::LaserSettingsBuilder;
use crate::error::{SettingsError, SettingsResult};
use cutkit_core::Shared;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::warn;

/// Overscan distance used when none is configured or the configured value
/// is not numeric.
///
/// Decimal text such as `"12.5"` counts as numeric and truncates to 12, and
/// negative distances clamp to 0 rather than running the head backwards.
/// See [`LaserSettings::implicit_overscan`].
pub const DEFAULT_OVERSCAN: i64 = 20;

/// Settings shared by reference across cut objects.
pub type SharedSettings = Shared<LaserSettings>;

/// Raster scan direction, stored as its integer code 0-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RasterDirection {
    /// Horizontal scan lines, starting at the top edge (code 0)
    #[default]
    TopToBottom,
    /// Horizontal scan lines, starting at the bottom edge (code 1)
    BottomToTop,
    /// Vertical scan lines, starting at the right edge (code 2)
    RightToLeft,
    /// Vertical scan lines, starting at the left edge (code 3)
    LeftToRight,
    /// Crosshatch (code 4); planned exactly like `TopToBottom`
    Crosshatch,
}

impl RasterDirection {
    /// Integer code of this direction.
    pub fn code(self) -> i64 {
        match self {
            Self::TopToBottom => 0,
            Self::BottomToTop => 1,
            Self::RightToLeft => 2,
            Self::LeftToRight => 3,
            Self::Crosshatch => 4,
        }
    }
}

impl From<i64> for RasterDirection {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::TopToBottom,
            1 => Self::BottomToTop,
            2 => Self::RightToLeft,
            3 => Self::LeftToRight,
            4 => Self::Crosshatch,
            other => {
                warn!(code = other, "Unknown raster direction, scanning top to bottom");
                Self::TopToBottom
            }
        }
    }
}

impl From<RasterDirection> for i64 {
    fn from(direction: RasterDirection) -> Self {
        direction.code()
    }
}

impl std::fmt::Display for RasterDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopToBottom => write!(f, "Top To Bottom"),
            Self::BottomToTop => write!(f, "Bottom To Top"),
            Self::RightToLeft => write!(f, "Right To Left"),
            Self::LeftToRight => write!(f, "Left To Right"),
            Self::Crosshatch => write!(f, "Crosshatch"),
        }
    }
}

/// Laser settings for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Fire the laser while cutting
    pub laser_enabled: bool,
    /// Cutting speed
    pub speed: f64,
    /// Laser power
    pub power: f64,

    /// Use `dratio` instead of the controller default
    pub dratio_custom: bool,
    /// Diagonal ratio
    pub dratio: f64,
    /// Use `acceleration` instead of the controller default
    pub acceleration_custom: bool,
    /// Acceleration level
    pub acceleration: i32,

    /// Raster line spacing; `0` means no raster
    pub raster_step: i32,
    /// Raster scan direction
    pub raster_direction: RasterDirection,
    /// `false` = bidirectional (zig-zag), `true` = unidirectional
    pub raster_swing: bool,
    pub raster_preference_top: i32,
    pub raster_preference_right: i32,
    pub raster_preference_left: i32,
    pub raster_preference_bottom: i32,
    /// Extra travel past each raster line end; `None` uses the default
    #[serde(deserialize_with = "deserialize_overscan")]
    pub overscan: Option<f64>,

    pub advanced: bool,

    pub ppi_enabled: bool,

    /// Use `dot_length` instead of 1
    pub dot_length_custom: bool,
    pub dot_length: i32,

    pub shift_enabled: bool,

    /// Use `passes` instead of 1
    pub passes_custom: bool,
    pub passes: i32,

    pub jog_distance: i32,
    pub jog_enable: bool,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            laser_enabled: true,
            speed: 20.0,
            power: 1000.0,
            dratio_custom: false,
            dratio: 0.261,
            acceleration_custom: false,
            acceleration: 1,

            raster_step: 0,
            raster_direction: RasterDirection::TopToBottom,
            raster_swing: false,
            raster_preference_top: 0,
            raster_preference_right: 0,
            raster_preference_left: 0,
            raster_preference_bottom: 0,
            overscan: Some(DEFAULT_OVERSCAN as f64),

            advanced: false,

            ppi_enabled: true,

            dot_length_custom: false,
            dot_length: 1,

            shift_enabled: false,

            passes_custom: false,
            passes: 1,

            jog_distance: 255,
            jog_enable: true,
        }
    }
}

impl LaserSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from the defaults
    pub fn builder() -> LaserSettingsBuilder {
        LaserSettingsBuilder::new()
    }

    /// Copy every stored value of `other`.
    ///
    /// Implicit accessors are derived, never stored, so they follow the
    /// copied flags automatically.
    pub fn from_settings(other: &LaserSettings) -> Self {
        other.clone()
    }

    /// Wrap into a shareable handle.
    pub fn into_shared(self) -> SharedSettings {
        cutkit_core::shared(self)
    }

    /// Acceleration to send, or `None` to keep the controller's choice.
    pub fn implicit_accel(&self) -> Option<i32> {
        if !self.acceleration_custom {
            return None;
        }
        Some(self.acceleration)
    }

    /// Diagonal ratio to send, or `None` to keep the controller's choice.
    pub fn implicit_d_ratio(&self) -> Option<f64> {
        if !self.dratio_custom {
            return None;
        }
        Some(self.dratio)
    }

    /// Effective dot length.
    pub fn implicit_dotlength(&self) -> i32 {
        if !self.dot_length_custom {
            return 1;
        }
        self.dot_length
    }

    /// Effective number of passes.
    pub fn implicit_passes(&self) -> i32 {
        if !self.passes_custom {
            return 1;
        }
        self.passes
    }

    /// Overscan distance in whole lattice units.
    ///
    /// Absent or non-finite values fall back to [`DEFAULT_OVERSCAN`];
    /// fractions are truncated and negative distances become 0.
    pub fn implicit_overscan(&self) -> i64 {
        match self.overscan {
            Some(v) if v.is_finite() => (v.trunc() as i64).max(0),
            _ => DEFAULT_OVERSCAN,
        }
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(SettingsError::invalid("speed", "must be a positive number"));
        }

        if !self.power.is_finite() || self.power < 0.0 {
            return Err(SettingsError::invalid("power", "must be >= 0"));
        }

        if self.passes_custom && self.passes < 1 {
            return Err(SettingsError::invalid("passes", "must be >= 1 when custom"));
        }

        if self.dot_length_custom && self.dot_length < 1 {
            return Err(SettingsError::invalid(
                "dot_length",
                "must be >= 1 when custom",
            ));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Accepts a number, an integer string, or anything else. Values that are
/// not numeric deserialize as absent so the default overscan applies.
fn deserialize_overscan<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOverscan {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawOverscan>::deserialize(deserializer)? {
        Some(RawOverscan::Number(value)) => Some(value),
        Some(RawOverscan::Text(text)) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!(value = %text, "Non-numeric overscan, using default");
                None
            }
        },
        Some(RawOverscan::Other(_)) => {
            warn!("Non-numeric overscan, using default");
            None
        }
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LaserSettings::default();
        assert!(settings.laser_enabled);
        assert_eq!(settings.speed, 20.0);
        assert_eq!(settings.power, 1000.0);
        assert_eq!(settings.raster_step, 0);
        assert_eq!(settings.raster_direction, RasterDirection::TopToBottom);
        assert!(!settings.raster_swing);
        assert_eq!(settings.overscan, Some(20.0));
        assert_eq!(settings.jog_distance, 255);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_implicit_passes() {
        let mut settings = LaserSettings {
            passes: 5,
            ..Default::default()
        };
        assert_eq!(settings.implicit_passes(), 1);

        settings.passes_custom = true;
        assert_eq!(settings.implicit_passes(), 5);
    }

    #[test]
    fn test_implicit_accessors_follow_custom_flags() {
        let mut settings = LaserSettings {
            acceleration: 3,
            dratio: 0.5,
            dot_length: 4,
            ..Default::default()
        };
        assert_eq!(settings.implicit_accel(), None);
        assert_eq!(settings.implicit_d_ratio(), None);
        assert_eq!(settings.implicit_dotlength(), 1);

        settings.acceleration_custom = true;
        settings.dratio_custom = true;
        settings.dot_length_custom = true;
        assert_eq!(settings.implicit_accel(), Some(3));
        assert_eq!(settings.implicit_d_ratio(), Some(0.5));
        assert_eq!(settings.implicit_dotlength(), 4);
    }

    #[test]
    fn test_implicit_overscan() {
        let mut settings = LaserSettings::default();
        assert_eq!(settings.implicit_overscan(), 20);

        settings.overscan = None;
        assert_eq!(settings.implicit_overscan(), DEFAULT_OVERSCAN);
        settings.overscan = Some(f64::NAN);
        assert_eq!(settings.implicit_overscan(), DEFAULT_OVERSCAN);
        settings.overscan = Some(12.9);
        assert_eq!(settings.implicit_overscan(), 12);
        settings.overscan = Some(-3.0);
        assert_eq!(settings.implicit_overscan(), 0);
    }

    #[test]
    fn test_copy_constructor() {
        let source = LaserSettings {
            speed: 35.0,
            passes_custom: true,
            passes: 3,
            raster_direction: RasterDirection::LeftToRight,
            ..Default::default()
        };
        let copy = LaserSettings::from_settings(&source);
        assert_eq!(copy, source);
        assert_eq!(copy.implicit_passes(), 3);
    }

    #[test]
    fn test_raster_direction_codes() {
        for code in 0..=4 {
            assert_eq!(RasterDirection::from(code).code(), code);
        }
        assert_eq!(RasterDirection::from(9), RasterDirection::TopToBottom);
        assert_eq!(RasterDirection::from(-1), RasterDirection::TopToBottom);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: LaserSettings =
            serde_json::from_str(r#"{"speed": 50.0, "raster_direction": 2, "bogus": 1}"#)
                .unwrap();
        assert_eq!(settings.speed, 50.0);
        assert_eq!(settings.raster_direction, RasterDirection::RightToLeft);
        assert_eq!(settings.power, 1000.0);
    }

    #[test]
    fn test_overscan_lenient() {
        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": 35}"#).unwrap();
        assert_eq!(settings.overscan, Some(35.0));

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": "12"}"#).unwrap();
        assert_eq!(settings.overscan, Some(12.0));

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": "12.5"}"#).unwrap();
        assert_eq!(settings.implicit_overscan(), 12);

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": "-4"}"#).unwrap();
        assert_eq!(settings.overscan, Some(-4.0));
        assert_eq!(settings.implicit_overscan(), 0);

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": "wide"}"#).unwrap();
        assert_eq!(settings.overscan, None);

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": null}"#).unwrap();
        assert_eq!(settings.overscan, None);

        let settings: LaserSettings = serde_json::from_str(r#"{"overscan": [1]}"#).unwrap();
        assert_eq!(settings.overscan, None);
    }

    #[test]
    fn test_validation() {
        let settings = LaserSettings {
            speed: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = LaserSettings {
            power: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = LaserSettings {
            passes_custom: true,
            passes: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        // Inactive values are not checked
        let settings = LaserSettings {
            passes: 0,
            raster_step: -4,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }
}
