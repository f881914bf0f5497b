//! Builder for `LaserSettings`.
//!
//! Settings are assembled once, then frozen behind a `SharedSettings`
//! handle. The builder starts from the defaults or from a copy of existing
//! settings, and accepts overrides either through typed setters or by field
//! name. Named overrides coerce the value to the field's type; names that do
//! not match a field are ignored.

use crate::settings::{LaserSettings, RasterDirection, SharedSettings};
use tracing::{debug, warn};

/// A loosely typed override value, coerced to the target field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    /// Truthiness: non-zero numbers and non-empty text are `true`.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Integer value; floats truncate toward zero, text must be an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Builder for [`LaserSettings`].
#[derive(Debug, Clone, Default)]
pub struct LaserSettingsBuilder {
    settings: LaserSettings,
}

impl LaserSettingsBuilder {
    /// Start from the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of `other`
    pub fn from_settings(other: &LaserSettings) -> Self {
        Self {
            settings: LaserSettings::from_settings(other),
        }
    }

    pub fn laser_enabled(mut self, enabled: bool) -> Self {
        self.settings.laser_enabled = enabled;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.settings.speed = speed;
        self
    }

    pub fn power(mut self, power: f64) -> Self {
        self.settings.power = power;
        self
    }

    /// Diagonal ratio, used only while `dratio_custom` is set
    pub fn dratio(mut self, dratio: f64) -> Self {
        self.settings.dratio = dratio;
        self
    }

    pub fn dratio_custom(mut self, custom: bool) -> Self {
        self.settings.dratio_custom = custom;
        self
    }

    /// Acceleration, used only while `acceleration_custom` is set
    pub fn acceleration(mut self, acceleration: i32) -> Self {
        self.settings.acceleration = acceleration;
        self
    }

    pub fn acceleration_custom(mut self, custom: bool) -> Self {
        self.settings.acceleration_custom = custom;
        self
    }

    /// Dot length, used only while `dot_length_custom` is set
    pub fn dot_length(mut self, dot_length: i32) -> Self {
        self.settings.dot_length = dot_length;
        self
    }

    pub fn dot_length_custom(mut self, custom: bool) -> Self {
        self.settings.dot_length_custom = custom;
        self
    }

    /// Pass count, used only while `passes_custom` is set
    pub fn passes(mut self, passes: i32) -> Self {
        self.settings.passes = passes;
        self
    }

    pub fn passes_custom(mut self, custom: bool) -> Self {
        self.settings.passes_custom = custom;
        self
    }

    pub fn raster_step(mut self, step: i32) -> Self {
        self.settings.raster_step = step;
        self
    }

    pub fn raster_direction(mut self, direction: RasterDirection) -> Self {
        self.settings.raster_direction = direction;
        self
    }

    /// `true` scans every line in the same direction
    pub fn raster_swing(mut self, unidirectional: bool) -> Self {
        self.settings.raster_swing = unidirectional;
        self
    }

    pub fn overscan(mut self, overscan: Option<f64>) -> Self {
        self.settings.overscan = overscan;
        self
    }

    /// Override one field by name.
    ///
    /// The value is coerced to the field's type. Unknown names are ignored;
    /// values that cannot be coerced leave the field unchanged.
    pub fn set(mut self, name: &str, value: impl Into<SettingValue>) -> Self {
        let value = value.into();
        let s = &mut self.settings;
        let applied = match name {
            "laser_enabled" => assign(&mut s.laser_enabled, Some(value.as_bool())),
            "speed" => assign(&mut s.speed, value.as_f64()),
            "power" => assign(&mut s.power, value.as_f64()),
            "dratio_custom" => assign(&mut s.dratio_custom, Some(value.as_bool())),
            "dratio" => assign(&mut s.dratio, value.as_f64()),
            "acceleration_custom" => assign(&mut s.acceleration_custom, Some(value.as_bool())),
            "acceleration" => assign(&mut s.acceleration, value.as_i32()),
            "raster_step" => assign(&mut s.raster_step, value.as_i32()),
            "raster_direction" => assign(
                &mut s.raster_direction,
                value.as_i64().map(RasterDirection::from),
            ),
            "raster_swing" => assign(&mut s.raster_swing, Some(value.as_bool())),
            "raster_preference_top" => assign(&mut s.raster_preference_top, value.as_i32()),
            "raster_preference_right" => assign(&mut s.raster_preference_right, value.as_i32()),
            "raster_preference_left" => assign(&mut s.raster_preference_left, value.as_i32()),
            "raster_preference_bottom" => {
                assign(&mut s.raster_preference_bottom, value.as_i32())
            }
            // Non-numeric overscan is stored as absent and resolves to the default
            "overscan" => assign(&mut s.overscan, Some(value.as_f64())),
            "advanced" => assign(&mut s.advanced, Some(value.as_bool())),
            "ppi_enabled" => assign(&mut s.ppi_enabled, Some(value.as_bool())),
            "dot_length_custom" => assign(&mut s.dot_length_custom, Some(value.as_bool())),
            "dot_length" => assign(&mut s.dot_length, value.as_i32()),
            "shift_enabled" => assign(&mut s.shift_enabled, Some(value.as_bool())),
            "passes_custom" => assign(&mut s.passes_custom, Some(value.as_bool())),
            "passes" => assign(&mut s.passes, value.as_i32()),
            "jog_distance" => assign(&mut s.jog_distance, value.as_i32()),
            "jog_enable" => assign(&mut s.jog_enable, Some(value.as_bool())),
            _ => {
                debug!(name, "Ignoring unknown setting override");
                return self;
            }
        };
        if !applied {
            warn!(name, ?value, "Override value does not fit setting, ignored");
        }
        self
    }

    /// Apply several named overrides in order
    pub fn set_all<I, K, V>(self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SettingValue>,
    {
        overrides
            .into_iter()
            .fold(self, |builder, (name, value)| builder.set(name.as_ref(), value))
    }

    pub fn build(self) -> LaserSettings {
        self.settings
    }

    /// Build and wrap into a shareable handle
    pub fn build_shared(self) -> SharedSettings {
        self.settings.into_shared()
    }
}

fn assign<T>(field: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *field = v;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_setters() {
        let settings = LaserSettings::builder()
            .speed(45.0)
            .power(500.0)
            .passes(3)
            .passes_custom(true)
            .raster_step(2)
            .raster_swing(true)
            .build();
        assert_eq!(settings.speed, 45.0);
        assert_eq!(settings.power, 500.0);
        assert_eq!(settings.implicit_passes(), 3);
        assert_eq!(settings.raster_step, 2);
        assert!(settings.raster_swing);
    }

    #[test]
    fn test_named_overrides_coerce() {
        let settings = LaserSettings::builder()
            .set("speed", 30)
            .set("raster_step", 2.9)
            .set("passes", "4")
            .set("passes_custom", 1)
            .set("raster_direction", 3)
            .build();
        assert_eq!(settings.speed, 30.0);
        assert_eq!(settings.raster_step, 2);
        assert_eq!(settings.implicit_passes(), 4);
        assert_eq!(settings.raster_direction, RasterDirection::LeftToRight);
    }

    #[test]
    fn test_unknown_override_ignored() {
        let settings = LaserSettings::builder().set("warp_factor", 9).build();
        assert_eq!(settings, LaserSettings::default());
    }

    #[test]
    fn test_uncoercible_override_ignored() {
        let settings = LaserSettings::builder().set("speed", "fast").build();
        assert_eq!(settings.speed, 20.0);

        let settings = LaserSettings::builder().set("passes", 1e12).build();
        assert_eq!(settings.passes, 1);
    }

    #[test]
    fn test_non_numeric_overscan_becomes_absent() {
        let settings = LaserSettings::builder().set("overscan", "wide").build();
        assert_eq!(settings.overscan, None);

        let settings = LaserSettings::builder().set("overscan", 35).build();
        assert_eq!(settings.overscan, Some(35.0));
    }

    #[test]
    fn test_builder_from_settings_then_override() {
        let base = LaserSettings::builder().speed(60.0).power(300.0).build();
        let derived = LaserSettingsBuilder::from_settings(&base)
            .set_all([("power", SettingValue::Float(150.0))])
            .build();
        assert_eq!(derived.speed, 60.0);
        assert_eq!(derived.power, 150.0);
        assert_eq!(base.power, 300.0);
    }

    #[test]
    fn test_custom_values_keep_source_gating() {
        let base = LaserSettings::builder().passes(4).build();
        assert!(!base.passes_custom);
        assert_eq!(base.implicit_passes(), 1);

        let derived = LaserSettingsBuilder::from_settings(&base)
            .passes(2)
            .acceleration(3)
            .dot_length(5)
            .dratio(0.4)
            .build();
        assert_eq!(derived.passes, 2);
        assert_eq!(derived.implicit_passes(), 1);
        assert_eq!(derived.implicit_accel(), None);
        assert_eq!(derived.implicit_dotlength(), 1);
        assert_eq!(derived.implicit_d_ratio(), None);

        let enabled = LaserSettingsBuilder::from_settings(&derived)
            .passes_custom(true)
            .acceleration_custom(true)
            .dot_length_custom(true)
            .dratio_custom(true)
            .build();
        assert_eq!(enabled.implicit_passes(), 2);
        assert_eq!(enabled.implicit_accel(), Some(3));
        assert_eq!(enabled.implicit_dotlength(), 5);
        assert_eq!(enabled.implicit_d_ratio(), Some(0.4));
    }

    #[test]
    fn test_text_truthiness() {
        assert!(SettingValue::from("no").as_bool());
        assert!(!SettingValue::from("").as_bool());
        assert!(!SettingValue::Float(0.0).as_bool());
    }
}
