//! Sheet configuration
//!
//! Every field has a default, so a config file only needs the options it
//! changes:
//!
//! ```toml
//! initial = "visible"
//! animate_on_mount = true
//!
//! [spring]
//! stiffness = 200.0
//!
//! [gesture]
//! close_distance = 60.0
//! ```

use std::path::Path;

use glide_animation::SpringConfig;
use glide_core::Color;
use serde::{Deserialize, Serialize};

use crate::animator::Visibility;
use crate::error::{Result, SheetError};

/// Per-instance sheet options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Starting animation target
    pub initial: Visibility,
    /// Master switch for dragging the sheet itself
    pub draggable: bool,
    /// Play an entrance animation after the first paint when `initial` is visible
    pub animate_on_mount: bool,
    /// Close when the backdrop is pressed
    pub dismiss_on_backdrop: bool,
    /// Lock page scrolling while the sheet rests fully open
    pub lock_page_scroll: bool,
    pub spring: SpringConfig,
    pub gesture: GestureConfig,
    pub backdrop: BackdropConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            initial: Visibility::Hidden,
            draggable: true,
            animate_on_mount: false,
            dismiss_on_backdrop: true,
            lock_page_scroll: false,
            spring: SpringConfig::sheet(),
            gesture: GestureConfig::default(),
            backdrop: BackdropConfig::default(),
        }
    }
}

/// Drag release and arbitration thresholds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Downward release velocity above which the sheet closes regardless of position
    pub flick_velocity: f32,
    /// Downward displacement past which a non-upward release closes the sheet
    pub close_distance: f32,
    /// Furthest the sheet can be stretched above its open position
    pub max_overdrag: f32,
    /// Extra scroll extent tolerated before content counts as scrollable
    pub scrollable_slack: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flick_velocity: 20.0,
            close_distance: 45.0,
            max_overdrag: 40.0,
            scrollable_slack: 1.0,
        }
    }
}

/// Backdrop tint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Hex color of the backdrop (`#rgb`, `#rrggbb` or `#rrggbbaa`)
    pub color: String,
    /// Tint alpha at full opacity
    pub max_dim: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            max_dim: 0.75,
        }
    }
}

impl BackdropConfig {
    /// Parsed backdrop color, black if the string is malformed
    pub fn color(&self) -> Color {
        Color::parse_hex(&self.color).unwrap_or(Color::BLACK)
    }
}

impl SheetConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would make the sheet misbehave
    pub fn validate(&self) -> Result<()> {
        let spring = &self.spring;
        if !(spring.stiffness.is_finite() && spring.stiffness > 0.0) {
            return Err(SheetError::invalid("spring.stiffness", "must be positive"));
        }
        if !(spring.damping.is_finite() && spring.damping >= 0.0) {
            return Err(SheetError::invalid("spring.damping", "must not be negative"));
        }
        if !(spring.mass.is_finite() && spring.mass > 0.0) {
            return Err(SheetError::invalid("spring.mass", "must be positive"));
        }

        let gesture = &self.gesture;
        for (field, value) in [
            ("gesture.flick_velocity", gesture.flick_velocity),
            ("gesture.close_distance", gesture.close_distance),
            ("gesture.max_overdrag", gesture.max_overdrag),
            ("gesture.scrollable_slack", gesture.scrollable_slack),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SheetError::invalid(field, format!("{value} is not >= 0")));
            }
        }

        if Color::parse_hex(&self.backdrop.color).is_none() {
            return Err(SheetError::invalid(
                "backdrop.color",
                format!("`{}` is not a hex color", self.backdrop.color),
            ));
        }
        if !(0.0..=1.0).contains(&self.backdrop.max_dim) {
            return Err(SheetError::invalid("backdrop.max_dim", "must be within 0..=1"));
        }

        Ok(())
    }
}
