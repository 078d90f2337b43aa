//! # UI Configuration
//!
//! Settings read at startup: window dimensions, logging, debug overlays and
//! the default look of buttons. Loaded from TOML or RON through [`Config`].
//!
//! ```toml
//! log_level = "debug"
//! debug_wireframe = false
//!
//! [window]
//! width = 1280
//! height = 720
//!
//! [button]
//! fade_duration = 0.1
//! normal_color = [1.0, 1.0, 1.0, 1.0]
//! ```

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec4;

pub use crate::config::{Config, ConfigError};

/// Window the UI is laid out against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

/// Default colors and fade timing applied to newly created buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Seconds spent blending between state colors (0 = instant)
    pub fade_duration: f32,
    /// Resting color
    pub normal_color: Vec4,
    /// Color while hovered
    pub highlighted_color: Vec4,
    /// Color while held down
    pub pressed_color: Vec4,
    /// Color after a completed click
    pub selected_color: Vec4,
    /// Color while not interactable
    pub disabled_color: Vec4,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fade_duration: 0.1,
            normal_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            highlighted_color: Vec4::new(0.96, 0.96, 0.96, 1.0),
            pressed_color: Vec4::new(0.78, 0.78, 0.78, 1.0),
            selected_color: Vec4::new(0.96, 0.96, 0.96, 1.0),
            disabled_color: Vec4::new(0.78, 0.78, 0.78, 0.5),
        }
    }
}

impl ButtonStyle {
    /// Set fade duration
    pub fn with_fade_duration(mut self, seconds: f32) -> Self {
        self.fade_duration = seconds;
        self
    }
}

/// Top-level UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    /// Initial window size
    pub window: WindowConfig,
    /// Default log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    /// Draw element outlines after the regular UI pass
    pub debug_wireframe: bool,
    /// Default button appearance
    pub button: ButtonStyle,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            log_level: "info".to_string(),
            debug_wireframe: false,
            button: ButtonStyle::default(),
        }
    }
}

impl UIConfig {
    /// Set window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window = WindowConfig { width, height };
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable the debug wireframe overlay
    pub fn with_debug_wireframe(mut self, enabled: bool) -> Self {
        self.debug_wireframe = enabled;
        self
    }

    /// Set default button style
    pub fn with_button_style(mut self, style: ButtonStyle) -> Self {
        self.button = style;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !self.button.fade_duration.is_finite() || self.button.fade_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "button fade duration must be a non-negative number, got {}",
                self.button.fade_duration
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }
}

impl Config for UIConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_config_is_valid() {
        assert!(UIConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(UIConfig::default().with_window_size(0, 600).validate().is_err());
        assert!(UIConfig::default().with_log_level("chatty").validate().is_err());

        let style = ButtonStyle::default().with_fade_duration(-1.0);
        assert!(UIConfig::default().with_button_style(style).validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            debug_wireframe = true

            [window]
            width = 1024
        "#;
        let config = UIConfig::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert!(config.debug_wireframe);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.button, ButtonStyle::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = UIConfig::default()
            .with_window_size(640, 480)
            .with_log_level("debug");
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        let parsed = UIConfig::from_str_as(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }
}
