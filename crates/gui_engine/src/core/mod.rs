//! # Core Module
//!
//! Shared configuration types used by the UI system and by host applications.

pub mod config;

pub use config::{ButtonStyle, Config, ConfigError, UIConfig, WindowConfig};
