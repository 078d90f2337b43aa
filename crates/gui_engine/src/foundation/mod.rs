//! Foundation module - Core utilities and types
//!
//! - Math types and planar transforms
//! - Logging utilities

pub mod math;
pub mod logging;
