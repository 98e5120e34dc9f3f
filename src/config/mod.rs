//! Configuration module for settleup-summary
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SettleUpPaths;
pub use settings::Settings;
