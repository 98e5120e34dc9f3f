//! User settings for settleup-summary
//!
//! Manages the preferences that shape how an export is filtered and how the
//! aggregates are presented: the transfer tag, the label shown for the empty
//! category, and the timezones used by the overview report.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::paths::SettleUpPaths;
use crate::error::SummaryError;

/// User settings for settleup-summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Value of the `type` column that marks a settlement between participants
    #[serde(default = "default_transfer_tag")]
    pub transfer_tag: String,

    /// Label shown for transactions without a category
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,

    /// IANA timezone the export's timestamps are recorded in
    #[serde(default = "default_timezone")]
    pub source_timezone: String,

    /// IANA timezone used when showing timestamps
    #[serde(default = "default_timezone")]
    pub display_timezone: String,

    /// Participants (in column order) for the overview report; empty means all
    #[serde(default)]
    pub overview_participants: Vec<String>,

    /// Export file read when no input is given on the command line
    #[serde(default = "default_input")]
    pub default_input: String,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_transfer_tag() -> String {
    "transfer".to_string()
}

fn default_uncategorized_label() -> String {
    "Uncategorized".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_input() -> String {
    "transactions.csv".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            transfer_tag: default_transfer_tag(),
            uncategorized_label: default_uncategorized_label(),
            source_timezone: default_timezone(),
            display_timezone: default_timezone(),
            overview_participants: Vec::new(),
            default_input: default_input(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Parsed source timezone
    pub fn source_tz(&self) -> Result<Tz, SummaryError> {
        parse_timezone(&self.source_timezone)
    }

    /// Parsed display timezone
    pub fn display_tz(&self) -> Result<Tz, SummaryError> {
        parse_timezone(&self.display_timezone)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SettleUpPaths) -> Result<Self, SummaryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SummaryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SummaryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SettleUpPaths) -> Result<(), SummaryError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SummaryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SummaryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

fn parse_timezone(name: &str) -> Result<Tz, SummaryError> {
    name.parse::<Tz>()
        .map_err(|e| SummaryError::Config(format!("Unknown timezone '{}': {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.transfer_tag, "transfer");
        assert_eq!(settings.default_input, "transactions.csv");
        assert_eq!(settings.source_tz().unwrap(), Tz::UTC);
        assert!(settings.overview_participants.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SettleUpPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.display_timezone = "Europe/Berlin".into();
        settings.overview_participants = vec!["Alice".into(), "Bob".into()];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.display_tz().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(loaded.overview_participants, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"transfer_tag": "settle"}"#).unwrap();
        assert_eq!(settings.transfer_tag, "settle");
        assert_eq!(settings.uncategorized_label, "Uncategorized");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_unknown_timezone_is_config_error() {
        let settings = Settings {
            display_timezone: "Mars/Olympus".into(),
            ..Settings::default()
        };
        assert!(matches!(settings.display_tz(), Err(SummaryError::Config(_))));
    }
}
