//! Runtime configuration for a processing run.
//! Loaded by `infrastructure::config`; CLI flags override individual values.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Root holding `<Customer>/Avtalsmall_<Customer>.docx` and friends
    #[validate(length(min = 1))]
    pub templates_dir: String,

    /// Where filled artifacts are written, grouped by customer folder
    #[validate(length(min = 1))]
    pub results_dir: String,

    /// Only files ending with this extension are treated as intake sheets
    #[validate(length(min = 2, max = 16))]
    pub intake_extension: String,

    /// Default tracing filter; `RUST_LOG` wins when set
    #[validate(length(min = 1))]
    pub log_filter: String,

    /// Write `report.json` next to the artifacts
    pub write_report: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            results_dir: "results".to_string(),
            intake_extension: ".xlsx".to_string(),
            log_filter: "info".to_string(),
            write_report: true,
        }
    }
}

impl AppConfig {
    /// Field validation plus the rules the derive cannot express.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid configuration: {}", e)))?;

        if !self.intake_extension.starts_with('.') {
            return Err(AppError::ConfigError(format!(
                "intake_extension must start with '.', got {:?}",
                self.intake_extension
            )));
        }
        if self.intake_extension[1..].contains(['.', '/', '\\']) {
            return Err(AppError::ConfigError(format!(
                "intake_extension must be a single extension, got {:?}",
                self.intake_extension
            )));
        }
        Ok(())
    }
}
