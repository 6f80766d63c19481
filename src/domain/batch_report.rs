use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::{CustomerIdentity, TemplateKind};

/// Non-fatal problem met while processing one intake file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchWarning {
    UnreadableSource {
        file: String,
        reason: String,
    },
    UnknownCustomer {
        file: String,
        customer_name: String,
        discriminator_value: String,
    },
    MissingTemplate {
        file: String,
        customer: CustomerIdentity,
        template: TemplateKind,
    },
    TemplateError {
        file: String,
        customer: CustomerIdentity,
        template: TemplateKind,
        reason: String,
    },
}

impl BatchWarning {
    pub fn file(&self) -> &str {
        match self {
            BatchWarning::UnreadableSource { file, .. }
            | BatchWarning::UnknownCustomer { file, .. }
            | BatchWarning::MissingTemplate { file, .. }
            | BatchWarning::TemplateError { file, .. } => file,
        }
    }

    /// Whether the whole file was dropped, as opposed to one template kind.
    pub fn skips_file(&self) -> bool {
        matches!(
            self,
            BatchWarning::UnreadableSource { .. } | BatchWarning::UnknownCustomer { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            BatchWarning::UnreadableSource { file, reason } => {
                format!("{file}: not a readable workbook ({reason})")
            }
            BatchWarning::UnknownCustomer {
                file,
                customer_name,
                discriminator_value,
            } => format!(
                "{file}: unknown customer (D3={customer_name:?}, D4={discriminator_value:?})"
            ),
            BatchWarning::MissingTemplate {
                file,
                customer,
                template,
            } => format!(
                "{file}: no {template} template for {customer} ({})",
                template.template_file_name(*customer)
            ),
            BatchWarning::TemplateError {
                file,
                customer,
                template,
                reason,
            } => format!("{file}: failed to fill {template} template for {customer}: {reason}"),
        }
    }
}

impl std::fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub file: String,
    pub customer: CustomerIdentity,
    pub artifacts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Summary of one run: which files produced artifacts, which were skipped and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<SkippedFile>,
    pub warnings: Vec<BatchWarning>,
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            processed: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: BatchWarning) {
        if warning.skips_file() {
            self.skipped.push(SkippedFile {
                file: warning.file().to_string(),
                reason: warning.message(),
            });
        }
        self.warnings.push(warning);
    }

    pub fn artifact_count(&self) -> usize {
        self.processed.iter().map(|p| p.artifacts.len()).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} file(s) processed, {} skipped, {} artifact(s), {} warning(s)",
            self.processed.len(),
            self.skipped.len(),
            self.artifact_count(),
            self.warnings.len()
        )
    }
}
