//! Batch orchestration: intake files in, filled artifacts and a report out.
//!
//! Every per-file problem becomes a warning in the report; nothing here aborts
//! the batch. Files are processed one at a time, in the order given.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::application::use_cases::artifact_naming::{
    artifact_file_name, artifact_relative_path, unique_path,
};
use crate::application::use_cases::customer_classifier::classify;
use crate::application::use_cases::field_extraction::FieldExtractor;
use crate::application::use_cases::substitution;
use crate::application::use_cases::template_registry::TemplateRegistry;
use crate::domain::artifact::{has_extension, IntakeFile, OutputArtifact};
use crate::domain::batch_report::{BatchReport, BatchWarning, ProcessedFile};
use crate::domain::customer::TemplateKind;

pub const DEFAULT_INTAKE_EXTENSION: &str = ".xlsx";

/// Artifacts produced by a run together with what happened to each input.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub artifacts: Vec<OutputArtifact>,
    pub report: BatchReport,
}

pub struct BatchOrchestrator<'a> {
    templates: &'a TemplateRegistry,
    extractor: FieldExtractor,
    intake_extension: String,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(templates: &'a TemplateRegistry) -> Self {
        Self {
            templates,
            extractor: FieldExtractor::new(),
            intake_extension: DEFAULT_INTAKE_EXTENSION.to_string(),
        }
    }

    pub fn with_intake_extension(mut self, extension: impl Into<String>) -> Self {
        self.intake_extension = extension.into();
        self
    }

    pub fn is_intake_file(&self, file_name: &str) -> bool {
        has_extension(file_name, &self.intake_extension)
    }

    /// Process every intake file of a batch. Files with another extension are ignored.
    pub fn process_batch(&self, files: &[IntakeFile]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let mut used_paths = HashSet::new();

        for (customer, kind) in self.templates.missing_templates() {
            warn!(
                customer = %customer,
                template = %kind,
                "No template registered; matching files will skip this kind"
            );
        }

        for file in files {
            if !self.is_intake_file(&file.file_name) {
                debug!(file = %file.file_name, "Ignoring non-intake file");
                continue;
            }
            self.process_file(&file.file_name, &file.content, &mut outcome, &mut used_paths);
        }

        info!(summary = %outcome.report.summary(), "Batch finished");
        outcome
    }

    /// Process one uploaded intake file under the same rules as a batch.
    pub fn process_single(&self, content: &[u8], file_name: &str) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let mut used_paths = HashSet::new();
        self.process_file(file_name, content, &mut outcome, &mut used_paths);
        outcome
    }

    fn process_file(
        &self,
        file_name: &str,
        content: &[u8],
        outcome: &mut BatchOutcome,
        used_paths: &mut HashSet<String>,
    ) {
        info!(file = %file_name, "Processing intake file");

        let record = match self.extractor.extract_workbook(content) {
            Ok(record) => record,
            Err(err) => {
                let warning = BatchWarning::UnreadableSource {
                    file: file_name.to_string(),
                    reason: err.to_string(),
                };
                warn!(file = %file_name, "{}", warning);
                outcome.report.warn(warning);
                return;
            }
        };

        let customer = classify(&record.customer_name, &record.discriminator_value);
        info!(
            file = %file_name,
            customer = %customer,
            landlord = %record.landlord_description,
            tenant = %record.tenant_description,
            "Classified intake file"
        );

        if !customer.is_known() {
            let warning = BatchWarning::UnknownCustomer {
                file: file_name.to_string(),
                customer_name: record.customer_name.clone(),
                discriminator_value: record.discriminator_value.clone(),
            };
            warn!(file = %file_name, "{}", warning);
            outcome.report.warn(warning);
            return;
        }

        let mut produced = Vec::new();
        for kind in TemplateKind::ALL {
            let Some(template) = self.templates.lookup(customer, kind) else {
                let warning = BatchWarning::MissingTemplate {
                    file: file_name.to_string(),
                    customer,
                    template: kind,
                };
                warn!(file = %file_name, "{}", warning);
                outcome.report.warn(warning);
                continue;
            };

            let content = match substitution::render(template, &record) {
                Ok(content) => content,
                Err(err) => {
                    let warning = BatchWarning::TemplateError {
                        file: file_name.to_string(),
                        customer,
                        template: kind,
                        reason: err.to_string(),
                    };
                    warn!(file = %file_name, "{}", warning);
                    outcome.report.warn(warning);
                    continue;
                }
            };

            let file_name_out = artifact_file_name(
                kind,
                customer,
                &record.landlord_description,
                &record.tenant_description,
            );
            let wanted = artifact_relative_path(customer, &file_name_out);
            let relative_path = unique_path(wanted.clone(), used_paths);
            if relative_path != wanted {
                info!(
                    file = %file_name,
                    wanted = %wanted,
                    path = %relative_path,
                    "Artifact name already taken in this run; added a counter"
                );
            }

            produced.push(relative_path.clone());
            outcome.artifacts.push(OutputArtifact {
                customer,
                kind,
                source_file: file_name.to_string(),
                relative_path,
                content,
            });
        }

        outcome.report.processed.push(ProcessedFile {
            file: file_name.to_string(),
            customer,
            artifacts: produced,
        });
    }
}
