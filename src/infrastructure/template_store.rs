use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::application::use_cases::template_registry::TemplateRegistry;
use crate::domain::artifact::TemplateAsset;
use crate::domain::customer::{CustomerIdentity, TemplateKind};
use crate::domain::error::{AppError, Result};

/// `<templates_dir>/<Customer>/<Prefix>_<Customer>.<ext>`
pub fn template_path(templates_dir: &Path, customer: CustomerIdentity, kind: TemplateKind) -> PathBuf {
    templates_dir
        .join(customer.label())
        .join(kind.template_file_name(customer))
}

/// Load every template that exists on disk. Absent files are logged, not fatal;
/// the orchestrator reports them per intake file.
pub fn load_registry(templates_dir: &Path) -> Result<TemplateRegistry> {
    if !templates_dir.is_dir() {
        return Err(AppError::NotFound(format!(
            "Templates directory {} does not exist",
            templates_dir.display()
        )));
    }

    let mut registry = TemplateRegistry::new();
    for customer in CustomerIdentity::KNOWN {
        for kind in TemplateKind::ALL {
            let path = template_path(templates_dir, customer, kind);
            if !path.is_file() {
                warn!(
                    customer = %customer,
                    template = %kind,
                    path = %path.display(),
                    "Template not found"
                );
                continue;
            }

            let content = fs::read(&path).map_err(|e| {
                AppError::IoError(format!("Failed to read template {}: {e}", path.display()))
            })?;
            registry.insert(TemplateAsset::new(customer, kind, content));
        }
    }

    info!(
        templates = registry.len(),
        dir = %templates_dir.display(),
        "Loaded templates"
    );
    Ok(registry)
}
