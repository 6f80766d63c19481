use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::customer::{CustomerIdentity, TemplateKind};

/// One intake workbook as delivered by the caller.
#[derive(Debug, Clone)]
pub struct IntakeFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl IntakeFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// Case-insensitive match of `file_name` against an extension such as `.xlsx`.
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .to_lowercase()
        .ends_with(&extension.to_lowercase())
}

/// Template bytes for one `(customer, kind)` pair. Cheap to clone, never mutated.
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    pub customer: CustomerIdentity,
    pub kind: TemplateKind,
    pub content: Arc<[u8]>,
}

impl TemplateAsset {
    pub fn new(customer: CustomerIdentity, kind: TemplateKind, content: Vec<u8>) -> Self {
        Self {
            customer,
            kind,
            content: Arc::from(content),
        }
    }
}

/// A filled contract or price sheet, addressed by a path relative to the results root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputArtifact {
    pub customer: CustomerIdentity,
    pub kind: TemplateKind,
    pub source_file: String,
    /// `<Customer>/<file name>`, always forward slashes
    pub relative_path: String,
    #[serde(skip)]
    pub content: Vec<u8>,
}
