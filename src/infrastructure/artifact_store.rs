use crate::domain::artifact::OutputArtifact;
use crate::domain::batch_report::BatchReport;
use crate::domain::customer::{CustomerIdentity, TemplateKind};
use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::info;
use uuid::Uuid;

pub const REPORT_FILE_NAME: &str = "report.json";

fn io_err(msg: impl Into<String>) -> AppError {
    AppError::IoError(msg.into())
}

fn invalid_input(msg: impl Into<String>) -> AppError {
    AppError::ValidationError(msg.into())
}

/// One written artifact as listed in `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub path: String,
    pub customer: CustomerIdentity,
    pub kind: TemplateKind,
    pub source_file: String,
    pub bytes: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    #[serde(flatten)]
    pub report: BatchReport,
    pub artifacts: Vec<StoredArtifact>,
}

/// Results root; every artifact lands at `<root>/<relative_path>`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a forward-slash relative path onto the results root. Absolute paths and
    /// any `..`/root component are rejected.
    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf> {
        let relative = Path::new(relative_path);
        if relative_path.is_empty() || relative.is_absolute() {
            return Err(invalid_input(format!(
                "Artifact path must be relative: {relative_path:?}"
            )));
        }
        for component in relative.components() {
            if !matches!(component, Component::Normal(_)) {
                return Err(invalid_input(format!(
                    "Artifact path escapes the results directory: {relative_path:?}"
                )));
            }
        }
        Ok(self.root.join(relative))
    }

    pub fn write_artifact(&self, artifact: &OutputArtifact) -> Result<StoredArtifact> {
        let path = self.resolve(&artifact.relative_path)?;
        atomic_write_bytes(&path, &artifact.content)?;
        info!(path = %path.display(), bytes = artifact.content.len(), "Wrote artifact");

        Ok(StoredArtifact {
            path: artifact.relative_path.clone(),
            customer: artifact.customer,
            kind: artifact.kind,
            source_file: artifact.source_file.clone(),
            bytes: artifact.content.len(),
            sha256: sha256_hex(&artifact.content),
        })
    }

    pub fn write_artifacts(&self, artifacts: &[OutputArtifact]) -> Result<Vec<StoredArtifact>> {
        ensure_dir(&self.root)?;
        artifacts
            .iter()
            .map(|artifact| self.write_artifact(artifact))
            .collect()
    }

    pub fn write_report(&self, report: &BatchReport, artifacts: Vec<StoredArtifact>) -> Result<PathBuf> {
        let manifest = RunManifest {
            report: report.clone(),
            artifacts,
        };
        let json = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| AppError::Internal(format!("Failed to serialise report: {e}")))?;

        let path = self.root.join(REPORT_FILE_NAME);
        atomic_write_bytes(&path, &json)?;
        Ok(path)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| io_err(format!("Failed to create dir {}: {e}", path.display())))?;
    Ok(())
}

pub fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| invalid_input(format!("Not a file path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp-{}", Uuid::new_v4()));
    {
        let mut file = fs::File::create(&tmp_path).map_err(|e| {
            io_err(format!(
                "Failed to create temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        file.write_all(bytes).map_err(|e| {
            io_err(format!(
                "Failed to write temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        file.sync_all().ok();
    }

    // Rename cannot replace on Windows; move the old file aside first.
    if path.exists() {
        let backup = path.with_file_name(format!(".{file_name}.bak-{}", Uuid::new_v4()));
        fs::rename(path, &backup).map_err(|e| {
            io_err(format!(
                "Failed to move existing file {} to {}: {e}",
                path.display(),
                backup.display()
            ))
        })?;
        let renamed = fs::rename(&tmp_path, path);
        let _ = fs::remove_file(&backup);
        renamed.map_err(|e| {
            io_err(format!(
                "Failed to rename temp file {} to {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })
    } else {
        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            io_err(format!(
                "Failed to rename temp file {} to {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
