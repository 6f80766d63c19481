use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::artifact::{has_extension, IntakeFile};
use crate::domain::batch_report::BatchWarning;
use crate::domain::error::{AppError, Result};

/// Intake files read from one directory, plus the entries that could not be read.
#[derive(Debug, Default)]
pub struct IntakeListing {
    pub files: Vec<IntakeFile>,
    pub unreadable: Vec<BatchWarning>,
}

/// Files directly under `input_dir` ending with `extension`, sorted by name.
///
/// Only a missing or unlistable directory is an error. A single entry that cannot
/// be read becomes an `UnreadableSource` warning and the rest are still returned.
pub fn collect_intake_files(input_dir: &Path, extension: &str) -> Result<IntakeListing> {
    let entries = fs::read_dir(input_dir).map_err(|e| {
        AppError::IoError(format!("Failed to read dir {}: {e}", input_dir.display()))
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %input_dir.display(), "Skipping unlistable entry: {}", err);
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !has_extension(&name, extension) {
            debug!(file = %name, "Ignoring non-intake file");
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut listing = IntakeListing::default();
    for path in &paths {
        match read_intake_file(path) {
            Ok(file) => listing.files.push(file),
            Err(err) => {
                let file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                listing.unreadable.push(BatchWarning::UnreadableSource {
                    file,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(listing)
}

pub fn read_intake_file(path: &Path) -> Result<IntakeFile> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::ValidationError(format!("Not a file path: {}", path.display())))?;
    let content = fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {e}", path.display())))?;
    Ok(IntakeFile::new(file_name, content))
}
