use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::application::use_cases::batch_orchestrator::{BatchOrchestrator, BatchOutcome};
use crate::application::use_cases::customer_classifier::classify;
use crate::application::use_cases::field_extraction::FieldExtractor;
use crate::domain::app_config::AppConfig;
use crate::domain::batch_report::BatchReport;
use crate::domain::customer::CustomerIdentity;
use crate::domain::error::{AppError, Result};
use crate::domain::intake::IntakeRecord;
use crate::infrastructure::artifact_store::ArtifactStore;
use crate::infrastructure::storage::{collect_intake_files, read_intake_file};
use crate::infrastructure::template_store::{load_registry, template_path};

#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub file: String,
    pub customer: CustomerIdentity,
    pub record: IntakeRecord,
}

pub fn run_batch(config: &AppConfig, input_dir: &Path) -> Result<BatchReport> {
    let registry = load_registry(Path::new(&config.templates_dir))?;
    let listing = collect_intake_files(input_dir, &config.intake_extension)?;
    info!(
        files = listing.files.len(),
        unreadable = listing.unreadable.len(),
        input = %input_dir.display(),
        "Starting batch"
    );

    let mut outcome = BatchOrchestrator::new(&registry)
        .with_intake_extension(config.intake_extension.as_str())
        .process_batch(&listing.files);
    for warning in listing.unreadable {
        warn!(file = %warning.file(), "{}", warning);
        outcome.report.warn(warning);
    }
    persist(config, outcome)
}

pub fn run_single(config: &AppConfig, file: &Path) -> Result<BatchReport> {
    let registry = load_registry(Path::new(&config.templates_dir))?;
    let intake = read_intake_file(file)?;

    let outcome = BatchOrchestrator::new(&registry)
        .with_intake_extension(config.intake_extension.as_str())
        .process_single(&intake.content, &intake.file_name);
    persist(config, outcome)
}

pub fn run_inspect(file: &Path) -> Result<InspectOutput> {
    let intake = read_intake_file(file)?;
    let record = FieldExtractor::new().extract_workbook(&intake.content)?;
    let customer = classify(&record.customer_name, &record.discriminator_value);
    Ok(InspectOutput {
        file: intake.file_name,
        customer,
        record,
    })
}

pub fn print_inspect(file: &Path) -> Result<()> {
    let output = run_inspect(file)?;
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| AppError::Internal(format!("Failed to serialise record: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Returns `true` when every known customer has both templates.
pub fn run_check_templates(config: &AppConfig) -> Result<bool> {
    let templates_dir = Path::new(&config.templates_dir);
    let registry = load_registry(templates_dir)?;
    let missing = registry.missing_templates();

    for (customer, kind) in &missing {
        println!(
            "missing: {}",
            template_path(templates_dir, *customer, *kind).display()
        );
    }
    if missing.is_empty() {
        println!("all {} templates present", registry.len());
    }
    Ok(missing.is_empty())
}

fn persist(config: &AppConfig, outcome: BatchOutcome) -> Result<BatchReport> {
    let store = ArtifactStore::new(&config.results_dir);
    let stored = store.write_artifacts(&outcome.artifacts)?;

    if config.write_report {
        let path = store.write_report(&outcome.report, stored)?;
        info!(path = %path.display(), "Wrote run report");
    }

    for skipped in &outcome.report.skipped {
        warn!(file = %skipped.file, "Skipped: {}", skipped.reason);
    }
    if outcome.report.processed.is_empty() && !outcome.report.skipped.is_empty() {
        error!("No intake file could be processed");
    }
    info!(
        results = %store.root().display(),
        "{}",
        outcome.report.summary()
    );

    Ok(outcome.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::batch_report::BatchWarning;
    use crate::domain::customer::TemplateKind;
    use crate::shared::test_fixtures::{contract_template, intake_for, SheetFixture};
    use std::fs;

    fn write_templates(dir: &Path, customer: CustomerIdentity) {
        let contract = template_path(dir, customer, TemplateKind::Contract);
        fs::create_dir_all(contract.parent().unwrap()).unwrap();
        fs::write(&contract, contract_template(&[&["--::HYRESVARD::--"]])).unwrap();
        fs::write(
            template_path(dir, customer, TemplateKind::PriceSheet),
            SheetFixture::new().text("A1", "--::TENANT_DESC::--").build(),
        )
        .unwrap();
    }

    fn config_for(root: &Path) -> AppConfig {
        AppConfig {
            templates_dir: root.join("templates").to_string_lossy().into_owned(),
            results_dir: root.join("results").to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_batch_writes_artifacts_and_report() {
        let root = tempfile::tempdir().unwrap();
        let config = config_for(root.path());
        write_templates(Path::new(&config.templates_dir), CustomerIdentity::Telia);

        let inbox = root.path().join("inbox");
        fs::create_dir_all(&inbox).unwrap();
        fs::write(inbox.join("a.xlsx"), intake_for("Telia", "Site 1", "Brf Eken")).unwrap();
        fs::write(inbox.join("b.xlsx"), intake_for("Acme", "Site 2", "Brf Ek")).unwrap();

        let report = run_batch(&config, &inbox).unwrap();

        assert_eq!(report.processed.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        let results = Path::new(&config.results_dir);
        assert!(results.join("Telia/Avtalsmall_Brf_Eken_Site_1_Telia.docx").is_file());
        assert!(results.join("Telia/Prisberakningsmall_Brf_Eken_Site_1_Telia.xlsx").is_file());

        let report: serde_json::Value =
            serde_json::from_slice(&fs::read(results.join("report.json")).unwrap()).unwrap();
        assert_eq!(report["artifacts"].as_array().unwrap().len(), 2);
        assert_eq!(report["skipped"][0]["file"], "b.xlsx");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_batch_continues_past_unreadable_file() {
        let root = tempfile::tempdir().unwrap();
        let config = config_for(root.path());
        write_templates(Path::new(&config.templates_dir), CustomerIdentity::Telia);

        let inbox = root.path().join("inbox");
        fs::create_dir_all(&inbox).unwrap();
        fs::write(inbox.join("a.xlsx"), intake_for("Telia", "Site 1", "Brf Eken")).unwrap();
        std::os::unix::fs::symlink(inbox.join("missing.xlsx"), inbox.join("b.xlsx")).unwrap();
        fs::write(inbox.join("c.xlsx"), intake_for("Telia", "Site 3", "Brf Ek")).unwrap();

        let report = run_batch(&config, &inbox).unwrap();

        assert_eq!(report.processed.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, "b.xlsx");
        assert!(matches!(
            &report.warnings[0],
            BatchWarning::UnreadableSource { file, .. } if file == "b.xlsx"
        ));
    }

    #[test]
    fn test_run_single_without_report() {
        let root = tempfile::tempdir().unwrap();
        let config = AppConfig {
            write_report: false,
            ..config_for(root.path())
        };
        write_templates(Path::new(&config.templates_dir), CustomerIdentity::Hi3g);
        let file = root.path().join("upload.xlsx");
        fs::write(&file, intake_for("Hi3G Access", "Site", "Landlord")).unwrap();

        let report = run_single(&config, &file).unwrap();
        assert!(report.warnings.is_empty());
        let results = Path::new(&config.results_dir);
        assert!(results.join("Hi3G").is_dir());
        assert!(!results.join("report.json").exists());
    }

    #[test]
    fn test_run_inspect_classifies() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("intake.xlsx");
        fs::write(&file, intake_for("XYZ 3GIS AB", "Site", "Landlord")).unwrap();

        let output = run_inspect(&file).unwrap();
        assert_eq!(output.customer, CustomerIdentity::ThreeGis);
        assert_eq!(output.record.tenant_description, "Site");
        assert_eq!(output.file, "intake.xlsx");
    }

    #[test]
    fn test_check_templates_reports_gaps() {
        let root = tempfile::tempdir().unwrap();
        let config = config_for(root.path());
        write_templates(Path::new(&config.templates_dir), CustomerIdentity::Telia);
        assert!(!run_check_templates(&config).unwrap());

        write_templates(Path::new(&config.templates_dir), CustomerIdentity::Hi3g);
        write_templates(Path::new(&config.templates_dir), CustomerIdentity::ThreeGis);
        assert!(run_check_templates(&config).unwrap());
    }
}
