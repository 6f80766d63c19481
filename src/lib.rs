mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
mod shared;

pub use app::run;
pub use application::{BatchOrchestrator, BatchOutcome, FieldExtractor, TemplateRegistry};
pub use domain::artifact::{IntakeFile, OutputArtifact, TemplateAsset};
pub use domain::batch_report::{BatchReport, BatchWarning};
pub use domain::customer::{CustomerIdentity, TemplateKind};
pub use domain::error::{AppError, Result};
pub use domain::intake::IntakeRecord;
