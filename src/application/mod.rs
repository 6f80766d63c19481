pub mod use_cases;

pub use use_cases::batch_orchestrator::{BatchOrchestrator, BatchOutcome};
pub use use_cases::field_extraction::FieldExtractor;
pub use use_cases::template_registry::TemplateRegistry;
