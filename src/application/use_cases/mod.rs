pub mod artifact_naming;
pub mod batch_orchestrator;
pub mod customer_classifier;
pub mod field_extraction;
pub mod substitution;
pub mod template_registry;
