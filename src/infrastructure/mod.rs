pub mod artifact_store;
pub mod config;
pub mod storage;
pub mod template_store;
