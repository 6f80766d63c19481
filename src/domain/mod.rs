pub mod app_config;
pub mod artifact;
pub mod batch_report;
pub mod customer;
pub mod error;
pub mod intake;
pub mod placeholder;
