use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::app_config::AppConfig;
use crate::domain::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "msamagi.toml";
pub const ENV_PREFIX: &str = "MSAMAGI_";

/// Defaults, then the TOML file (if present), then `MSAMAGI_*` variables.
pub fn figment(config_file: &Path) -> Figment {
    Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(config_file))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Extract without validating; callers apply CLI overrides first, then `check()`.
pub fn load_config(config_file: &Path) -> Result<AppConfig> {
    Ok(figment(config_file).extract()?)
}
