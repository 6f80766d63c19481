use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::domain::app_config::AppConfig;
use crate::domain::error::Result;
use crate::infrastructure::config::load_config;
use crate::interfaces::cli::{commands, CliArgs, Command};

pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&AppConfig::default().log_filter);
            error!("{}", err);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_filter);

    match dispatch(&args.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(2)
        }
    }
}

fn resolve_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = load_config(&args.config)?;
    args.apply_overrides(&mut config);
    config.check()?;
    Ok(config)
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(command: &Command, config: &AppConfig) -> Result<bool> {
    match command {
        Command::Batch(batch) => {
            commands::run_batch(config, &batch.input)?;
            Ok(true)
        }
        Command::Single(single) => {
            commands::run_single(config, &single.file)?;
            Ok(true)
        }
        Command::Inspect(inspect) => {
            commands::print_inspect(&inspect.file)?;
            Ok(true)
        }
        Command::CheckTemplates => commands::run_check_templates(config),
    }
}
