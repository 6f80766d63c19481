//! Command-line surface: argument parsing plus one handler per subcommand.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::app_config::AppConfig;
use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "msamagi",
    version,
    about = "Fill MSA contract and price-sheet templates from intake spreadsheets",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct CliArgs {
    /// TOML configuration file (missing file means defaults)
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the templates directory
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Override the results directory
    #[arg(long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Do not write report.json
    #[arg(long, global = true)]
    pub no_report: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process every intake workbook in a directory
    Batch(BatchArgs),
    /// Process one intake workbook
    Single(SingleArgs),
    /// Print the extracted fields and customer of one intake workbook as JSON
    Inspect(InspectArgs),
    /// List missing templates; exits non-zero when any is missing
    CheckTemplates,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Directory holding the intake workbooks (not searched recursively)
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SingleArgs {
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

impl CliArgs {
    /// Flags win over file and environment configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(templates) = &self.templates {
            config.templates_dir = templates.to_string_lossy().into_owned();
        }
        if let Some(output) = &self.output {
            config.results_dir = output.to_string_lossy().into_owned();
        }
        if self.no_report {
            config.write_report = false;
        }
    }
}
