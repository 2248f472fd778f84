//! Command-line front end for the badge engine.
//!
//! Set `BADGESMITH_LOG` (e.g. `debug`) to see engine events on stderr.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use badgesmith::{
    AchievementItem, Color, ConfigError, ContrastLevel, EngineConfig, ExportArgs,
    ExportCodec, ExportError, IconConfig, PairContrast, PublishScope, ValidationReport,
    adjust_color_for_contrast, validate_for_draft, validate_for_publish,
};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BADGESMITH_LOG";

#[derive(Debug, Parser)]
#[command(name = "badgesmith", version, about = "Badge definition tools")]
struct Cli {
    /// Engine config file (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of an icon config.
    Normalize { file: PathBuf },

    /// Report the contrast between two colours.
    Contrast { foreground: Color, background: Color },

    /// Wrap a badge in an interchange document.
    Export {
        badge: PathBuf,
        #[arg(long)]
        user: String,
        #[arg(long)]
        tenant: Option<String>,
    },

    /// Extract the badge from an interchange document.
    Import {
        export: PathBuf,
        #[arg(long)]
        id: String,
    },

    /// Check a badge for publishing, or for drafting with `--draft`.
    Validate {
        badge: PathBuf,
        #[arg(long)]
        draft: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Normalize { file } => {
            let icon: IconConfig = read_json(&file)?;
            print_json(&icon)?;
        }
        Command::Contrast {
            foreground,
            background,
        } => {
            let pair = PairContrast::measure(foreground, background);
            println!("ratio: {:.2}", pair.ratio);
            println!("level: {}", pair.level);
            if pair.ratio < config.contrast_target {
                let adjustment =
                    adjust_color_for_contrast(foreground, background, config.contrast_target);
                let verdict = if adjustment.achieved_target {
                    "meets target"
                } else {
                    "best found"
                };
                println!(
                    "suggestion: {} ({:.2}, {})",
                    adjustment.color, adjustment.ratio, verdict
                );
            }
            if pair.level == ContrastLevel::Fail {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Export {
            badge,
            user,
            tenant,
        } => {
            let item: AchievementItem = read_json(&badge)?;
            let scope = match tenant {
                Some(tenant_id) => PublishScope::Tenant { tenant_id },
                None => PublishScope::Global,
            };
            let args = ExportArgs::new(&item, user)
                .with_tool(config.export_tool.as_str())
                .with_scope(scope);
            let export = ExportCodec::new()?.build_export(args)?;
            println!("{}", export.to_json_pretty()?);
        }
        Command::Import { export, id } => {
            let json = read_text(&export)?;
            let item = ExportCodec::new()?.extract_badge_item(&id, &json)?;
            print_json(&item)?;
        }
        Command::Validate { badge, draft } => {
            let item: AchievementItem = read_json(&badge)?;
            let report = if draft {
                validate_for_draft(&item, &config.rules)
            } else {
                validate_for_publish(&item, &config.rules)
            };
            return Ok(print_report(&report));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &ValidationReport) -> ExitCode {
    if report.is_valid() {
        println!("ok");
        return ExitCode::SUCCESS;
    }
    for violation in &report.violations {
        println!("{violation}");
    }
    ExitCode::FAILURE
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
