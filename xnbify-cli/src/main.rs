//! xnbify CLI - Command-line interface
//!
//! Converts a PNG/GIF/JPEG image, or every PNG in a directory, into XNB
//! texture assets.
//!
//! Exit codes: 0 on success, 1 for usage errors, 2 when a conversion fails.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use xnbify::config::{config_file_path, ConfigFile};

use commands::common::ProfileArg;
use commands::convert::ConvertArgs;
use error::{CliError, EXIT_USAGE};

#[derive(Debug, Parser)]
#[command(name = "xnbify")]
#[command(about = "Convert images into XNA/MonoGame XNB texture assets")]
#[command(version)]
struct Cli {
    /// Input image, or a directory of PNG files
    input: Option<PathBuf>,

    /// Output file or directory (defaults to INPUT with an .xnb extension;
    /// required when INPUT is a directory)
    output: Option<PathBuf>,

    /// Graphics profile recorded in the XNB header
    #[arg(short, long, value_enum)]
    profile: Option<ProfileArg>,

    /// Request a compressed XNB (not supported, always fails)
    #[arg(long)]
    compressed: bool,

    /// Re-read each written file and check it against the source image
    #[arg(long)]
    verify: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        match &err {
            CliError::Usage(_) => {
                eprintln!("error: {}", err);
                eprintln!();
                eprintln!("{}", Cli::command().render_usage());
            }
            _ => tracing::error!("{}", err),
        }
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Usage problems take precedence over a broken config file
    let input = cli
        .input
        .ok_or_else(|| CliError::Usage("no input path given".to_string()))?;

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = ConfigFile::load_from(&config_path);

    let config_level = config
        .as_ref()
        .ok()
        .and_then(|config| config.logging.level.as_deref());
    logging::init(cli.verbose, config_level);

    let config = config.map_err(|e| CliError::Config(e.to_string()))?;
    tracing::debug!(path = %config_path.display(), "Loaded configuration");

    commands::convert::run(
        ConvertArgs {
            input,
            output: cli.output,
            profile: cli.profile,
            compressed: cli.compressed,
            verify: cli.verify,
        },
        &config,
    )
}
