//! Convert command - turn an image or a directory of PNGs into XNB files.

use std::path::PathBuf;

use xnbify::config::ConfigFile;
use xnbify::convert::{BatchReport, ConversionJob, ConvertOptions};

use super::common::{resolve_encode_options, ProfileArg};
use crate::error::CliError;

/// Arguments for the convert command.
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub profile: Option<ProfileArg>,
    pub compressed: bool,
    pub verify: bool,
}

/// Run the convert command.
pub fn run(args: ConvertArgs, config: &ConfigFile) -> Result<(), CliError> {
    let encode = resolve_encode_options(args.profile, args.compressed, config);
    let options = ConvertOptions::new(encode).with_verify(args.verify);

    let job = ConversionJob::resolve(&args.input, args.output.as_deref())?;
    tracing::debug!(?job, ?options, "Resolved conversion");

    let report = job.run(&options)?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    for file in &report.converted {
        println!(
            "{} -> {} ({}×{}, {} bytes)",
            file.input.display(),
            file.output.display(),
            file.width,
            file.height,
            file.bytes_written
        );
    }
    if report.converted.len() != 1 || report.skipped > 0 {
        println!(
            "Converted {} file(s), skipped {} non-PNG entr{}",
            report.converted.len(),
            report.skipped,
            if report.skipped == 1 { "y" } else { "ies" }
        );
    }
}
