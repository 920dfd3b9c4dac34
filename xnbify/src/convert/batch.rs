//! Directory (batch) conversion.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{
    convert_file, output_file_name, ConversionReport, ConvertError, ConvertOptions, ConvertResult,
};

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files converted, in processing order.
    pub converted: Vec<ConversionReport>,
    /// Directory entries that were not PNG files.
    pub skipped: usize,
}

/// Whether `path` has a `.png` extension, ignoring case.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Convert every PNG file directly inside `input_dir` into `output_dir`.
///
/// Files are processed one at a time in file name order. The first failure
/// aborts the whole batch; files converted before it are kept.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> ConvertResult<BatchReport> {
    let (inputs, skipped) = list_png_files(input_dir)?;
    check_unique_outputs(&inputs)?;
    info!(
        directory = %input_dir.display(),
        files = inputs.len(),
        skipped,
        "Converting directory"
    );

    let mut report = BatchReport {
        converted: Vec::with_capacity(inputs.len()),
        skipped,
    };
    for input in inputs {
        let output = output_dir.join(output_file_name(&input));
        report.converted.push(convert_file(&input, &output, options)?);
    }
    Ok(report)
}

/// Fail if two inputs would be written to the same output file, e.g.
/// `A.PNG` and `A.png` on a case-sensitive filesystem.
fn check_unique_outputs(inputs: &[PathBuf]) -> ConvertResult<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    for input in inputs {
        if let Some(first) = seen.insert(output_file_name(input), input) {
            return Err(ConvertError::Usage(format!(
                "{} and {} would both be written to {}",
                first.display(),
                input.display(),
                output_file_name(input).display()
            )));
        }
    }
    Ok(())
}

/// Sorted PNG files in `dir`, plus the number of other entries.
fn list_png_files(dir: &Path) -> ConvertResult<(Vec<PathBuf>, usize)> {
    let entries = fs::read_dir(dir).map_err(|e| ConvertError::input_io(dir, e))?;

    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::input_io(dir, e))?.path();
        if path.is_file() && is_png(&path) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-PNG entry");
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}
