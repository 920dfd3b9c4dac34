//! Image file to XNB file conversion.
//!
//! This is the file-system side of the tool: it resolves input and output
//! paths, decodes images with the `image` crate, and hands canonical pixels
//! to the [`XnbTextureEncoder`]. Conversions are strictly sequential.
//!
//! A conversion that fails after its output file was created removes that
//! file again, so a failed run never leaves something that looks like a
//! valid container behind.

mod batch;
mod error;

pub use batch::{convert_directory, is_png, BatchReport};
pub use error::{ConvertError, ConvertResult};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use tracing::{debug, info, warn};

use crate::canonical::CanonicalImage;
use crate::texture::{TextureEncoder, XnbTextureEncoder};
use crate::xnb::{Counted, EncodeOptions, XnbTexture};

/// Extension given to converted files.
pub const OUTPUT_EXTENSION: &str = "xnb";

/// Settings for a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub encode: EncodeOptions,
    /// Re-read each written file and compare it against the source pixels.
    pub verify: bool,
}

impl ConvertOptions {
    pub fn new(encode: EncodeOptions) -> Self {
        Self {
            encode,
            verify: false,
        }
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Outcome of a single file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Bytes that reached the output file.
    pub bytes_written: u64,
}

/// What a CLI invocation resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionJob {
    /// Convert one image into one container.
    File { input: PathBuf, output: PathBuf },
    /// Convert every PNG in `input` into `output`.
    Directory { input: PathBuf, output: PathBuf },
}

impl ConversionJob {
    /// Work out what to convert and where to write it.
    ///
    /// Nothing is written here, so argument problems surface before any
    /// output exists.
    pub fn resolve(input: &Path, output: Option<&Path>) -> ConvertResult<Self> {
        let metadata = fs::metadata(input).map_err(|e| ConvertError::input_io(input, e))?;

        if metadata.is_dir() {
            let output = output.ok_or_else(|| {
                ConvertError::Usage(
                    "an output directory is required when the input is a directory".to_string(),
                )
            })?;
            if !output.is_dir() {
                return Err(ConvertError::Usage(format!(
                    "output path {} is not an existing directory",
                    output.display()
                )));
            }
            return Ok(ConversionJob::Directory {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            });
        }

        let output = match output {
            Some(dir) if dir.is_dir() => dir.join(output_file_name(input)),
            Some(path) => path.to_path_buf(),
            None => input.with_extension(OUTPUT_EXTENSION),
        };
        if output == input {
            return Err(ConvertError::Usage(format!(
                "output path {} would overwrite the input",
                output.display()
            )));
        }

        Ok(ConversionJob::File {
            input: input.to_path_buf(),
            output,
        })
    }

    /// Run the job, stopping at the first failure.
    pub fn run(&self, options: &ConvertOptions) -> ConvertResult<BatchReport> {
        match self {
            ConversionJob::File { input, output } => {
                let report = convert_file(input, output, options)?;
                Ok(BatchReport {
                    converted: vec![report],
                    skipped: 0,
                })
            }
            ConversionJob::Directory { input, output } => {
                convert_directory(input, output, options)
            }
        }
    }
}

/// `<stem>.xnb` for an input path.
pub fn output_file_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    Path::new(stem).with_extension(OUTPUT_EXTENSION)
}

/// Decode an image file, detecting the format from its contents.
pub fn decode_image(path: &Path) -> ConvertResult<DynamicImage> {
    let to_input_error = |source: image::ImageError| ConvertError::Input {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| ConvertError::input_io(path, e))?
        .with_guessed_format()
        .map_err(|e| ConvertError::input_io(path, e))?;
    debug!(path = %path.display(), format = ?reader.format(), "Decoding image");
    reader.decode().map_err(to_input_error)
}

/// Convert one image file into an XNB file.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConversionReport> {
    let decoded = decode_image(input)?;
    let image =
        CanonicalImage::from_dynamic(decoded).map_err(|e| ConvertError::from_texture(input, e))?;

    let encoder = XnbTextureEncoder::new(options.encode);
    let bytes_written = write_output(output, &image, &encoder)?;

    if options.verify {
        if let Err(err) = verify_output(output, &image) {
            discard_partial(output);
            return Err(err);
        }
        debug!(path = %output.display(), "Verified output");
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        width = image.width(),
        height = image.height(),
        "Converted {}",
        input.display()
    );

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        width: image.width(),
        height: image.height(),
        bytes_written,
    })
}

/// Encode `image` into a newly created file at `path`, returning the number
/// of bytes that reached the file.
fn write_output(
    path: &Path,
    image: &CanonicalImage,
    encoder: &dyn TextureEncoder,
) -> ConvertResult<u64> {
    let file = File::create(path).map_err(|source| ConvertError::Output {
        path: path.to_path_buf(),
        source,
    })?;

    let result = {
        let mut writer = BufWriter::new(Counted::new(file));
        let written = encoder
            .encode_to(image, &mut writer)
            .map_err(|e| ConvertError::from_texture(path, e))
            .and_then(|()| {
                writer.flush().map_err(|source| ConvertError::Output {
                    path: path.to_path_buf(),
                    source,
                })
            })
            .map(|()| writer.get_ref().position());
        written
    };

    if result.is_err() {
        discard_partial(path);
    }
    result
}

/// Remove a partially written output file.
fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "Failed to remove partial output");
    }
}

/// Check that the container at `path` decodes to exactly `expected`.
pub fn verify_output(path: &Path, expected: &CanonicalImage) -> ConvertResult<()> {
    let verify_error = |reason: String| ConvertError::Verify {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| verify_error(e.to_string()))?;
    let texture = XnbTexture::decode(&bytes).map_err(|e| verify_error(e.to_string()))?;

    if (texture.width, texture.height) != (expected.width(), expected.height()) {
        return Err(verify_error(format!(
            "dimensions {}×{} differ from source {}×{}",
            texture.width,
            texture.height,
            expected.width(),
            expected.height()
        )));
    }
    if texture.pixels() != expected.pixels() {
        return Err(verify_error("pixel data differs from source".to_string()));
    }
    Ok(())
}
