//! Configuration file support.
//!
//! Settings live in an INI file at `~/.config/xnbify/config.ini` (or the
//! platform equivalent). CLI arguments override config file values when
//! specified.
//!
//! ```ini
//! [texture]
//! profile = hidef
//! compressed = false
//!
//! [logging]
//! level = debug
//! ```

use std::path::{Path, PathBuf};

use ini::{Ini, Properties};
use thiserror::Error;

use crate::xnb::{EncodeOptions, Profile};

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A key holds a value that cannot be interpreted.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// `[texture]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureSettings {
    pub profile: Profile,
    pub compressed: bool,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// A `tracing` filter directive such as `info` or `xnbify=debug`.
    pub level: Option<String>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub texture: TextureSettings,
    pub logging: LoggingSettings,
}

/// Default location of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xnbify")
        .join("config.ini")
}

impl ConfigFile {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`; a missing file yields defaults.
    ///
    /// Unknown sections and keys are ignored.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("texture")) {
            if let Some(value) = section.get("profile") {
                config.texture.profile =
                    value
                        .parse()
                        .map_err(|reason| ConfigError::InvalidValue {
                            key: "texture.profile".to_string(),
                            value: value.to_string(),
                            reason,
                        })?;
            }
            if let Some(compressed) = parse_bool(section, "texture", "compressed")? {
                config.texture.compressed = compressed;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            config.logging.level = section
                .get("level")
                .map(str::trim)
                .filter(|level| !level.is_empty())
                .map(str::to_string);
        }

        Ok(config)
    }

    /// Encoding options described by the `[texture]` section.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new()
            .with_profile(self.texture.profile)
            .with_compressed(self.texture.compressed)
    }
}

fn parse_bool(section: &Properties, name: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    let Some(value) = section.get(key) else {
        return Ok(None);
    };
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            key: format!("{}.{}", name, key),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
