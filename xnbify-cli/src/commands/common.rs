//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use xnbify::config::ConfigFile;
use xnbify::xnb::{EncodeOptions, Profile};

/// Graphics profile selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProfileArg {
    /// Reach profile (broad hardware compatibility)
    Reach,
    /// HiDef profile (full XNA 4.0 feature set)
    Hidef,
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Reach => Profile::Reach,
            ProfileArg::Hidef => Profile::HiDef,
        }
    }
}

/// Resolve encoding options from CLI args and config.
pub fn resolve_encode_options(
    cli_profile: Option<ProfileArg>,
    cli_compressed: bool,
    config: &ConfigFile,
) -> EncodeOptions {
    let from_config = config.encode_options();

    // CLI takes precedence, then config
    let profile = cli_profile
        .map(Profile::from)
        .unwrap_or(from_config.profile);

    from_config
        .with_profile(profile)
        .with_compressed(cli_compressed || from_config.compressed)
}
