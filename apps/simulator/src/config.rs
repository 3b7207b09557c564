use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use shared::config::{CarouselConfig, TrackerConfig};

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";
pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tracker: TrackerConfig,
    pub carousel: CarouselConfig,
}

/// Layers built-in defaults, then the TOML file, then `APP__*` environment
/// variables (`APP__CAROUSEL__AUTOPLAY_PERIOD_MS=2000`).
///
/// An explicitly passed path must exist; the default `folio.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    Config::builder()
        .add_source(
            File::from(file.as_path())
                .format(FileFormat::Toml)
                .required(path.is_some()),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read configuration from '{}'", file.display()))?
        .try_deserialize::<Settings>()
        .context("invalid simulator configuration")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
