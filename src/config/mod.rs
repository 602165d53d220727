//! Configuration management module

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::model::Config;

/// Resolve which config file to read: an explicit path wins over the default location
pub fn config_file(path_override: Option<&Path>) -> PathBuf {
    path_override
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path)
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config(path_override: Option<&Path>) -> Result<Config> {
    let path = config_file(path_override);
    log::debug!("loading config from {}", path.display());
    Config::load_from(&path)
}
