use std::path::PathBuf;

use tracing::warn;

use super::consts::env_var::CLI_DATA_DIR;
use super::error::UtilError;
use super::providers::EnvProvider;

const DATA_DIR_NAME: &str = "theme-apply";

type Result<T, E = UtilError> = std::result::Result<T, E>;

pub fn home_dir() -> Result<PathBuf, UtilError> {
    dirs::home_dir().ok_or(UtilError::MissingHomeDir)
}

/// Path to the local data directory.
pub fn data_dir(env: &impl EnvProvider) -> Result<PathBuf> {
    if let Ok(p) = env.var(CLI_DATA_DIR) {
        warn!(?p, "Using override env var for data directory");
        return Ok(PathBuf::from(p));
    }

    Ok(dirs::data_local_dir()
        .ok_or(UtilError::MissingDataLocalDir)?
        .join(DATA_DIR_NAME))
}

pub fn settings_path(env: &impl EnvProvider) -> Result<PathBuf> {
    Ok(data_dir(env)?.join("settings.json"))
}

/// Directory the log file is written to.
pub fn logs_dir(env: &impl EnvProvider) -> Result<PathBuf> {
    Ok(data_dir(env)?.join("logs"))
}
