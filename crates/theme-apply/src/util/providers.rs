use std::env::VarError;
use std::path::PathBuf;

use super::directories;

/// A trait for accessing system and process context (env vars, home dir).
pub trait SystemProvider: EnvProvider + HomeProvider + std::fmt::Debug + Send + Sync + 'static {}

/// A trait for accessing environment variables.
///
/// This provides unit tests the capability to fake system context.
pub trait EnvProvider {
    fn var(&self, input: &str) -> Result<String, VarError>;
}

/// A trait for getting the home directory.
///
/// This provides unit tests the capability to fake system context.
pub trait HomeProvider {
    fn home(&self) -> Option<PathBuf>;
}

/// Provides real implementations for [EnvProvider] and [HomeProvider].
#[derive(Debug, Clone, Copy)]
pub struct RealProvider;

impl EnvProvider for RealProvider {
    fn var(&self, input: &str) -> Result<String, VarError> {
        std::env::var(input)
    }
}

impl HomeProvider for RealProvider {
    fn home(&self) -> Option<PathBuf> {
        directories::home_dir().ok()
    }
}

impl SystemProvider for RealProvider {}
