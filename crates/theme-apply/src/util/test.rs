//! Module for common testing utilities

use std::collections::HashMap;
use std::env::VarError;
use std::path::{
    Path,
    PathBuf,
};

use super::providers::{
    EnvProvider,
    HomeProvider,
    SystemProvider,
};

/// A [SystemProvider] with a fake environment and home directory.
#[derive(Debug, Clone, Default)]
pub struct TestProvider {
    env: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl TestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_base(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref().to_path_buf();
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), home.to_string_lossy().to_string());
        Self { env, home: Some(home) }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl EnvProvider for TestProvider {
    fn var(&self, input: &str) -> Result<String, VarError> {
        self.env.get(input).cloned().ok_or(VarError::NotPresent)
    }
}

impl HomeProvider for TestProvider {
    fn home(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

impl SystemProvider for TestProvider {}
