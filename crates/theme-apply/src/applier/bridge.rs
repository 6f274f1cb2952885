use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
};

use async_trait::async_trait;
use thiserror::Error;

use super::intent::Intent;

/// What the device reports about an installed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    pub package: String,
    pub enabled: bool,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("the activity manager rejected the intent: {}", .0)]
    StartRejected(String),
    #[error("{}", .0)]
    Custom(String),
}

/// Capability to query packages and start activities on a device.
#[async_trait]
pub trait DeviceBridge: std::fmt::Debug + Send + Sync {
    /// Returns [None] when `package` is not installed.
    async fn application_info(&self, package: &str) -> Result<Option<ApplicationInfo>, BridgeError>;

    /// Dispatches `intent` without waiting for the target to handle it.
    async fn start_activity(&self, intent: &Intent) -> Result<(), BridgeError>;
}

/// [DeviceBridge] over an in-memory package table that records every started intent.
#[derive(Debug, Clone, Default)]
pub struct MockBridge {
    inner: Arc<Mutex<mock::Inner>>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(self, package: impl Into<String>, enabled: bool) -> Self {
        let package = package.into();
        self.lock().packages.insert(package.clone(), ApplicationInfo { package, enabled });
        self
    }

    /// Makes every subsequent [DeviceBridge::start_activity] fail.
    pub fn with_start_failure(self, message: impl Into<String>) -> Self {
        self.lock().start_failure = Some(message.into());
        self
    }

    pub fn started_intents(&self) -> Vec<Intent> {
        self.lock().started_intents.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, mock::Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl DeviceBridge for MockBridge {
    async fn application_info(&self, package: &str) -> Result<Option<ApplicationInfo>, BridgeError> {
        Ok(self.lock().packages.get(package).cloned())
    }

    async fn start_activity(&self, intent: &Intent) -> Result<(), BridgeError> {
        let mut inner = self.lock();
        if let Some(message) = &inner.start_failure {
            return Err(BridgeError::StartRejected(message.clone()));
        }
        inner.started_intents.push(intent.clone());
        Ok(())
    }
}

mod mock {
    use super::*;

    #[derive(Debug, Default)]
    pub(super) struct Inner {
        pub packages: HashMap<String, ApplicationInfo>,
        pub started_intents: Vec<Intent>,
        pub start_failure: Option<String>,
    }
}
