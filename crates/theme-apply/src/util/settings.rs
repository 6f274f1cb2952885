use std::collections::HashMap;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    trace,
};

use super::directories;
use super::error::{
    ErrorContext as _,
    UtilError,
};
use super::providers::EnvProvider;
use crate::messages::{
    Locale,
    MessageId,
};

/// User settings read from `settings.json` under the data directory.
///
/// Every field is optional. A missing file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base url of the theme download API, the token is appended to it.
    pub api_base_url: Option<String>,
    /// Value sent as the `miuiUIVersion` query parameter.
    pub ui_version: Option<String>,
    /// Locale used for dialogs and toasts.
    pub locale: Option<Locale>,
    /// Path to the adb executable. Tilde and env vars are expanded.
    pub adb_path: Option<String>,
    /// Serial of the device to talk to when more than one is connected.
    pub adb_serial: Option<String>,
    /// Replacement texts keyed by message id.
    pub messages: HashMap<MessageId, String>,
}

impl Settings {
    /// Loads the settings file from the data directory.
    pub async fn load(env: &impl EnvProvider) -> Result<Self, UtilError> {
        let path = directories::settings_path(env)?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self, UtilError> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("failed to check for settings at {}", path.display()))?
        {
            debug!(?path, "no settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_json::from_str(&content).with_context(|| format!("invalid settings file {}", path.display()))?;
        trace!(?settings, "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_settings_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(dir.path().join("settings.json")).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(
            &path,
            r#"{
                "api_base_url": "http://localhost:8080/thm/download/v2/",
                "locale": "en",
                "adb_serial": "emulator-5554",
                "messages": { "hash_unavailable": "n/a" },
                "unknown_key": true
            }"#,
        )
        .await
        .unwrap();

        let settings = Settings::load_from(&path).await.unwrap();
        assert_eq!(
            settings.api_base_url.as_deref(),
            Some("http://localhost:8080/thm/download/v2/")
        );
        assert_eq!(settings.locale, Some(Locale::En));
        assert_eq!(settings.adb_serial.as_deref(), Some("emulator-5554"));
        assert_eq!(settings.ui_version, None);
        assert_eq!(
            settings.messages.get(&MessageId::HashUnavailable).map(String::as_str),
            Some("n/a")
        );
    }

    #[tokio::test]
    async fn test_invalid_settings_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = Settings::load_from(&path).await.unwrap_err();
        assert!(matches!(err, UtilError::JsonWithContext { .. }), "{err:?}");
    }
}
