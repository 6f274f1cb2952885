//! Hands theme packages to the MIUI theme manager.

pub mod adb;
pub mod bridge;
pub mod intent;
pub mod prompt;

use bridge::{
    BridgeError,
    DeviceBridge,
};
use intent::Intent;
use prompt::{
    Dialog,
    DialogChoice,
    Prompter,
};
use thiserror::Error;
use tracing::{
    info,
    warn,
};

use crate::messages::{
    MessageCatalog,
    MessageId,
};
use crate::util::consts::THEME_MANAGER_PACKAGE;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("theme file path must be absolute on the device, got '{}'", .0)]
    RelativeThemePath(String),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result of [ThemeApplier::apply].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The apply intent was sent. The theme manager may still fail to apply the theme.
    Dispatched,
    /// The theme manager is not installed. Nothing was sent.
    NotInstalled,
    /// The theme manager is disabled. `opened_settings` is true when the user chose to go to its
    /// settings page to enable it.
    Disabled { opened_settings: bool },
}

impl ApplyOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, ApplyOutcome::Dispatched)
    }
}

#[derive(Debug)]
pub struct ThemeApplier<B, P> {
    bridge: B,
    prompter: P,
    messages: MessageCatalog,
}

impl<B: DeviceBridge, P: Prompter> ThemeApplier<B, P> {
    pub fn new(bridge: B, prompter: P, messages: MessageCatalog) -> Self {
        Self {
            bridge,
            prompter,
            messages,
        }
    }

    /// Sends the theme at `theme_file_path` to the theme manager, after checking that the theme
    /// manager is installed and enabled. Failed checks are reported to the user through the
    /// prompter and returned as an [ApplyOutcome] rather than an error.
    pub async fn apply(&self, theme_file_path: &str) -> Result<ApplyOutcome, ApplyError> {
        if !theme_file_path.starts_with('/') {
            return Err(ApplyError::RelativeThemePath(theme_file_path.to_string()));
        }

        let Some(app) = self.bridge.application_info(THEME_MANAGER_PACKAGE).await? else {
            warn!(package = THEME_MANAGER_PACKAGE, "theme manager is not installed");
            self.prompter.alert(&self.not_installed_dialog());
            return Ok(ApplyOutcome::NotInstalled);
        };

        if !app.enabled {
            warn!(package = THEME_MANAGER_PACKAGE, "theme manager is disabled");
            let opened_settings = match self.prompter.choose(&self.disabled_dialog()).await {
                DialogChoice::Positive => {
                    self.bridge
                        .start_activity(&Intent::application_details_settings(THEME_MANAGER_PACKAGE))
                        .await?;
                    self.prompter.toast(self.messages.get(MessageId::EnableHintToast));
                    true
                },
                DialogChoice::Negative => false,
            };
            return Ok(ApplyOutcome::Disabled { opened_settings });
        }

        self.bridge.start_activity(&Intent::apply_theme(theme_file_path)).await?;
        info!(theme_file_path, "apply theme intent dispatched");
        Ok(ApplyOutcome::Dispatched)
    }

    fn not_installed_dialog(&self) -> Dialog {
        Dialog {
            title: self.messages.get(MessageId::NotInstalledTitle).to_string(),
            message: self.messages.get(MessageId::NotInstalledMessage).to_string(),
            negative_button: self.messages.get(MessageId::Acknowledge).to_string(),
            positive_button: None,
        }
    }

    fn disabled_dialog(&self) -> Dialog {
        Dialog {
            title: self.messages.get(MessageId::DisabledTitle).to_string(),
            message: self.messages.get(MessageId::DisabledMessage).to_string(),
            negative_button: self.messages.get(MessageId::Cancel).to_string(),
            positive_button: Some(self.messages.get(MessageId::Enable).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::bridge::MockBridge;
    use crate::applier::intent::{
        ACTION_APPLICATION_DETAILS_SETTINGS,
        ACTION_MAIN,
        IntentFlags,
    };
    use crate::applier::prompt::RecordingPrompter;
    use crate::messages::Locale;

    const THEME_PATH: &str = "/sdcard/Download/Classic.mtz";

    fn applier(bridge: &MockBridge, prompter: &RecordingPrompter) -> ThemeApplier<MockBridge, RecordingPrompter> {
        ThemeApplier::new(bridge.clone(), prompter.clone(), MessageCatalog::new(Locale::En))
    }

    #[tokio::test]
    async fn test_apply_dispatches_intent() {
        let bridge = MockBridge::new().with_package(THEME_MANAGER_PACKAGE, true);
        let prompter = RecordingPrompter::new();

        let outcome = applier(&bridge, &prompter).apply(THEME_PATH).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Dispatched);
        assert!(outcome.is_dispatched());

        let intents = bridge.started_intents();
        assert_eq!(intents.len(), 1);
        let intent = &intents[0];
        assert_eq!(intent.action, ACTION_MAIN);
        let component = intent.component.as_ref().unwrap();
        assert_eq!(component.package, "com.android.thememanager");
        assert_eq!(component.class, "com.android.thememanager.ApplyThemeForScreenshot");
        assert!(intent.flags.contains(IntentFlags::ACTIVITY_NEW_TASK));
        assert_eq!(intent.extra("theme_file_path"), Some(THEME_PATH));
        assert_eq!(intent.extra("api_called_from"), Some("test"));

        assert!(prompter.alerts().is_empty());
        assert!(prompter.choices_shown().is_empty());
    }

    #[tokio::test]
    async fn test_apply_not_installed() {
        let bridge = MockBridge::new().with_package("com.miui.home", true);
        let prompter = RecordingPrompter::new();

        let outcome = applier(&bridge, &prompter).apply(THEME_PATH).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::NotInstalled);
        assert!(!outcome.is_dispatched());
        assert!(bridge.started_intents().is_empty());

        let alerts = prompter.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Error");
        assert_eq!(alerts[0].negative_button, "OK");
        assert_eq!(alerts[0].positive_button, None);
    }

    #[tokio::test]
    async fn test_apply_disabled_and_cancelled() {
        let bridge = MockBridge::new().with_package(THEME_MANAGER_PACKAGE, false);
        let prompter = RecordingPrompter::new().with_choice(DialogChoice::Negative);

        let outcome = applier(&bridge, &prompter).apply(THEME_PATH).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Disabled { opened_settings: false });
        assert!(bridge.started_intents().is_empty());
        assert!(prompter.toasts().is_empty());

        let shown = prompter.choices_shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Warning");
        assert_eq!(shown[0].negative_button, "Back");
        assert_eq!(shown[0].positive_button.as_deref(), Some("Enable"));
    }

    #[tokio::test]
    async fn test_apply_disabled_opens_settings() {
        let bridge = MockBridge::new().with_package(THEME_MANAGER_PACKAGE, false);
        let prompter = RecordingPrompter::new().with_choice(DialogChoice::Positive);

        let outcome = applier(&bridge, &prompter).apply(THEME_PATH).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Disabled { opened_settings: true });
        assert!(!outcome.is_dispatched());

        let intents = bridge.started_intents();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].action, ACTION_APPLICATION_DETAILS_SETTINGS);
        assert_eq!(intents[0].data.as_deref(), Some("package:com.android.thememanager"));
        assert_eq!(prompter.toasts(), vec!["Tap \"Enable\" below".to_string()]);
    }

    #[tokio::test]
    async fn test_apply_relative_path() {
        let bridge = MockBridge::new().with_package(THEME_MANAGER_PACKAGE, true);
        let prompter = RecordingPrompter::new();

        let err = applier(&bridge, &prompter).apply("Download/Classic.mtz").await.unwrap_err();
        assert!(matches!(err, ApplyError::RelativeThemePath(path) if path == "Download/Classic.mtz"));
        assert!(bridge.started_intents().is_empty());
    }

    #[tokio::test]
    async fn test_apply_bridge_failure() {
        let bridge = MockBridge::new()
            .with_package(THEME_MANAGER_PACKAGE, true)
            .with_start_failure("device offline");
        let prompter = RecordingPrompter::new();

        let err = applier(&bridge, &prompter).apply(THEME_PATH).await.unwrap_err();
        assert!(matches!(err, ApplyError::Bridge(BridgeError::StartRejected(_))), "{err:?}");
    }

    #[tokio::test]
    async fn test_dialog_texts_follow_locale() {
        let bridge = MockBridge::new();
        let prompter = RecordingPrompter::new();
        let applier = ThemeApplier::new(bridge, prompter.clone(), MessageCatalog::default());

        applier.apply(THEME_PATH).await.unwrap();
        assert_eq!(prompter.alerts()[0].title, "错误");
    }
}
