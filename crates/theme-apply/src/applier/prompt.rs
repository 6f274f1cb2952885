use std::sync::{
    Arc,
    Mutex,
};

use anstream::eprintln;
use async_trait::async_trait;
use crossterm::style::Stylize;
use tracing::warn;

/// A modal dialog with one or two buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    /// Dismisses the dialog.
    pub negative_button: String,
    /// Present only for dialogs that offer an action.
    pub positive_button: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Negative,
    Positive,
}

/// Capability to show dialogs and toasts to the user.
#[async_trait]
pub trait Prompter: std::fmt::Debug + Send + Sync {
    /// Shows a dialog that can only be acknowledged.
    fn alert(&self, dialog: &Dialog);

    /// Shows a dialog and waits until the user picks a button.
    async fn choose(&self, dialog: &Dialog) -> DialogChoice;

    /// Shows a short notification that needs no interaction.
    fn toast(&self, message: &str);
}

/// Renders dialogs on stderr and reads choices from the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
    assume_yes: bool,
}

impl TerminalPrompter {
    /// Without an interactive terminal every choice resolves to [DialogChoice::Negative].
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            assume_yes: false,
        }
    }

    /// Picks [DialogChoice::Positive] without asking.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    fn render(dialog: &Dialog) {
        eprintln!();
        eprintln!("{}", dialog.title.as_str().yellow().bold());
        for line in dialog.message.lines() {
            eprintln!("  {line}");
        }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    fn alert(&self, dialog: &Dialog) {
        Self::render(dialog);
        eprintln!("  [{}]", dialog.negative_button);
    }

    async fn choose(&self, dialog: &Dialog) -> DialogChoice {
        Self::render(dialog);
        let Some(positive) = &dialog.positive_button else {
            eprintln!("  [{}]", dialog.negative_button);
            return DialogChoice::Negative;
        };

        if self.assume_yes {
            eprintln!("  > {positive}");
            return DialogChoice::Positive;
        }
        if !self.interactive {
            eprintln!("  > {}", dialog.negative_button);
            return DialogChoice::Negative;
        }

        // dialoguer reads the terminal synchronously.
        let items = [dialog.negative_button.clone(), positive.clone()];
        let selection = tokio::task::spawn_blocking(move || {
            dialoguer::Select::new().items(&items).default(0).interact_opt()
        })
        .await;
        match selection {
            Ok(Ok(Some(1))) => DialogChoice::Positive,
            Ok(Ok(_)) => DialogChoice::Negative,
            Ok(Err(err)) => {
                warn!(?err, "failed to read dialog choice");
                DialogChoice::Negative
            },
            Err(err) => {
                warn!(?err, "dialog prompt task failed");
                DialogChoice::Negative
            },
        }
    }

    fn toast(&self, message: &str) {
        eprintln!("{}", message.dim());
    }
}

/// [Prompter] that records what was shown and answers choices from a script.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrompter {
    inner: Arc<Mutex<recording::Inner>>,
}

impl RecordingPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer to the next [Prompter::choose] call. Unscripted choices are negative.
    pub fn with_choice(self, choice: DialogChoice) -> Self {
        self.lock().choices.push(choice);
        self
    }

    pub fn alerts(&self) -> Vec<Dialog> {
        self.lock().alerts.clone()
    }

    pub fn choices_shown(&self) -> Vec<Dialog> {
        self.lock().choices_shown.clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.lock().toasts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, recording::Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Prompter for RecordingPrompter {
    fn alert(&self, dialog: &Dialog) {
        self.lock().alerts.push(dialog.clone());
    }

    async fn choose(&self, dialog: &Dialog) -> DialogChoice {
        let mut inner = self.lock();
        inner.choices_shown.push(dialog.clone());
        if inner.choices.is_empty() {
            DialogChoice::Negative
        } else {
            inner.choices.remove(0)
        }
    }

    fn toast(&self, message: &str) {
        self.lock().toasts.push(message.to_string());
    }
}

mod recording {
    use super::*;

    #[derive(Debug, Default)]
    pub(super) struct Inner {
        pub choices: Vec<DialogChoice>,
        pub alerts: Vec<Dialog>,
        pub choices_shown: Vec<Dialog>,
        pub toasts: Vec<String>,
    }
}
