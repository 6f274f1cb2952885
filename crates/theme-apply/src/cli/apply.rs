use std::io::IsTerminal as _;
use std::process::ExitCode;

use anstream::println;
use clap::Args;
use crossterm::style::Stylize;
use eyre::{
    Result,
    WrapErr,
};
use theme_apply::applier::adb::{
    AdbBridge,
    DEFAULT_ADB,
};
use theme_apply::applier::prompt::TerminalPrompter;
use theme_apply::applier::{
    ApplyOutcome,
    ThemeApplier,
};
use theme_apply::util::consts::env_var::ADB_PATH;
use theme_apply::util::path::expand_path;
use theme_apply::util::providers::{
    RealProvider,
    SystemProvider,
};
use theme_apply::util::settings::Settings;

use super::CliContext;

#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Absolute path of the theme file (.mtz) on the device
    path: String,
    /// Serial of the target device, required when several devices are connected
    #[arg(long, short)]
    serial: Option<String>,
    /// Path to the adb executable
    #[arg(long)]
    adb: Option<String>,
    /// Answer yes to every dialog
    #[arg(long, short)]
    yes: bool,
}

impl ApplyArgs {
    pub async fn execute(self, ctx: &CliContext) -> Result<ExitCode> {
        let bridge = AdbBridge::new(self.adb_path(&ctx.settings, &RealProvider)?)
            .with_serial(self.serial.clone().or_else(|| ctx.settings.adb_serial.clone()));
        let prompter = TerminalPrompter::new(std::io::stdin().is_terminal()).assume_yes(self.yes);
        let applier = ThemeApplier::new(bridge, prompter, ctx.messages.clone());

        let outcome = applier.apply(&self.path).await.wrap_err("failed to apply the theme")?;
        match outcome {
            ApplyOutcome::Dispatched => {
                println!("{} {}", "Sent to the theme manager:".green(), self.path);
                Ok(ExitCode::SUCCESS)
            },
            ApplyOutcome::NotInstalled | ApplyOutcome::Disabled { .. } => Ok(ExitCode::FAILURE),
        }
    }

    /// The flag wins over the env var, which wins over the settings file.
    fn adb_path(&self, settings: &Settings, sys: &impl SystemProvider) -> Result<String> {
        let adb = self
            .adb
            .clone()
            .or_else(|| sys.var(ADB_PATH).ok())
            .or_else(|| settings.adb_path.clone())
            .unwrap_or_else(|| DEFAULT_ADB.to_string());
        Ok(expand_path(&adb, sys)?.into_owned())
    }
}
