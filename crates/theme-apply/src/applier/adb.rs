//! A [DeviceBridge] that drives a connected device through `adb shell`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{
    debug,
    trace,
};

use super::bridge::{
    ApplicationInfo,
    BridgeError,
    DeviceBridge,
};
use super::intent::Intent;

pub const DEFAULT_ADB: &str = "adb";

#[derive(Debug, Clone)]
pub struct AdbBridge {
    adb: String,
    serial: Option<String>,
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new(DEFAULT_ADB)
    }
}

impl AdbBridge {
    pub fn new(adb: impl Into<String>) -> Self {
        Self {
            adb: adb.into(),
            serial: None,
        }
    }

    /// Targets the device with the given serial instead of the only connected one.
    pub fn with_serial(mut self, serial: Option<String>) -> Self {
        self.serial = serial;
        self
    }

    /// Runs `args` as a single command line in the device shell and returns its stdout.
    async fn shell(&self, args: &[String]) -> Result<String, BridgeError> {
        let command_line = shlex::try_join(args.iter().map(String::as_str))
            .map_err(|err| BridgeError::Custom(format!("cannot quote shell arguments: {err}")))?;

        let mut command = Command::new(&self.adb);
        if let Some(serial) = &self.serial {
            command.arg("-s").arg(serial);
        }
        command
            .arg("shell")
            .arg(&command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(adb = %self.adb, serial = ?self.serial, %command_line, "running adb shell");
        let output = command.output().await.map_err(|source| BridgeError::Io {
            context: format!("failed to run '{}'", self.adb),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        trace!(?output.status, %stdout, %stderr, "adb shell finished");

        if !output.status.success() {
            return Err(BridgeError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        if let Some(error) = find_start_error(&stdout).or_else(|| find_start_error(&stderr)) {
            return Err(BridgeError::StartRejected(error));
        }

        Ok(stdout)
    }
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn application_info(&self, package: &str) -> Result<Option<ApplicationInfo>, BridgeError> {
        let installed = self
            .shell(&["pm".into(), "list".into(), "packages".into(), package.into()])
            .await?;
        if !lists_package(&installed, package) {
            return Ok(None);
        }

        let disabled = self
            .shell(&[
                "pm".into(),
                "list".into(),
                "packages".into(),
                "-d".into(),
                package.into(),
            ])
            .await?;

        Ok(Some(ApplicationInfo {
            package: package.to_string(),
            enabled: !lists_package(&disabled, package),
        }))
    }

    async fn start_activity(&self, intent: &Intent) -> Result<(), BridgeError> {
        self.shell(&am_start_args(intent)).await.map(|_| ())
    }
}

/// Whether `pm list packages` output contains exactly `package`. `pm` filters by substring, so
/// other packages sharing the prefix may be listed too.
fn lists_package(output: &str, package: &str) -> bool {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .any(|name| name == package)
}

/// `am` reports most failures on its output with a zero exit status.
fn find_start_error(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error:") || line.starts_with("Exception occurred"))
        .map(String::from)
}

fn am_start_args(intent: &Intent) -> Vec<String> {
    let mut args = vec!["am".to_string(), "start".to_string(), "-a".to_string(), intent.action.clone()];
    if let Some(component) = &intent.component {
        args.extend(["-n".to_string(), component.to_string()]);
    }
    if let Some(data) = &intent.data {
        args.extend(["-d".to_string(), data.clone()]);
    }
    if !intent.flags.is_empty() {
        args.extend(["-f".to_string(), format!("{:#x}", intent.flags.bits())]);
    }
    for (key, value) in &intent.extras {
        args.extend(["--es".to_string(), key.clone(), value.clone()]);
    }
    args
}
