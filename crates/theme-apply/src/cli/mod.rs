mod apply;
mod resolve;

use std::process::ExitCode;

use apply::ApplyArgs;
use clap::{
    ArgAction,
    Parser,
    Subcommand,
    ValueEnum,
};
use eyre::{
    Context,
    Result,
};
use resolve::ResolveArgs;
use theme_apply::messages::{
    Locale,
    MessageCatalog,
};
use theme_apply::util::consts::LOG_FILE_NAME;
use theme_apply::util::directories;
use theme_apply::util::providers::RealProvider;
use theme_apply::util::settings::Settings;
use tracing::debug;
use tracing_appender::non_blocking::{
    NonBlocking,
    WorkerGuard,
};
use tracing_appender::rolling::{
    RollingFileAppender,
    Rotation,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{
    EnvFilter,
    Registry,
};

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Resolve MIUI theme share links and apply themes through the MIUI theme manager")]
pub struct CliArgs {
    #[command(subcommand)]
    pub subcommand: RootSubcommand,
    /// Increase logging verbosity, logs are also printed to stderr when set
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Language of dialogs and placeholders
    #[arg(long, value_enum, global = true)]
    pub locale: Option<Locale>,
}

impl CliArgs {
    pub async fn execute(self) -> Result<ExitCode> {
        let _guard = Self::setup_logging(self.verbose).context("failed to initialize logging")?;

        let settings = Settings::load(&RealProvider).await.context("failed to load settings")?;
        debug!(?settings, "loaded settings");

        let locale = self.locale.or(settings.locale).unwrap_or_default();
        let messages = MessageCatalog::new(locale).with_overrides(settings.messages.clone());
        let ctx = CliContext { settings, messages };

        self.subcommand.execute(&ctx).await
    }

    fn setup_logging(verbose: u8) -> Result<WorkerGuard> {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let logs_dir = directories::logs_dir(&RealProvider)?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(&logs_dir)
            .with_context(|| format!("failed to create log file in {}", logs_dir.display()))?;
        let (non_blocking, guard) = NonBlocking::new(appender);
        let file_layer = tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false);
        let stderr_layer = (verbose > 0).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        Registry::default()
            .with(env_filter)
            .with(file_layer)
            .with(stderr_layer)
            .init();

        Ok(guard)
    }
}

/// State shared by every subcommand.
#[derive(Debug)]
pub struct CliContext {
    pub settings: Settings,
    pub messages: MessageCatalog,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RootSubcommand {
    /// Look up the download url, hash and size of a theme from its share link
    Resolve(ResolveArgs),
    /// Hand a theme file on the connected device to the MIUI theme manager
    Apply(ApplyArgs),
}

impl RootSubcommand {
    pub async fn execute(self, ctx: &CliContext) -> Result<ExitCode> {
        match self {
            RootSubcommand::Resolve(args) => args.execute(ctx).await,
            RootSubcommand::Apply(args) => args.execute(ctx).await,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable output
    #[default]
    Plain,
    /// Single line JSON
    Json,
    /// Pretty printed JSON
    JsonPretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let args = CliArgs::try_parse_from([
            "theme-apply",
            "-vv",
            "--locale",
            "en",
            "resolve",
            "http://zhuti.xiaomi.com/detail/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa",
            "--format",
            "json-pretty",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.locale, Some(Locale::En));
        assert!(matches!(args.subcommand, RootSubcommand::Resolve(_)));
    }

    #[test]
    fn test_parse_apply() {
        let args = CliArgs::try_parse_from([
            "theme-apply",
            "apply",
            "/sdcard/Download/Classic.mtz",
            "--serial",
            "emulator-5554",
            "--yes",
            "--locale",
            "zh-cn",
        ])
        .unwrap();
        assert_eq!(args.locale, Some(Locale::ZhCn));
        assert!(matches!(args.subcommand, RootSubcommand::Apply(_)));
    }
}
