use std::process::ExitCode;

use anstream::{
    eprintln,
    println,
};
use clap::Args;
use crossterm::style::Stylize;
use eyre::{
    Result,
    WrapErr,
};
use theme_apply::api_client::model::ThemeInfo;
use theme_apply::api_client::{
    Endpoint,
    ThemeResolver,
};
use theme_apply::util::consts::env_var::API_BASE_URL;
use theme_apply::util::providers::{
    EnvProvider,
    RealProvider,
};
use theme_apply::util::settings::Settings;
use tracing::info;

use super::{
    CliContext,
    OutputFormat,
};

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// The theme share link, e.g. http://zhuti.xiaomi.com/detail/<token>
    link: String,
    /// Format of the output
    #[arg(long, short, value_enum, default_value_t)]
    format: OutputFormat,
    /// Base url of the theme download API
    #[arg(long)]
    api_url: Option<String>,
}

impl ResolveArgs {
    pub async fn execute(self, ctx: &CliContext) -> Result<ExitCode> {
        let endpoint = self.endpoint(&ctx.settings, &RealProvider);
        let resolver = ThemeResolver::reqwest(endpoint);

        let Some(record) = resolver
            .fetch_theme(&self.link)
            .await
            .wrap_err("failed to resolve the theme link")?
        else {
            eprintln!("{}", "The theme API returned no data for this link".red());
            return Ok(ExitCode::FAILURE);
        };

        let info = record.info(&ctx.messages)?;
        info!(?info, "resolved theme");
        print_info(&info, self.format)?;

        Ok(ExitCode::SUCCESS)
    }

    /// The flag wins over the env var, which wins over the settings file.
    fn endpoint(&self, settings: &Settings, env: &impl EnvProvider) -> Endpoint {
        let base_url = self
            .api_url
            .clone()
            .or_else(|| env.var(API_BASE_URL).ok())
            .or_else(|| settings.api_base_url.clone());

        let mut endpoint = base_url.map_or_else(Endpoint::default, Endpoint::new);
        if let Some(ui_version) = &settings.ui_version {
            endpoint = endpoint.with_ui_version(ui_version.clone());
        }
        endpoint
    }
}

fn print_info(info: &ThemeInfo, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            println!("{} {}", "File name:".bold(), info.file_name);
            println!("{} {}", "File size:".bold(), info.file_size);
            println!("{} {}", "File hash:".bold(), info.file_hash);
            println!("{} {}", "Download:".bold(), info.download_url);
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(info)?);
        },
        OutputFormat::JsonPretty => {
            println!("{}", serde_json::to_string_pretty(info)?);
        },
    }
    Ok(())
}
