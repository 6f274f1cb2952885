use std::borrow::Cow;
use std::env::VarError;

use super::error::UtilError;
use super::providers::{
    EnvProvider,
    HomeProvider,
    SystemProvider,
};

/// Performs tilde and environment variable expansion on the provided input.
pub fn expand_path<'a>(input: &'a str, provider: &'_ impl SystemProvider) -> Result<Cow<'a, str>, UtilError> {
    Ok(shellexpand::full_with_context(
        input,
        shellexpand_home(provider),
        shellexpand_context(provider),
    )?)
}

/// Helper for [shellexpand::full_with_context]
fn shellexpand_home<H: HomeProvider>(provider: &H) -> impl Fn() -> Option<String> {
    || HomeProvider::home(provider).map(|h| h.to_string_lossy().to_string())
}

/// Helper for [shellexpand::full_with_context]
fn shellexpand_context<E: EnvProvider>(provider: &E) -> impl Fn(&str) -> Result<Option<String>, VarError> {
    |input: &str| Ok(EnvProvider::var(provider, input).ok())
}
