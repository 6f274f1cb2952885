use std::borrow::Cow;

use url::Url;

use crate::link::ThemeToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base of the download API. The token is appended verbatim, so this should end with `/`.
    pub base_url: Cow<'static, str>,
    pub ui_version: Cow<'static, str>,
}

impl Endpoint {
    pub const DEFAULT_ENDPOINT: Self = Self {
        base_url: Cow::Borrowed("https://thm.market.xiaomi.com/thm/download/v2/"),
        ui_version: Cow::Borrowed("V11"),
    };

    pub fn new(base_url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::DEFAULT_ENDPOINT
        }
    }

    pub fn with_ui_version(mut self, ui_version: impl Into<Cow<'static, str>>) -> Self {
        self.ui_version = ui_version.into();
        self
    }

    /// `{base}{token}?miuiUIVersion={ui_version}`
    pub fn theme_url(&self, token: &ThemeToken) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}{}?miuiUIVersion={}",
            self.base_url, token, self.ui_version
        ))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::DEFAULT_ENDPOINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::extract_token;

    #[test]
    fn test_theme_url() {
        let token = extract_token("http://zhuti.xiaomi.com/detail/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa").unwrap();
        assert_eq!(
            Endpoint::default().theme_url(&token).unwrap().as_str(),
            "https://thm.market.xiaomi.com/thm/download/v2/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa?miuiUIVersion=V11"
        );
        assert_eq!(
            Endpoint::new("http://127.0.0.1:1234/api/")
                .with_ui_version("V12")
                .theme_url(&token)
                .unwrap()
                .as_str(),
            "http://127.0.0.1:1234/api/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa?miuiUIVersion=V12"
        );
    }
}
