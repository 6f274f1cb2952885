//! Extraction of the theme token from a MIUI theme share link.
//!
//! Share links look like `http://zhuti.xiaomi.com/detail/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa`,
//! possibly with trailing query parameters or surrounding share text.

use std::fmt;

use thiserror::Error;

/// Substring that precedes the token in a share link.
pub const DETAIL_DELIMITER: &str = "/detail/";

/// Number of characters in a theme token.
pub const TOKEN_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeLinkError {
    #[error("the share link does not contain '{}'", DETAIL_DELIMITER)]
    MissingDelimiter,
    #[error("expected a {} character theme token after '{}', found {found} characters", TOKEN_LEN, DETAIL_DELIMITER)]
    TokenTooShort { found: usize },
}

/// The identifier of a theme on the theme market, used as the lookup key for the download API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeToken(String);

impl ThemeToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThemeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the first [TOKEN_LEN] characters following the first occurrence of
/// [DETAIL_DELIMITER] in `link`.
pub fn extract_token(link: &str) -> Result<ThemeToken, ThemeLinkError> {
    let (_, rest) = link
        .split_once(DETAIL_DELIMITER)
        .ok_or(ThemeLinkError::MissingDelimiter)?;

    let token: String = rest.chars().take(TOKEN_LEN).collect();
    let found = token.chars().count();
    if found < TOKEN_LEN {
        return Err(ThemeLinkError::TokenTooShort { found });
    }

    Ok(ThemeToken(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "d555981b-e6af-4ea9-9eb2-e47cfbc3edfa";

    #[test]
    fn test_extract_token() {
        let links = [
            format!("http://zhuti.xiaomi.com/detail/{TOKEN}"),
            format!("https://zhuti.xiaomi.com/detail/{TOKEN}?shareFrom=app&miuiUIVersion=V12"),
            format!("来看看这个主题 http://zhuti.xiaomi.com/detail/{TOKEN} 分享自主题商店"),
        ];
        for link in links {
            assert_eq!(extract_token(&link).unwrap().as_str(), TOKEN, "link: {link}");
        }
    }

    #[test]
    fn test_first_delimiter_wins() {
        let link = format!("http://zhuti.xiaomi.com/detail/{TOKEN}/detail/ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert_eq!(extract_token(&link).unwrap().to_string(), TOKEN);
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            extract_token(&format!("http://zhuti.xiaomi.com/{TOKEN}")),
            Err(ThemeLinkError::MissingDelimiter)
        );
        assert_eq!(extract_token(""), Err(ThemeLinkError::MissingDelimiter));
    }

    #[test]
    fn test_token_too_short() {
        assert_eq!(
            extract_token("http://zhuti.xiaomi.com/detail/d555981b"),
            Err(ThemeLinkError::TokenTooShort { found: 8 })
        );
        assert_eq!(
            extract_token("http://zhuti.xiaomi.com/detail/"),
            Err(ThemeLinkError::TokenTooShort { found: 0 })
        );
    }
}
