//! Response types of the theme download API.
//!
//! Example response for `GET /thm/download/v2/d555981b-e6af-4ea9-9eb2-e47cfbc3edfa?miuiUIVersion=V11`:
//!
//! ```json
//! {
//!   "apiCode": 0,
//!   "apiData": {
//!     "downloadUrl": "http%3A%2F%2Ff8.market.xiaomi.com%2Fdownload%2FThemeMarket%2F0a1b%2FClassic.mtz",
//!     "fileHash": "6c1e5e4b2a0c8d8ea0c1d0f1f2e3d4c5b6a79880",
//!     "fileSize": 2500000
//!   },
//!   "apiMessage": "ok"
//! }
//! ```

use percent_encoding::percent_decode_str;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use super::error::{
    DecodeUrlError,
    ParseError,
};
use crate::messages::{
    MessageCatalog,
    MessageId,
};

/// `apiCode` value of a successful response.
pub const API_CODE_OK: i64 = 0;

/// Bytes per hundredth of a megabyte (10^6 bytes) in [ThemeRecord::display_size].
const BYTES_PER_CENTI_MB: u64 = 10_000;

/// The outer layer of a download API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEnvelope {
    pub api_code: i64,
    pub api_data: ThemeRecord,
}

/// Only the status of the envelope, so a failed response is recognized whatever its payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeStatus {
    api_code: i64,
}

/// Download information of a single theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    download_url: String,
    file_hash: String,
    file_size: u64,
}

impl ThemeRecord {
    pub fn new(download_url: impl Into<String>, file_hash: impl Into<String>, file_size: u64) -> Self {
        Self {
            download_url: download_url.into(),
            file_hash: file_hash.into(),
            file_size,
        }
    }

    /// The download url as returned by the API, still percent-encoded.
    pub fn encoded_download_url(&self) -> &str {
        &self.download_url
    }

    /// The raw file hash, possibly empty.
    pub fn file_hash(&self) -> &str {
        &self.file_hash
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// The decoded download url.
    ///
    /// Decoding follows `application/x-www-form-urlencoded` rules: `+` becomes a space and `%XX`
    /// escapes become bytes, which must form valid UTF-8.
    pub fn download_url(&self) -> Result<String, DecodeUrlError> {
        let plus_decoded = self.download_url.replace('+', " ");
        Ok(percent_decode_str(&plus_decoded).decode_utf8()?.into_owned())
    }

    /// Uppercased file hash, or the uppercased placeholder text when the API returned none.
    pub fn display_hash(&self, messages: &MessageCatalog) -> String {
        if self.file_hash.is_empty() {
            messages.get(MessageId::HashUnavailable).to_uppercase()
        } else {
            self.file_hash.to_uppercase()
        }
    }

    /// File size in megabytes (10^6 bytes) with two decimals, e.g. `2.50 MB`. Halves round up.
    pub fn display_size(&self) -> String {
        let centi_mb = self.file_size.saturating_add(BYTES_PER_CENTI_MB / 2) / BYTES_PER_CENTI_MB;
        format!("{}.{:02} MB", centi_mb / 100, centi_mb % 100)
    }

    /// Last path segment of the decoded download url.
    pub fn file_name(&self) -> Result<String, DecodeUrlError> {
        let url = self.download_url()?;
        Ok(url.rsplit('/').next().unwrap_or_default().to_string())
    }

    /// All presentation fields of the record at once.
    pub fn info(&self, messages: &MessageCatalog) -> Result<ThemeInfo, DecodeUrlError> {
        Ok(ThemeInfo {
            download_url: self.download_url()?,
            file_name: self.file_name()?,
            file_hash: self.display_hash(messages),
            file_size: self.display_size(),
        })
    }
}

/// Presentation view of a [ThemeRecord].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeInfo {
    pub download_url: String,
    pub file_name: String,
    pub file_hash: String,
    pub file_size: String,
}

/// Parses a download API response body.
///
/// Returns `Ok(None)` when there is no body or when the API reports a non-zero `apiCode`, in which
/// case the payload is not inspected. Malformed bodies and missing fields are a [ParseError].
pub fn parse_theme_response(body: Option<&[u8]>) -> Result<Option<ThemeRecord>, ParseError> {
    let Some(body) = body else {
        debug!("theme response has no body");
        return Ok(None);
    };

    let status: EnvelopeStatus = serde_json::from_slice(body)?;
    if status.api_code != API_CODE_OK {
        debug!(api_code = status.api_code, "theme api returned an error code");
        return Ok(None);
    }

    let envelope: ThemeEnvelope = serde_json::from_slice(body)?;
    Ok(Some(envelope.api_data))
}
