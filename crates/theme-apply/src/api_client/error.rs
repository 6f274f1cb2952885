use std::sync::Arc;

use thiserror::Error;

use crate::link::ThemeLinkError;

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url: {}", .0)]
    InvalidUrl(#[from] url::ParseError),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{}", .0)]
    Custom(String),
}

/// The response arrived but its body could not be read to the end.
#[derive(Debug, Clone, Error)]
#[error("failed to read response body: {source}")]
pub struct BodyReadError {
    #[source]
    source: Arc<reqwest::Error>,
}

impl BodyReadError {
    pub fn new(source: reqwest::Error) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl PartialEq for BodyReadError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

impl Eq for BodyReadError {}

/// A response body that could not be decoded into a theme record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to decode theme response: {}", .0)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Read(#[from] BodyReadError),
}

/// The decoded download url is not valid UTF-8.
#[derive(Debug, Error)]
#[error("download url is not valid percent-encoded UTF-8: {source}")]
pub struct DecodeUrlError {
    #[from]
    source: std::str::Utf8Error,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Link(#[from] ThemeLinkError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ResolveError {
    /// Short machine readable name of the failure class.
    pub fn reason(&self) -> &'static str {
        match self {
            ResolveError::Link(_) => "MalformedInput",
            ResolveError::Transport(_) => "TransportFailure",
            ResolveError::Parse(_) => "DecodeFailure",
        }
    }
}
