use std::collections::VecDeque;
use std::sync::{
    Arc,
    Mutex,
};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{
    debug,
    error,
    trace,
    warn,
};
use url::Url;

use super::error::{
    BodyReadError,
    ParseError,
    TransportError,
};
use super::model::{
    ThemeRecord,
    parse_theme_response,
};

/// A response as received from the transport. The HTTP status is not interpreted here; the body
/// decides whether the call succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// `Err` when the headers arrived but reading the body failed.
    pub body: Result<Option<Bytes>, BodyReadError>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: Ok(Some(body.into())),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: Ok(None) }
    }

    pub fn unreadable(status: u16, error: BodyReadError) -> Self {
        Self {
            status,
            body: Err(error),
        }
    }

    /// Parses the body with [parse_theme_response]. An unreadable body is a [ParseError::Read].
    pub fn into_theme_record(self) -> Result<Option<ThemeRecord>, ParseError> {
        let body = self.body?;
        parse_theme_response(body.as_deref())
    }
}

/// Capability to issue a plain GET request.
///
/// Implementations are stateless from the caller's point of view and shared between calls.
#[async_trait]
pub trait HttpTransport: std::fmt::Debug + Send + Sync + 'static {
    async fn get(&self, url: Url) -> Result<RawResponse, TransportError>;
}

/// [HttpTransport] backed by a [reqwest::Client] with default settings: no custom headers, no auth,
/// and the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, TransportError> {
        debug!(%url, "sending request");
        let url_str = url.to_string();
        let map_err = |source: reqwest::Error| TransportError::Request { url: url_str, source };

        let response = self.client.get(url).send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                trace!(status, len = body.len(), "received response");
                Ok(RawResponse {
                    status,
                    body: Ok((!body.is_empty()).then_some(body)),
                })
            },
            Err(err) => {
                warn!(status, ?err, "failed to read response body");
                Ok(RawResponse::unreadable(status, BodyReadError::new(err)))
            },
        }
    }
}

/// [HttpTransport] that replays scripted results in order and records every requested url.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<mock::Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: RawResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Urls requested so far, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.lock().received_requests.clone()
    }

    fn push(&self, result: Result<RawResponse, String>) {
        self.lock().mock_responses.push_back(result);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, mock::Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, TransportError> {
        let mut inner = self.lock();
        inner.received_requests.push(url.clone());
        let Some(result) = inner.mock_responses.pop_front() else {
            error!(%url, "received an unexpected request");
            return Err(TransportError::Custom(format!("no mock response for {url}")));
        };
        result.map_err(TransportError::Custom)
    }
}

mod mock {
    use super::*;

    #[derive(Debug, Default)]
    pub(super) struct Inner {
        pub mock_responses: VecDeque<Result<RawResponse, String>>,
        pub received_requests: Vec<Url>,
    }
}

/// Serves one response that announces more body bytes than it sends, then closes the connection.
#[cfg(test)]
pub(crate) async fn truncated_body_server() -> std::net::SocketAddr {
    use tokio::io::{
        AsyncReadExt,
        AsyncWriteExt,
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0; 1024];
        let _ = socket.read(&mut buf).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 500\r\n\r\n{\"apiCode\":0")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    addr
}
