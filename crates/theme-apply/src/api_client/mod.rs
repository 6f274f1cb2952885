mod endpoints;
pub mod error;
pub mod model;
pub mod transport;

use std::sync::Arc;

pub use endpoints::Endpoint;
use error::{
    ResolveError,
    TransportError,
};
use model::ThemeRecord;
use tokio::task::JoinHandle;
use tracing::{
    debug,
    warn,
};
pub use transport::{
    HttpTransport,
    MockTransport,
    RawResponse,
    ReqwestTransport,
};

use crate::link::{
    ThemeLinkError,
    ThemeToken,
    extract_token,
};

/// Resolves theme share links to download information through the theme download API.
#[derive(Debug)]
pub struct ThemeResolver<T: HttpTransport> {
    transport: Arc<T>,
    endpoint: Endpoint,
}

impl<T: HttpTransport> Clone for ThemeResolver<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl ThemeResolver<ReqwestTransport> {
    /// Creates a resolver using a default [ReqwestTransport] against `endpoint`.
    pub fn reqwest(endpoint: Endpoint) -> Self {
        Self::new(Arc::new(ReqwestTransport::new()), endpoint)
    }
}

impl<T: HttpTransport> ThemeResolver<T> {
    pub fn new(transport: Arc<T>, endpoint: Endpoint) -> Self {
        Self { transport, endpoint }
    }

    /// Starts resolving `link` in the background and returns immediately.
    ///
    /// `handler` is invoked exactly once from the spawned task, with either the raw response or
    /// the transport failure. A malformed link is reported synchronously and no request is sent.
    /// Aborting the returned handle cancels the request.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn resolve_with<F>(&self, link: &str, handler: F) -> Result<JoinHandle<()>, ThemeLinkError>
    where
        F: FnOnce(Result<RawResponse, TransportError>) + Send + 'static,
    {
        let token = extract_token(link)?;
        let transport = Arc::clone(&self.transport);
        let endpoint = self.endpoint.clone();

        Ok(tokio::spawn(async move {
            let result = Self::request(transport.as_ref(), &endpoint, &token).await;
            handler(result);
        }))
    }

    /// Awaits the raw response for `link`.
    pub async fn resolve(&self, link: &str) -> Result<RawResponse, ResolveError> {
        let token = extract_token(link)?;
        Ok(Self::request(self.transport.as_ref(), &self.endpoint, &token).await?)
    }

    /// Resolves `link` and parses the response. `Ok(None)` means the API had no data for the theme.
    pub async fn fetch_theme(&self, link: &str) -> Result<Option<ThemeRecord>, ResolveError> {
        let response = self.resolve(link).await?;
        let status = response.status;
        let record = response.into_theme_record()?;
        if record.is_none() {
            warn!(status, "theme api returned no data");
        }
        Ok(record)
    }

    async fn request(transport: &T, endpoint: &Endpoint, token: &ThemeToken) -> Result<RawResponse, TransportError> {
        let url = endpoint.theme_url(token)?;
        debug!(%token, %url, "requesting theme download info");
        transport.get(url).await
    }
}
