use crate::config::ClientConfig;
use common::errors::AppError;
use common::http_client::HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

/// Handle on the browsing platform server rooted at the configured endpoint.
pub struct ServerApi {
    http_client: HttpClient,
    base_url: Url,
}

impl ServerApi {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        Self::with_client(config, HttpClient::with_defaults()?)
    }

    pub fn with_client(config: &ClientConfig, http_client: HttpClient) -> Result<Self, AppError> {
        let base_url = parse_base_url(config.server_path())?;
        debug!(base_url = %base_url, "Server API ready");

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a server route relative to the base endpoint, keeping its path prefix.
    ///
    /// Absolute URLs and routes that climb out of the base path are rejected.
    pub fn url_for(&self, route: &str) -> Result<Url, AppError> {
        if Url::parse(route).is_ok() {
            return Err(AppError::validation(format!(
                "route {} must be relative to the server endpoint",
                route
            )));
        }

        let url = self.base_url.join(route.trim_start_matches('/'))?;
        if !self.contains(&url) {
            return Err(AppError::validation(format!(
                "route {} resolves outside the server endpoint {}",
                route, self.base_url
            )));
        }

        Ok(url)
    }

    fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.base_url.scheme()
            && url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default()
            && url.path().starts_with(self.base_url.path())
    }

    #[instrument(skip(self))]
    pub async fn get_json<T>(&self, route: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(route)?;
        self.http_client.get_json(&url).await
    }
}

fn parse_base_url(server_path: &str) -> Result<Url, AppError> {
    let mut url = Url::parse(server_path)?;

    if url.cannot_be_a_base() {
        return Err(AppError::validation(format!(
            "server endpoint {} cannot be used as a base URL",
            server_path
        )));
    }

    // join() drops the last segment unless the path ends with '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
