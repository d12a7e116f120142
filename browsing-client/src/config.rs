use serde::Serialize;
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const SERVER_ENDPOINT_VAR: &str = "REACT_APP_SERVER_ENDPOINT";
pub const DEFAULT_SERVER_PATH: &str = "http://localhost:4444/";

/// Where the resolved server endpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    Environment,
    Default,
}

/// Client-side configuration, rendered as `{"serverPath": "..."}`.
///
/// The endpoint is read-only once resolved:
///
/// ```compile_fail
/// let mut config = browsing_client::ClientConfig::default();
/// config.server_path = String::new();
/// ```
///
/// ```compile_fail
/// let config = browsing_client::ClientConfig { server_path: String::new() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    server_path: String,
    #[serde(skip)]
    source: EndpointSource,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                warn!(var = key, "Ignoring non-UTF-8 value");
                None
            }
        })
    }

    /// Resolve against an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (server_path, source) = match lookup(SERVER_ENDPOINT_VAR) {
            Some(value) if !value.is_empty() => (value, EndpointSource::Environment),
            _ => (DEFAULT_SERVER_PATH.to_string(), EndpointSource::Default),
        };

        debug!(server_path = %server_path, source = ?source, "Resolved server endpoint");

        Self {
            server_path,
            source,
        }
    }

    pub fn server_path(&self) -> &str {
        &self.server_path
    }

    pub fn source(&self) -> EndpointSource {
        self.source
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_path: DEFAULT_SERVER_PATH.to_string(),
            source: EndpointSource::Default,
        }
    }
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Process-wide configuration, resolved from the environment on first access.
pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::from_env)
}
