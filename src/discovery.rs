//! Resolving where a running service can be reached.
//!
//! The platform publishes endpoint addresses as environment variables of the
//! form `CODEFLY__ENDPOINT__<MODULE>__<SERVICE>__<ENDPOINT>__<API>`. A value
//! may be a bare `host:port` or a full `http(s)://` URL.
//!
//! An absent variable means "nothing discovered"; a present but malformed one
//! is an error and is never silently replaced by the fallback address.

use reqwest::Url;
use std::collections::BTreeMap;

use crate::config::ServiceIdentity;
use crate::errors::{ServiceError, ServiceResult};

pub const ENDPOINT_ENV_PREFIX: &str = "CODEFLY__ENDPOINT";

/// Used whenever discovery yields nothing.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Something that can tell us the base address of an API exposed by a service.
pub trait EndpointResolver: Send + Sync {
    /// `Ok(None)` when the address is simply not published.
    fn resolve(&self, api: &str) -> ServiceResult<Option<Url>>;
}

/// Environment-backed resolver for a single service.
#[derive(Debug, Clone)]
pub struct EnvDiscovery {
    module: String,
    service: String,
    vars: BTreeMap<String, String>,
}

impl EnvDiscovery {
    /// Snapshot the process environment.
    pub fn from_env(identity: &ServiceIdentity) -> Self {
        Self::from_vars(identity, std::env::vars())
    }

    pub fn from_vars<I, K, V>(identity: &ServiceIdentity, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(ENDPOINT_ENV_PREFIX))
            .collect();

        Self {
            module: identity.module.clone(),
            service: identity.name.clone(),
            vars,
        }
    }

    /// Variable name carrying the address of `endpoint` served over `api`.
    pub fn endpoint_key(&self, endpoint: &str, api: &str) -> String {
        format!(
            "{}__{}__{}__{}__{}",
            ENDPOINT_ENV_PREFIX,
            env_segment(&self.module),
            env_segment(&self.service),
            env_segment(endpoint),
            env_segment(api)
        )
    }
}

impl EndpointResolver for EnvDiscovery {
    fn resolve(&self, api: &str) -> ServiceResult<Option<Url>> {
        // endpoints are named after the API they serve by default
        let key = self.endpoint_key(api, api);
        match self.vars.get(&key) {
            None => {
                tracing::debug!("No endpoint published under {}", key);
                Ok(None)
            }
            Some(raw) => parse_address(&key, raw).map(Some),
        }
    }
}

fn env_segment(raw: &str) -> String {
    raw.trim().to_uppercase().replace('-', "_")
}

/// Normalise a published address into a base URL.
pub fn parse_address(key: &str, raw: &str) -> ServiceResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::discovery(key, "address is empty"));
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| ServiceError::discovery(key, format!("'{raw}' is not an address: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ServiceError::discovery(
                key,
                format!("unsupported scheme '{other}'"),
            ))
        }
    }
    if url.host_str().is_none() {
        return Err(ServiceError::discovery(key, format!("'{raw}' has no host")));
    }

    Ok(url)
}

/// Resolve the base URL of `api`, falling back to [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(resolver: &dyn EndpointResolver, api: &str) -> ServiceResult<Url> {
    match resolver.resolve(api)? {
        Some(url) => {
            tracing::info!("Discovered {} endpoint at {}", api, url);
            Ok(url)
        }
        None => {
            tracing::info!(
                "No {} endpoint discovered, falling back to {}",
                api,
                DEFAULT_BASE_URL
            );
            parse_address("default", DEFAULT_BASE_URL)
        }
    }
}
