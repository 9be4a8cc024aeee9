//! Smoke check against a running instance: one `GET /version`, no retries.

use reqwest::{Client, StatusCode, Url};

use crate::config::ServiceConfig;
use crate::discovery::{resolve_base_url, EndpointResolver};
use crate::errors::{ServiceError, ServiceResult};
use crate::version::Version;

/// API name the service publishes its HTTP endpoint under.
pub const REST_API: &str = "rest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    pub base_url: Url,
    pub version: Version,
}

/// Issue a single `GET {base}/version` and compare the body with `expected`.
pub async fn check_version(client: &Client, base: &Url, expected: Version) -> ServiceResult<Version> {
    let url = format!("{}/version", base.as_str().trim_end_matches('/'));
    tracing::debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("GET {url}"), e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::network(format!("reading body of GET {url}"), e))?;

    if status != StatusCode::OK {
        return Err(ServiceError::smoke(format!(
            "GET {url} returned {status}, expected 200: {body}"
        )));
    }

    // body must equal the canonical payload exactly
    let served: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| ServiceError::smoke(format!("GET {url} body {body} is not JSON: {e}")))?;
    let wanted = serde_json::to_value(expected)?;

    if served != wanted {
        return Err(ServiceError::smoke(format!(
            "GET {url} served {served}, expected {wanted}"
        )));
    }

    tracing::info!("GET {} -> {}", url, served);
    Ok(expected)
}

/// Resolve the service address and check it serves the configured version.
pub async fn run(config: &ServiceConfig, resolver: &dyn EndpointResolver) -> ServiceResult<SmokeReport> {
    let expected = config.version_provider()?.get_version();
    let base_url = resolve_base_url(resolver, REST_API)?;
    run_against(&base_url, expected).await
}

pub async fn run_against(base_url: &Url, expected: Version) -> ServiceResult<SmokeReport> {
    let client = Client::new();
    let version = check_version(&client, base_url, expected).await?;
    Ok(SmokeReport {
        base_url: base_url.clone(),
        version,
    })
}
