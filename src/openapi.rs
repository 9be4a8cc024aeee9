//! OpenAPI schema for the service and its on-disk export.

use std::fs;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;

use crate::config::{ServiceConfig, ServiceIdentity};
use crate::errors::{ServiceError, ServiceResult};
use crate::version::VersionPayload;
use crate::web::HealthStatus;

#[derive(OpenApi)]
#[openapi(
    paths(crate::web::version, crate::web::healthz),
    components(schemas(VersionPayload, HealthStatus)),
    tags((name = "admin", description = "Service metadata and probes"))
)]
pub struct ApiDoc;

/// Schema for every registered route, titled and versioned after `identity`.
pub fn build(identity: &ServiceIdentity) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = identity.name.clone();
    doc.info.version = identity.version.to_string();
    doc.info.description = None;
    doc.info.license = None;
    doc.info.contact = None;
    doc
}

/// Serialized document; identical input always yields identical bytes.
pub fn render(identity: &ServiceIdentity) -> ServiceResult<String> {
    build(identity)
        .to_pretty_json()
        .map_err(|e| ServiceError::serialization("openapi document", e))
}

/// Write the document to `path`, replacing any existing file.
///
/// The parent directory must already exist; it is never created here.
pub fn export(identity: &ServiceIdentity, path: &Path) -> ServiceResult<()> {
    let json = render(identity)?;
    fs::write(path, json.as_bytes())
        .map_err(|e| ServiceError::io(format!("writing {}", path.display()), e))?;

    tracing::info!(
        "Exported OpenAPI schema for {} v{} to {}",
        identity.name,
        identity.version,
        path.display()
    );
    Ok(())
}

/// Export for `config`'s identity to `output`, or to `openapi_path` when unset.
pub fn export_configured(config: &ServiceConfig, output: Option<PathBuf>) -> ServiceResult<PathBuf> {
    let path = output.unwrap_or_else(|| config.openapi_path.clone());
    export(&config.identity()?, &path)?;
    Ok(path)
}
