// Service configuration: serialized defaults, then `service.toml`, then `SVC_*` env.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ServiceError, ServiceResult};
use crate::version::{Version, VersionProvider};

pub const DEFAULT_CONFIG_FILE: &str = "service.toml";
pub const CONFIG_PATH_ENV: &str = "SVC_CONFIG_PATH";
pub const ENV_PREFIX: &str = "SVC_";
pub const DEFAULT_OPENAPI_PATH: &str = "openapi/api.swagger.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub name: String,
    pub module: String,
    /// Declared semantic version, `MAJOR.MINOR.PATCH`.
    pub version: String,
    pub host: String,
    pub port: u16,
    pub openapi_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "version-svc".to_string(),
            module: "default".to_string(),
            version: Version::default().to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            openapi_path: PathBuf::from(DEFAULT_OPENAPI_PATH),
        }
    }
}

/// Name, module and version a service declares about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    pub module: String,
    pub version: Version,
}

impl ServiceConfig {
    pub fn identity(&self) -> ServiceResult<ServiceIdentity> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::config("name must not be empty"));
        }
        let version = self
            .version
            .parse::<Version>()
            .map_err(|e| ServiceError::config(e.to_string()))?;

        Ok(ServiceIdentity {
            name: self.name.clone(),
            module: self.module.clone(),
            version,
        })
    }

    pub fn version_provider(&self) -> ServiceResult<VersionProvider> {
        Ok(VersionProvider::new(self.identity()?.version))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load configuration from `SVC_CONFIG_PATH` (or `service.toml`) and `SVC_*` env vars.
pub fn load_config() -> ServiceResult<ServiceConfig> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> ServiceResult<ServiceConfig> {
    let figment = Figment::from(Serialized::defaults(ServiceConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]));

    let config: ServiceConfig = figment.extract()?;

    // fail at load time rather than on first request
    config.identity()?;

    tracing::debug!(
        "Loaded config: name={}, version={}, bind={}",
        config.name,
        config.version,
        config.bind_addr()
    );
    Ok(config)
}
