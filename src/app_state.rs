use crate::config::{ServiceConfig, ServiceIdentity};
use crate::errors::ServiceResult;
use crate::version::VersionProvider;

/// Immutable state shared with every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub identity: ServiceIdentity,
    pub versions: VersionProvider,
}

impl AppState {
    pub fn new(identity: ServiceIdentity) -> Self {
        let versions = VersionProvider::new(identity.version);
        Self { identity, versions }
    }

    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        Ok(Self::new(config.identity()?))
    }
}
