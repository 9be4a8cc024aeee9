//! Library root for the `version_svc` crate

// Core error handling
pub mod api_errors;
pub mod errors;

// Version value and provider
pub mod version;

// Configuration & CLI
pub mod cli;
pub mod config;

// Web server interface
pub mod app_state;
pub mod web;

// Schema export
pub mod openapi;

// Discovery & smoke checks
pub mod discovery;
pub mod smoke;

// Logging
pub mod log_sink;


pub use app_state::AppState;
pub use config::{ServiceConfig, ServiceIdentity};
pub use errors::{ServiceError, ServiceResult};
pub use version::{Version, VersionProvider};
