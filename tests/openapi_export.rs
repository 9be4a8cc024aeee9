use std::fs;
use tempfile::TempDir;
use version_svc::{openapi, ServiceConfig, ServiceError, ServiceIdentity, Version};

fn identity(version: Version) -> ServiceIdentity {
    ServiceIdentity {
        name: "billing".to_string(),
        module: "payments".to_string(),
        version,
    }
}

#[test]
fn export_is_idempotent() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("api.swagger.json");
    let id = identity(Version::new(0, 3, 1));

    openapi::export(&id, &path).unwrap();
    let first = fs::read(&path).unwrap();
    openapi::export(&id, &path).unwrap();
    let second = fs::read(&path).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn info_carries_service_name_and_version() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("api.swagger.json");

    openapi::export(&identity(Version::new(1, 2, 3)), &path).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc["info"]["title"], "billing");
    assert_eq!(doc["info"]["version"], "1.2.3");
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
}

#[test]
fn every_registered_route_is_documented() {
    let doc: serde_json::Value =
        serde_json::from_str(&openapi::render(&identity(Version::default())).unwrap()).unwrap();

    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/version"));
    assert!(paths.contains_key("/healthz"));
    assert!(paths["/version"].get("get").is_some());
    assert_eq!(
        doc["components"]["schemas"]["VersionPayload"]["properties"]["version"]["type"],
        "string"
    );
}

#[test]
fn export_overwrites_existing_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("api.swagger.json");
    fs::write(&path, "stale content that is not json").unwrap();

    openapi::export(&identity(Version::default()), &path).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc["info"]["version"], "0.0.0");
}

#[test]
fn missing_output_directory_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("openapi").join("api.swagger.json");

    let err = openapi::export(&identity(Version::default()), &path).unwrap_err();
    assert!(matches!(err, ServiceError::Io { .. }));
    assert!(!path.exists());
}

#[test]
fn configured_export_uses_openapi_path_unless_overridden() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = ServiceConfig {
        name: "billing".to_string(),
        version: "2.1.0".to_string(),
        openapi_path: dir.path().join("api.swagger.json"),
        ..ServiceConfig::default()
    };

    let written = openapi::export_configured(&config, None).unwrap();
    assert_eq!(written, config.openapi_path);
    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&written).unwrap()).unwrap();
    assert_eq!(doc["info"]["title"], "billing");
    assert_eq!(doc["info"]["version"], "2.1.0");

    let custom = dir.path().join("custom.json");
    let written = openapi::export_configured(&config, Some(custom.clone())).unwrap();
    assert_eq!(written, custom);
    assert!(custom.exists());
}
