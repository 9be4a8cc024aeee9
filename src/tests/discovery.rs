use crate::config::ServiceIdentity;
use crate::discovery::{
    parse_address, resolve_base_url, EndpointResolver, EnvDiscovery, DEFAULT_BASE_URL,
};
use crate::errors::ServiceError;
use crate::version::Version;

fn identity() -> ServiceIdentity {
    ServiceIdentity {
        name: "version-svc".to_string(),
        module: "web-app".to_string(),
        version: Version::default(),
    }
}

#[test]
fn endpoint_key_is_upper_snake() {
    let discovery = EnvDiscovery::from_vars(&identity(), Vec::<(String, String)>::new());
    assert_eq!(
        discovery.endpoint_key("rest", "rest"),
        "CODEFLY__ENDPOINT__WEB_APP__VERSION_SVC__REST__REST"
    );
}

#[test]
fn resolves_bare_host_port() {
    let discovery = EnvDiscovery::from_vars(
        &identity(),
        [("CODEFLY__ENDPOINT__WEB_APP__VERSION_SVC__REST__REST", "localhost:31245")],
    );
    let url = discovery.resolve("rest").unwrap().unwrap();
    assert_eq!(url.as_str(), "http://localhost:31245/");
}

#[test]
fn resolves_full_url() {
    let discovery = EnvDiscovery::from_vars(
        &identity(),
        [("CODEFLY__ENDPOINT__WEB_APP__VERSION_SVC__REST__REST", "https://svc.internal:8443")],
    );
    let url = resolve_base_url(&discovery, "rest").unwrap();
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.port(), Some(8443));
}

#[test]
fn unrelated_variables_are_ignored() {
    let discovery = EnvDiscovery::from_vars(
        &identity(),
        [
            ("PATH", "/usr/bin"),
            ("CODEFLY__ENDPOINT__OTHER__SVC__REST__REST", "localhost:1"),
        ],
    );
    assert!(discovery.resolve("rest").unwrap().is_none());
}

#[test]
fn falls_back_to_localhost_when_nothing_discovered() {
    let discovery = EnvDiscovery::from_vars(&identity(), Vec::<(String, String)>::new());
    let url = resolve_base_url(&discovery, "rest").unwrap();
    assert_eq!(url.as_str().trim_end_matches('/'), DEFAULT_BASE_URL);
}

#[test]
fn malformed_address_is_an_error_not_a_fallback() {
    let discovery = EnvDiscovery::from_vars(
        &identity(),
        [("CODEFLY__ENDPOINT__WEB_APP__VERSION_SVC__REST__REST", "http://:99")],
    );
    let err = resolve_base_url(&discovery, "rest").unwrap_err();
    assert!(matches!(err, ServiceError::Discovery { .. }));
}

#[test]
fn rejects_empty_and_non_http_addresses() {
    assert!(parse_address("k", "   ").is_err());
    let err = parse_address("k", "ftp://files.local").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}
