use std::fs;
use tempfile::TempDir;
use wikitool::config::{self, ServiceConfig, ServicesFile, SERVICES_ENV};

// The services path comes from a process-wide env var, so every scenario
// runs inside one test to keep the harness threads from interfering.
#[test]
fn test_services_file_env_lookup_and_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("services.yaml");
    std::env::set_var(SERVICES_ENV, &path);

    // Missing file: empty set, and a named lookup fails with the path.
    let file = config::load_services().unwrap();
    assert!(file.services.is_empty());
    let err = config::load_service("redmine").unwrap_err();
    assert!(err.to_string().contains("no service 'redmine'"));
    assert!(err.to_string().contains("services.yaml"));

    fs::write(
        &path,
        "services:\n  redmine:\n    url: https://redmine.example.com/\n    key: sekrit\n",
    )
    .unwrap();

    let svc = config::load_service("redmine").unwrap();
    assert_eq!(svc.url, "https://redmine.example.com/");
    let creds = svc.into_credentials();
    assert_eq!(creds.url, "https://redmine.example.com");
    assert_eq!(creds.key.as_deref(), Some("sekrit"));

    // Saving creates parent directories and omits unset fields.
    let nested = dir.path().join("nested/services.yaml");
    std::env::set_var(SERVICES_ENV, &nested);

    let mut file = ServicesFile::default();
    file.services.insert(
        "lab".to_string(),
        ServiceConfig {
            url: "https://wiki.lab.example.org/redmine".to_string(),
            key: None,
            user: Some("jdoe".to_string()),
            password: None,
        },
    );
    config::save_services(&file).unwrap();

    let reloaded = config::load_service("lab").unwrap();
    assert_eq!(reloaded.user.as_deref(), Some("jdoe"));
    assert!(reloaded.password.is_none());

    let raw = fs::read_to_string(&nested).unwrap();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("key"));

    std::env::remove_var(SERVICES_ENV);
}
