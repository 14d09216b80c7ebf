//! The run must refuse to start before any side effect occurs.

use distship::config::{DeployConfig, ENV_HOST, ENV_PASSWORD, ENV_PATH, ENV_USER};
use distship::ssh::SshClient;
use distship::{archive, ErrorCode};

#[test]
fn empty_environment_reports_every_required_variable() {
    let err = DeployConfig::from_lookup(|_| None).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissingEnv);
    for var in [ENV_HOST, ENV_USER, ENV_PATH, ENV_PASSWORD] {
        assert!(err.message.contains(var), "{} missing from message", var);
    }
    assert!(
        err.hints.iter().any(|h| h.message.starts_with("export ")),
        "expected export hints for the operator"
    );
}

#[test]
fn bad_identity_file_stops_the_run_before_the_build() {
    let config = DeployConfig {
        host: "example.com".to_string(),
        user: "deploy".to_string(),
        port: 22,
        remote_path: "/var/www/site".to_string(),
        password: None,
        identity_file: Some("/nonexistent/key".to_string()),
    };

    let err = SshClient::from_config(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::SshIdentityFileNotFound);
}

#[test]
fn archiving_a_missing_dist_leaves_the_directory_untouched() {
    let tmp = tempfile::tempdir().unwrap();

    let err = archive::create_in("dist", tmp.path(), chrono::Local::now()).unwrap_err();

    assert_eq!(err.code, ErrorCode::ArchiveMissingSource);
    assert_eq!(
        std::fs::read_dir(tmp.path()).unwrap().count(),
        0,
        "no partial archive may be written"
    );
}
