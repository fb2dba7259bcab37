use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a test command isolated from the caller's environment
fn redshiftctl() -> Command {
    let mut cmd = Command::cargo_bin("redshiftctl").unwrap();
    for var in [
        "REDSHIFTCTL_PROFILE",
        "REDSHIFTCTL_CONFIG_FILE",
        "REDSHIFTCTL_REGION",
        "REDSHIFTCTL_ENDPOINT_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Command bound to a config file inside `dir`
fn with_config(dir: &TempDir) -> Command {
    let mut cmd = redshiftctl();
    cmd.arg("--config-file").arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_help_flag() {
    redshiftctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Amazon Redshift management CLI"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    redshiftctl()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    redshiftctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("redshiftctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command() {
    redshiftctl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    redshiftctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    redshiftctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_resource_help_lists_operations() {
    redshiftctl()
        .args(["cluster", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reboot"))
        .stdout(predicate::str::contains("describe-resize"));

    redshiftctl()
        .args(["logging", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enable"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_mutating_command_offers_force() {
    redshiftctl()
        .args(["security-group", "delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--pass-thru"))
        .stdout(predicate::str::contains("--full-response"));
}

#[test]
fn test_missing_required_argument() {
    redshiftctl()
        .args(["cluster", "reboot"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--cluster"));
}

#[test]
fn test_malformed_tag_rejected() {
    redshiftctl()
        .args([
            "tag",
            "create",
            "--resource-name",
            "arn:aws:redshift:us-east-1:123456789012:cluster:analytics",
            "--tag",
            "no-equals-sign",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_mutation_without_terminal_requires_force() {
    let dir = TempDir::new().unwrap();
    with_config(&dir)
        .args([
            "--region",
            "us-east-1",
            "cluster",
            "reboot",
            "--cluster",
            "analytics",
        ])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--force"))
        .stderr(predicate::str::contains("RebootCluster"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let dir = TempDir::new().unwrap();
    with_config(&dir)
        .args([
            "--profile",
            "missing",
            "cluster",
            "describe-resize",
            "--cluster",
            "analytics",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Profile 'missing' not found"))
        .stderr(predicate::str::contains("redshiftctl profile list"));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();

    with_config(&dir)
        .args([
            "profile",
            "set",
            "local",
            "--region",
            "us-east-1",
            "--endpoint-url",
            "http://localhost:4566",
            "--access-key-id",
            "AKIAEXAMPLE",
            "--secret-access-key",
            "secret-value",
            "--no-retry",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'local' created"));

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("default_profile = \"local\""));
    assert!(saved.contains("endpoint_url = \"http://localhost:4566\""));

    with_config(&dir)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"is_default\": true"));

    with_config(&dir)
        .args(["profile", "show", "local", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AKIA****"))
        .stdout(predicate::str::contains("\"max_attempts\": 1"))
        .stdout(predicate::str::contains("secret-value").not());

    with_config(&dir)
        .args(["profile", "set", "prod", "--region", "us-west-2", "--aws-profile", "prod-admin"])
        .assert()
        .success();

    with_config(&dir)
        .args(["profile", "default", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default profile set to 'prod'"));

    with_config(&dir)
        .args(["profile", "remove", "local"])
        .assert()
        .success();

    with_config(&dir)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("prod"));
}

#[test]
fn test_profile_set_rejects_mixed_credentials() {
    let dir = TempDir::new().unwrap();
    with_config(&dir)
        .args([
            "profile",
            "set",
            "bad",
            "--aws-profile",
            "prod-admin",
            "--access-key-id",
            "AKIAEXAMPLE",
            "--secret-access-key",
            "secret-value",
        ])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_profile_path_uses_config_file() {
    let dir = TempDir::new().unwrap();
    with_config(&dir)
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    redshiftctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redshiftctl"));
}
