use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the caller's environment and configuration
fn abiquoctl(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("abiquoctl").unwrap();
    cmd.env_remove("ABIQUO_API_URL")
        .env_remove("ABIQUO_USERNAME")
        .env_remove("ABIQUO_PASSWORD")
        .env_remove("ABIQUOCTL_PROFILE")
        .env_remove("RUST_LOG")
        .arg("--config-file")
        .arg(config);
    cmd
}

fn config_in(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("config.toml")
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("abiquoctl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Abiquo cloud management API"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("abiquoctl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("abiquoctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .args(["version", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"abiquoctl\""));
}

#[test]
fn test_no_args_shows_help() {
    Command::cargo_bin("abiquoctl")
        .unwrap()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    Command::cargo_bin("abiquoctl")
        .unwrap()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_template_list_requires_repository() {
    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .args(["template", "list", "--enterprise", "1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--repository"));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    abiquoctl(&config)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured"));

    abiquoctl(&config)
        .args([
            "profile",
            "set",
            "prod",
            "--url",
            "https://abiquo.example.com/api",
            "--username",
            "admin",
            "--password",
            "xabiquo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' created"));

    abiquoctl(&config)
        .args(["profile", "set", "lab", "--url", "https://lab/api", "--username", "ops"])
        .assert()
        .success();

    abiquoctl(&config)
        .args(["profile", "show", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://abiquo.example.com/api"))
        .stdout(predicate::str::contains("Default: yes"))
        .stdout(predicate::str::contains("xabiquo").not());

    abiquoctl(&config)
        .args(["profile", "default", "lab"])
        .assert()
        .success();

    abiquoctl(&config)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"lab\""))
        .stdout(predicate::str::contains("\"name\": \"prod\""));

    abiquoctl(&config)
        .args(["profile", "remove", "lab"])
        .assert()
        .success();

    abiquoctl(&config)
        .args(["profile", "show", "lab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'lab' not found"));

    let saved = std::fs::read_to_string(&config).unwrap();
    assert!(saved.contains("[profiles.prod]"));
    assert!(!saved.contains("default_profile"));
}

#[test]
fn test_profile_default_unknown() {
    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .args(["profile", "default", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'missing' not found"));
}

#[test]
fn test_profile_path_honors_config_file() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    abiquoctl(&config)
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.to_string_lossy().to_string()));
}

#[test]
fn test_commands_without_profile_fail() {
    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .args(["vdc", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"))
        .stderr(predicate::str::contains("abiquoctl profile set"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_vdc_list_from_environment_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/enterprises/42"))
        .and(basic_auth("admin", "xabiquo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "ACME", "links": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cloud/virtualdatacenters"))
        .and(query_param("enterprise", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                {"id": 1, "name": "dev", "hypervisorType": "KVM", "links": []},
                {"id": 2, "name": "prod", "hypervisorType": "VMX_04", "links": []}
            ],
            "links": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .env("ABIQUO_API_URL", format!("{}/api", server.uri()))
        .env("ABIQUO_USERNAME", "admin")
        .env("ABIQUO_PASSWORD", "xabiquo")
        .args(["vdc", "list", "--enterprise", "42", "--name", "prod", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hypervisorType\": \"VMX_04\""))
        .stdout(predicate::str::contains("\"dev\"").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_vdc_get_missing_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cloud/virtualdatacenters/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    abiquoctl(&config_in(&dir))
        .env("ABIQUO_API_URL", format!("{}/api", server.uri()))
        .env("ABIQUO_USERNAME", "admin")
        .env("ABIQUO_PASSWORD", "xabiquo")
        .args(["vdc", "get", "999"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Virtual datacenter 999 not found"));
}
