use std::fs;
use std::path::PathBuf;

use abiquo_core::config::{Config, ConfigError, Profile};
use tempfile::TempDir;

/// Permission checks are not enforced for root
#[cfg(unix)]
fn is_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim() == "0")
        .unwrap_or(false)
}

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn missing_file_is_an_empty_config() {
    let path = PathBuf::from("/tmp/abiquoctl-test-nonexistent/nested/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).unwrap();
    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn empty_file_is_an_empty_config() {
    let (_dir, path) = write_config("");

    let config = Config::load_from_path(&path).unwrap();
    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn corrupt_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[[[broken");

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(err.to_string().contains("parse"));
}

#[test]
fn profile_without_url_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[profiles.broken]
username = "admin"
"#,
    );

    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn unknown_fields_are_ignored() {
    let (_dir, path) = write_config(
        r#"
unknown_top_level_key = "hello"

[profiles.lab]
url = "https://lab.example.com/api"
username = "admin"
verify_ssl = false
"#,
    );

    let config = Config::load_from_path(&path).unwrap();
    let lab = config.profile("lab").unwrap();
    assert_eq!(lab.url, "https://lab.example.com/api");
    assert!(!lab.insecure);
}

#[test]
fn save_then_load_keeps_profiles_and_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set_profile(
        "prod".to_string(),
        Profile::new("https://abiquo.example.com/api", "admin")
            .with_password("keyring:prod")
            .with_insecure(true),
    );
    config.set_profile(
        "lab".to_string(),
        Profile::new("https://lab.example.com/api", "cloudadmin"),
    );
    config.default_profile = Some("prod".to_string());
    config.save_to_path(&path).unwrap();

    let loaded = Config::load_from_path(&path).unwrap();
    assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
    assert_eq!(loaded.profile("prod").unwrap(), config.profile("prod").unwrap());
    assert_eq!(loaded.profile("lab").unwrap().password, None);
    assert_eq!(loaded.resolve_profile(None).unwrap(), "prod");
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_a_load_error() {
    use std::os::unix::fs::PermissionsExt;

    if is_root() {
        eprintln!("skipping test: running as root");
        return;
    }

    let (_dir, path) = write_config("# valid toml");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError { .. }));

    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn readonly_directory_is_a_save_error() {
    use std::os::unix::fs::PermissionsExt;

    if is_root() {
        eprintln!("skipping test: running as root");
        return;
    }

    let dir = TempDir::new().unwrap();
    let readonly_dir = dir.path().join("readonly");
    fs::create_dir(&readonly_dir).unwrap();
    fs::set_permissions(&readonly_dir, fs::Permissions::from_mode(0o444)).unwrap();

    let err = Config::default()
        .save_to_path(&readonly_dir.join("config.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::SaveError { .. }));

    fs::set_permissions(&readonly_dir, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    Config::default().save_to_path(&path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
