// tests/config_test.rs
use git_release::config::{load_config, Config, Overrides};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.tag_prefix, "v");
    assert_eq!(config.remotes, vec!["origin".to_string()]);
    assert!(config.ask_tag_message);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_prefix = "REL_"
remotes = ["origin", "myremote"]
ask_tag_message = false
version = "2.1.0"

[manifest]
path = "MANIFEST"
exclude = '\.bak$'
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tag_prefix, "REL_");
    assert_eq!(
        config.remotes,
        vec!["origin".to_string(), "myremote".to_string()]
    );
    assert!(!config.ask_tag_message);
    assert_eq!(config.version.as_deref(), Some("2.1.0"));
    assert_eq!(config.manifest.path, "MANIFEST");
    assert_eq!(config.manifest.exclude.as_deref(), Some(r"\.bak$"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remotes = \"origin\"").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    assert!(load_config(Some("/nonexistent/gitrelease.toml")).is_err());
}

fn clear_override_env() {
    for key in ["FROM", "VERSION", "PRERELEASE", "PRE", "TAG"] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_overrides_from_env() {
    clear_override_env();
    std::env::set_var("FROM", "v1.0");
    std::env::set_var("VERSION", "1.1.0");
    std::env::set_var("TAG", "custom");

    let overrides = Overrides::from_env();
    clear_override_env();

    assert_eq!(overrides.from.as_deref(), Some("v1.0"));
    assert_eq!(overrides.version.as_deref(), Some("1.1.0"));
    assert_eq!(overrides.tag.as_deref(), Some("custom"));
    assert_eq!(overrides.message, None);
}

#[test]
#[serial]
fn test_pre_is_fallback_for_prerelease() {
    clear_override_env();
    std::env::set_var("PRE", "beta");
    assert_eq!(Overrides::from_env().prerelease.as_deref(), Some("beta"));

    std::env::set_var("PRERELEASE", "rc1");
    assert_eq!(Overrides::from_env().prerelease.as_deref(), Some("rc1"));
    clear_override_env();
}

#[test]
#[serial]
fn test_empty_env_values_are_unset() {
    clear_override_env();
    std::env::set_var("VERSION", "");
    assert_eq!(Overrides::from_env(), Overrides::default());
    clear_override_env();
}
