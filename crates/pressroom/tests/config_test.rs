//! Configuration loading from lookups and TOML files.

use pressroom::error::ConfigErrorKind;
use pressroom::{PressroomConfig, parse_dry_run};
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn temp_config(name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("pressroom-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_defaults_are_safe() {
    let config = PressroomConfig::from_lookup(lookup(&[])).unwrap();
    assert!(config.dry_run);
    assert_eq!(*config.dedup.retention_hours(), 24);
    assert!(config.platforms.x.is_none());
    assert!(config.platforms.medium.is_none());
}

#[test]
fn test_parse_dry_run_only_explicit_false_goes_live() {
    for value in ["false", "FALSE", "0", "no", " off "] {
        assert!(!parse_dry_run(value), "{value}");
    }
    for value in ["true", "1", "yes", "", "flase", "live"] {
        assert!(parse_dry_run(value), "{value}");
    }
}

#[test]
fn test_prefixed_dry_run_wins_over_legacy() {
    let config = PressroomConfig::from_lookup(lookup(&[
        ("PRESSROOM_DRY_RUN", "true"),
        ("DRY_RUN", "false"),
    ]))
    .unwrap();
    assert!(config.dry_run);

    let config = PressroomConfig::from_lookup(lookup(&[("DRY_RUN", "false")])).unwrap();
    assert!(!config.dry_run);
}

#[test]
fn test_retention_from_lookup() {
    let config =
        PressroomConfig::from_lookup(lookup(&[("PRESSROOM_DEDUP_RETENTION_HOURS", "48")])).unwrap();
    assert_eq!(*config.dedup.retention_hours(), 48);
}

#[test]
fn test_invalid_retention_is_rejected() {
    for value in ["0", "soon", "-3"] {
        let err = PressroomConfig::from_lookup(lookup(&[("PRESSROOM_DEDUP_RETENTION_HOURS", value)]))
            .unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Invalid(_)), "{value}");
    }
}

#[test]
fn test_credentials_from_lookup() {
    let config = PressroomConfig::from_lookup(lookup(&[
        ("TWITTER_API_KEY", "key"),
        ("TWITTER_API_SECRET", "secret"),
        ("TWITTER_ACCESS_TOKEN", "token"),
        ("TWITTER_ACCESS_SECRET", "token-secret"),
        ("MEDIUM_INTEGRATION_TOKEN", "medium-token"),
    ]))
    .unwrap();

    let x = config.platforms.x.expect("x credentials");
    assert_eq!(x.api_key(), "key");
    // Medium also needs an author id.
    assert!(config.platforms.medium.is_none());
}

#[test]
fn test_from_file() -> anyhow::Result<()> {
    let path = temp_config(
        "from-file",
        r#"
dry_run = false

[dedup]
retention_hours = 12

[platforms.facebook]
page_access_token = "page-token"
page_id = "1234"
"#,
    )?;

    let config = PressroomConfig::from_file(&path)?;
    std::fs::remove_file(&path).ok();

    assert!(!config.dry_run);
    assert_eq!(*config.dedup.retention_hours(), 12);
    let facebook = config.platforms.facebook.expect("facebook credentials");
    assert_eq!(facebook.page_id(), "1234");
    assert_eq!(facebook.graph_version(), "v18.0");
    Ok(())
}

#[test]
fn test_file_then_lookup_overlay() -> anyhow::Result<()> {
    let path = temp_config(
        "overlay",
        r#"
[platforms.linkedin]
access_token = "file-token"
organization_id = "42"
"#,
    )?;
    let file = PressroomConfig::from_file(&path)?;
    std::fs::remove_file(&path).ok();

    let config = file
        .overlay(lookup(&[
            ("PRESSROOM_DRY_RUN", "off"),
            ("LINKEDIN_ACCESS_TOKEN", "env-token"),
            ("LINKEDIN_ORGANIZATION_ID", "7"),
        ]))?;

    assert!(!config.dry_run);
    let linkedin = config.platforms.linkedin.expect("linkedin credentials");
    assert_eq!(linkedin.access_token(), "env-token");
    assert_eq!(linkedin.organization_id(), "7");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = PressroomConfig::from_file("/nonexistent/pressroom.toml").unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::Io(_)));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let path = temp_config("malformed", "dry_run = \"maybe\"\n[dedup\n").unwrap();
    let err = PressroomConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err.kind, ConfigErrorKind::Parse(_)));
}

#[test]
fn test_zero_retention_in_file_is_invalid() {
    let path = temp_config("zero-retention", "[dedup]\nretention_hours = 0\n").unwrap();
    let err = PressroomConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err.kind, ConfigErrorKind::Invalid(_)));
}
