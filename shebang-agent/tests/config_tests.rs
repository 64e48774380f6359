use pretty_assertions::assert_eq;
use shebang_agent::{AgentConfig, AgentError, DecryptMode};
use std::io::Write;
use std::time::Duration;

#[test]
fn defaults_match_page_timings() {
    let config = AgentConfig::default();
    assert_eq!(config.element_timeout(), Duration::from_secs(10));
    assert_eq!(config.render_settle(), Duration::from_millis(1000));
    assert_eq!(config.input_settle(), Duration::from_millis(100));
    assert_eq!(config.decrypt_mode, DecryptMode::Host);
    assert_eq!(config.storage_key, "keys");
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_gives_defaults() {
    let config = AgentConfig::from_toml_str("").unwrap();
    assert_eq!(config.element_timeout_ms, 10_000);
    assert_eq!(config.decrypt_mode, DecryptMode::Host);
}

#[test]
fn partial_toml_overrides_only_given_fields() {
    let config = AgentConfig::from_toml_str(
        r#"
        render_settle_ms = 250
        decrypt_mode = "local"
        "#,
    )
    .unwrap();
    assert_eq!(config.render_settle(), Duration::from_millis(250));
    assert_eq!(config.decrypt_mode, DecryptMode::Local);
    assert_eq!(config.input_settle_ms, 100);
    assert_eq!(config.storage_key, "keys");
}

#[test]
fn unknown_mode_is_rejected() {
    let err = AgentConfig::from_toml_str(r#"decrypt_mode = "remote""#).unwrap_err();
    assert!(matches!(err, AgentError::Config(_)));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = AgentConfig::from_toml_str("element_timeout_ms = 0").unwrap_err();
    assert!(matches!(err, AgentError::Config(ref m) if m.contains("element_timeout_ms")));
}

#[test]
fn blank_storage_key_is_rejected() {
    let err = AgentConfig::from_toml_str(r#"storage_key = "  ""#).unwrap_err();
    assert!(matches!(err, AgentError::Config(ref m) if m.contains("storage_key")));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "input_settle_ms = 40").unwrap();
    writeln!(file, "storage_key = \"work-keys\"").unwrap();

    let config = AgentConfig::load(file.path()).unwrap();
    assert_eq!(config.input_settle(), Duration::from_millis(40));
    assert_eq!(config.storage_key, "work-keys");
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AgentConfig::load(&dir.path().join("agent.toml")).unwrap_err();
    assert!(matches!(err, AgentError::Config(ref m) if m.contains("agent.toml")));
}
