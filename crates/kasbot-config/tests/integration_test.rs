//! Integration tests for kasbot-config.

use kasbot_config::{Config, ConfigLoader};
use std::io::Write;

#[test]
fn default_config_requires_a_token() {
    let mut config = Config::default();

    // default config fails validation due to the empty token
    assert!(config.validate_all().is_err());

    config.discord.token = "test.token.value".to_string();
    assert!(config.validate_all().is_ok());
}

#[test]
fn yaml_file_overrides_only_named_sections() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "discord:\n  token: \"test.token.value\"\nproviders:\n  kaspa_base_url: \"http://localhost:8080\"\n"
    )
    .expect("write yaml");

    let config = ConfigLoader::load_from_file(file.path()).expect("load");
    assert_eq!(config.providers.kaspa_base_url, "http://localhost:8080");
    // unnamed sections fall back to defaults
    assert_eq!(config.discord.request_timeout_seconds, 30);
    assert_eq!(config.health.port, 3000);
    assert_eq!(config.logging.level, "info");
}
