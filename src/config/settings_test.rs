// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

fn load(overrides: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let mut builder = Settings::builder_with_defaults()?;
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value)?;
    }
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[test]
fn test_defaults_fill_optional_sections() {
    let settings = load(&[
        ("database.url", "postgres://localhost/contentdesk"),
        ("hotlist.api_key", "secret-key"),
    ])
    .unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.hotlist.base_url, DEFAULT_HOTLIST_BASE_URL);
    assert_eq!(settings.hotlist.timeout_secs, 10);
    assert_eq!(settings.hotlist.ping_timeout_secs, 5);
    assert!(!settings.metrics.enabled);
    assert!(!settings.logging.json);
}

#[test]
fn test_missing_database_url_is_fatal() {
    let result = load(&[("hotlist.api_key", "secret-key")]);
    assert!(result.is_err());
}

#[test]
fn test_missing_hotlist_key_is_fatal() {
    let result = load(&[("database.url", "postgres://localhost/contentdesk")]);
    assert!(result.is_err());
}

#[test]
fn test_blank_hotlist_key_is_rejected() {
    let err = load(&[
        ("database.url", "postgres://localhost/contentdesk"),
        ("hotlist.api_key", "   "),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("hotlist.api_key"));
}
