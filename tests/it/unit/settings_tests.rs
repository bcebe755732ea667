//! Settings loading from disk.

use rectboard::session::ResizeLimits;
use rectboard::settings::{EngineSettings, SettingsError, default_settings_path};
use rectboard::types::Surface;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "surface": { "width": 640.0, "height": 480.0 },
            "hit_threshold": 8.0,
            "min_selection_size": 20.0,
            "stroke_color": "blue"
        }"#,
    )
    .unwrap();

    let settings = EngineSettings::load(&path).unwrap();
    assert_eq!(settings.surface, Surface::new(640.0, 480.0));
    assert_eq!(settings.stroke_color, "blue");
    assert_eq!(
        settings.resize_limits(),
        ResizeLimits {
            threshold: 8.0,
            min_size: 20.0,
        }
    );
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = EngineSettings::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, EngineSettings::default());
}

#[test]
fn test_missing_file_is_an_error_for_load() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        EngineSettings::load(&dir.path().join("absent.json")),
        Err(SettingsError::Read { .. })
    ));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        EngineSettings::load_or_default(&path),
        Err(SettingsError::Parse { .. })
    ));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "hit_threshold": -1.0 }"#).unwrap();

    assert!(matches!(
        EngineSettings::load(&path),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn test_default_path_is_under_config_dir() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("rectboard/settings.json"));
    }
}
