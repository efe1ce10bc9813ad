//! Configuration system tests
//!
//! Tests for config paths and grid config persistence.

use cellgrid::config::GridConfig;
use cellgrid::config_paths;
use cellgrid::overlay::OverlayMetrics;
use tempfile::tempdir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("cellgrid"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Grid Config Tests
// ========================================================================

#[test]
fn test_defaults_match_overlay_metrics() {
    let config = GridConfig::default();
    assert_eq!(config.overlay_metrics(), OverlayMetrics::default());
    assert_eq!(config.column_width_for("id"), 70.0);
    assert_eq!(config.column_width_for("name"), 200.0);
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = GridConfig {
        overlay_expansion: 4.0,
        row_height: 40.0,
        ..GridConfig::default()
    };
    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(GridConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = GridConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, GridConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "row_height: 24\nmin_cell_height: 30\n").unwrap();

    let config = GridConfig::load_from(&path);
    assert_eq!(config.row_height, 24.0);
    assert_eq!(config.min_cell_height, 30.0);
    assert_eq!(config.header_height, GridConfig::default().header_height);
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "row_height: [not, a, number").unwrap();
    assert_eq!(GridConfig::load_from(&path), GridConfig::default());
}
