//! Grid configuration persistence
//!
//! Stores layout and overlay preferences in `~/.config/cellgrid/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayMetrics;

/// Grid configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Outward growth of an open overlay past its cell, per side
    #[serde(default = "default_overlay_expansion")]
    pub overlay_expansion: f32,
    /// Floor for auto-growing text areas
    #[serde(default = "default_min_cell_height")]
    pub min_cell_height: f32,
    /// Added to a text area once it outgrows `min_cell_height`
    #[serde(default = "default_autogrow_buffer")]
    pub autogrow_buffer: f32,
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    #[serde(default = "default_column_width")]
    pub column_width: f32,
    /// Width of the `id` column
    #[serde(default = "default_id_column_width")]
    pub id_column_width: f32,
    /// Text line height inside editors (12px font at 1.8)
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Average glyph advance used to estimate wrapping
    #[serde(default = "default_char_width")]
    pub char_width: f32,
}

fn default_overlay_expansion() -> f32 {
    2.0
}

fn default_min_cell_height() -> f32 {
    36.0
}

fn default_autogrow_buffer() -> f32 {
    2.0
}

fn default_row_height() -> f32 {
    36.0
}

fn default_header_height() -> f32 {
    48.0
}

fn default_column_width() -> f32 {
    200.0
}

fn default_id_column_width() -> f32 {
    70.0
}

fn default_line_height() -> f32 {
    21.6
}

fn default_char_width() -> f32 {
    7.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            overlay_expansion: default_overlay_expansion(),
            min_cell_height: default_min_cell_height(),
            autogrow_buffer: default_autogrow_buffer(),
            row_height: default_row_height(),
            header_height: default_header_height(),
            column_width: default_column_width(),
            id_column_width: default_id_column_width(),
            line_height: default_line_height(),
            char_width: default_char_width(),
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Overlay sizing constants
    pub fn overlay_metrics(&self) -> OverlayMetrics {
        OverlayMetrics {
            expansion: self.overlay_expansion,
            min_cell_height: self.min_cell_height,
            autogrow_buffer: self.autogrow_buffer,
        }
    }

    /// Width of a column by name
    pub fn column_width_for(&self, column: &str) -> f32 {
        if column == crate::model::ID_COLUMN {
            self.id_column_width
        } else {
            self.column_width
        }
    }
}
