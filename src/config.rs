//! Configuration persistence for essaymark settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Marker;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MarkerColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// One color per marker category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerColors {
    pub sugestao: MarkerColor,
    pub acerto: MarkerColor,
    pub erro: MarkerColor,
}

impl MarkerColors {
    pub fn for_marker(&self, marker: Marker) -> MarkerColor {
        match marker {
            Marker::Sugestao => self.sugestao,
            Marker::Acerto => self.acerto,
            Marker::Erro => self.erro,
        }
    }
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self {
            // Amber
            sugestao: MarkerColor::rgb(0.96, 0.62, 0.04),
            // Green
            acerto: MarkerColor::rgb(0.13, 0.7, 0.3),
            // Red
            erro: MarkerColor::rgb(0.9, 0.1, 0.1),
        }
    }
}

/// Reviewer configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// A drag over the image must exceed this many pixels in both dimensions
    #[serde(default = "default_min_selection_px")]
    pub min_selection_px: f32,
    /// Characters of the quoted selection shown in text-mode entries
    #[serde(default = "default_quote_preview_chars")]
    pub quote_preview_chars: usize,
    /// Marker preselected when the popup opens
    #[serde(default)]
    pub default_marker: Marker,
    /// Colors used when flattening annotations onto the image
    #[serde(default)]
    pub marker_colors: MarkerColors,
    /// Stroke width of flattened annotation boxes, in image pixels
    #[serde(default = "default_box_stroke")]
    pub box_stroke: f32,
    /// Fill opacity of flattened annotation boxes (0.0-1.0)
    #[serde(default = "default_box_fill_alpha")]
    pub box_fill_alpha: f32,
    /// Where correction payloads are written (None = Documents folder)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_min_selection_px() -> f32 {
    10.0
}

fn default_quote_preview_chars() -> usize {
    40
}

fn default_box_stroke() -> f32 {
    3.0
}

fn default_box_fill_alpha() -> f32 {
    0.18
}

impl ReviewConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "essaymark";

    fn config_file_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("No config directory for this platform")?;
        Ok(dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::config_file_path() {
            Ok(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error loading config, using defaults: {:?}", err);
                    Self::default()
                }
            },
            Ok(_) => Self::default(),
            Err(err) => {
                log::warn!("Could not locate config file: {:?}", err);
                Self::default()
            }
        }
    }

    /// Read configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let result = Self::config_file_path().and_then(|path| self.save_to(&path));
        if let Err(err) = result {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Write configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Directory correction payloads are written to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::document_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_selection_px: default_min_selection_px(),
            quote_preview_chars: default_quote_preview_chars(),
            default_marker: Marker::Sugestao,
            marker_colors: MarkerColors::default(),
            box_stroke: default_box_stroke(),
            box_fill_alpha: default_box_fill_alpha(),
            output_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ReviewConfig = serde_json::from_str(r#"{"quote_preview_chars": 60}"#).unwrap();
        assert_eq!(config.quote_preview_chars, 60);
        assert_eq!(config.min_selection_px, 10.0);
        assert_eq!(config.default_marker, Marker::Sugestao);
        assert_eq!(config.marker_colors, MarkerColors::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ReviewConfig {
            default_marker: Marker::Erro,
            output_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = ReviewConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.output_dir(), dir.path());
    }

    #[test]
    fn test_load_from_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ReviewConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_marker_color_to_rgba() {
        let colors = MarkerColors {
            erro: MarkerColor::rgb(1.0, 0.0, 0.5),
            ..Default::default()
        };
        assert_eq!(colors.for_marker(Marker::Erro).to_rgba_u8(), [255, 0, 128, 255]);
    }
}
