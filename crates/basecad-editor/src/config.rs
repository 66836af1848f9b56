//! 编辑器配置
//!
//! 所有键都可省略，缺失的键取默认值。可从 TOML 文件加载：
//!
//! ```toml
//! max_history = 100
//! grid_size = 10.0
//! stroke = "#FF0000"
//! ```

use crate::error::EditorError;
use basecad_core::gesture::GestureOptions;
use basecad_core::history::DEFAULT_MAX_HISTORY;
use basecad_core::properties::{StrokeStyle, DEFAULT_STROKE, DRAWN_STROKE_WIDTH};
use basecad_core::snap::{SnapConfig, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认存储键
pub const DEFAULT_STORAGE_KEY: &str = "basecad-drawing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 最大历史条目数
    pub max_history: usize,
    pub grid_size: f64,
    pub grid_enabled: bool,
    /// 新图元的描边颜色
    pub stroke: String,
    pub stroke_width: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    /// 快照在存储中的键
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            grid_size: DEFAULT_GRID_SIZE,
            grid_enabled: true,
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DRAWN_STROKE_WIDTH,
            zoom_min: 0.25,
            zoom_max: 3.0,
            zoom_step: 0.1,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, EditorError> {
        Ok(toml::from_str(text)?)
    }

    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn snap_config(&self) -> SnapConfig {
        SnapConfig {
            enabled: self.grid_enabled,
            grid_size: self.grid_size,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.stroke.clone(), self.stroke_width)
    }

    pub fn gesture_options(&self) -> GestureOptions {
        GestureOptions {
            snap: self.snap_config(),
            stroke: self.stroke_style(),
            ..GestureOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.max_history, 50);
        assert_eq!(config.grid_size, 20.0);
        assert!(config.grid_enabled);
        assert_eq!(config.storage_key, "basecad-drawing");
        assert_eq!(config.stroke_style(), StrokeStyle::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = EditorConfig::from_toml_str("max_history = 5\ngrid_enabled = false\n").unwrap();
        assert_eq!(config.max_history, 5);
        assert!(!config.snap_config().enabled);
        assert_eq!(config.zoom_max, 3.0);
        assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            EditorConfig::from_toml_str("max_history = \"many\""),
            Err(EditorError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basecad.toml");
        std::fs::write(&path, "stroke = \"#FF0000\"\nstroke_width = 1.5\n").unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.gesture_options().stroke, StrokeStyle::new("#FF0000", 1.5));

        assert!(EditorConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
