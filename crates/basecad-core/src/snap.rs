//! 网格捕捉
//!
//! 画布上的网格捕捉：坐标就近吸附到网格间距的整数倍。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 默认网格间距（像素）
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// 捕捉配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// 是否启用网格捕捉
    pub enabled: bool,
    /// 网格间距
    pub grid_size: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl SnapConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// 按配置捕捉点；未启用时原样返回
    pub fn snap(&self, point: Point2) -> Point2 {
        if self.enabled {
            snap_point(point, self.grid_size)
        } else {
            point
        }
    }
}

/// 单个坐标吸附到网格
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// 点吸附到网格
pub fn snap_point(point: Point2, grid_size: f64) -> Point2 {
    Point2::new(snap_to_grid(point.x, grid_size), snap_to_grid(point.y, grid_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(9.0, 20.0), 0.0);
        assert_eq!(snap_to_grid(10.0, 20.0), 20.0);
        assert_eq!(snap_to_grid(31.0, 20.0), 40.0);
        assert_eq!(snap_to_grid(-29.0, 20.0), -20.0);
        assert_eq!(snap_to_grid(7.3, 0.0), 7.3);
    }

    #[test]
    fn test_config_snap() {
        let p = Point2::new(13.0, 47.0);
        assert_eq!(SnapConfig::default().snap(p), Point2::new(20.0, 40.0));
        assert_eq!(SnapConfig::disabled().snap(p), p);
    }
}
