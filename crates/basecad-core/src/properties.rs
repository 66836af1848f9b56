//! 图元视觉属性
//!
//! 颜色统一使用 `#RRGGBB` 十六进制字符串，与画布层的 JSON 快照保持一致。

use serde::{Deserialize, Serialize};

/// 缺省描边颜色
pub const DEFAULT_STROKE: &str = "#333333";

/// 新绘制图元的线宽
pub const DRAWN_STROKE_WIDTH: f64 = 3.0;

/// 导入图元（DXF/缺省字段）的线宽
pub const IMPORTED_STROKE_WIDTH: f64 = 2.0;

/// 透明填充
pub const TRANSPARENT: &str = "transparent";

/// 描边样式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }

    /// 导入时使用的样式（线宽 2）
    pub fn imported(color: impl Into<String>) -> Self {
        Self::new(color, IMPORTED_STROKE_WIDTH)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE, DRAWN_STROKE_WIDTH)
    }
}

/// 把颜色字符串规范化为大写 `#RRGGBB`；无法识别时返回 `None`
///
/// 接受 `#RGB` 简写。
pub fn normalize_hex(color: &str) -> Option<String> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(format!("#{}", hex.to_ascii_uppercase())),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{}", expanded.to_ascii_uppercase()))
        }
        _ => None,
    }
}
