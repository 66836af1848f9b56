//! 绘图手势
//!
//! 把一次完整的用户手势（按下 → 拖动 → 松开经过的点）转换为文档变更。
//! 这里不持有任何画布或事件库状态：输入是工具和点序列，输出是
//! [`DocumentDelta`]，由编辑会话负责应用并记录历史。

use crate::document::Document;
use crate::geometry::{Circle, DrawingObject, Line, Path, Rect};
use crate::math::Point2;
use crate::properties::StrokeStyle;
use crate::snap::SnapConfig;
use serde::{Deserialize, Serialize};

/// 绘图工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Line,
    Box,
    Circle,
    /// 手绘
    Draw,
    Move,
    Delete,
    Measure,
    Select,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Line => "Line",
            Tool::Box => "Box",
            Tool::Circle => "Circle",
            Tool::Draw => "Draw",
            Tool::Move => "Move",
            Tool::Delete => "Delete",
            Tool::Measure => "Measure",
            Tool::Select => "Select",
        }
    }

    /// 该工具的输入点是否参与网格捕捉
    ///
    /// 手绘、移动和删除使用原始指针位置。
    pub fn uses_grid(&self) -> bool {
        matches!(self, Tool::Line | Tool::Box | Tool::Circle | Tool::Measure)
    }
}

/// 一次手势对文档的变更
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDelta {
    /// 文档不变
    None,
    /// 在最上层追加图元
    Insert(DrawingObject),
    /// 删除图元
    Remove { index: usize },
    /// 替换图元（移动后的新状态）
    Replace { index: usize, object: DrawingObject },
}

impl DocumentDelta {
    pub fn is_none(&self) -> bool {
        matches!(self, DocumentDelta::None)
    }
}

/// 手势参数
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOptions {
    pub snap: SnapConfig,
    /// 新图元的描边
    pub stroke: StrokeStyle,
    /// 拾取容差
    pub hit_tolerance: f64,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            stroke: StrokeStyle::default(),
            hit_tolerance: 5.0,
        }
    }
}

/// 把手势转换为文档变更
///
/// `points` 是手势经过的指针位置（屏幕坐标），第一个是按下点，最后一个是松开点。
pub fn apply_gesture(document: &Document, tool: Tool, points: &[Point2], options: &GestureOptions) -> DocumentDelta {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return DocumentDelta::None;
    };

    let (start, end) = if tool.uses_grid() {
        (options.snap.snap(first), options.snap.snap(last))
    } else {
        (first, last)
    };

    match tool {
        Tool::Line => {
            if points.len() < 2 {
                return DocumentDelta::None;
            }
            DocumentDelta::Insert(DrawingObject::Line(Line::new(start, end).with_style(&options.stroke)))
        }
        Tool::Box => {
            if points.len() < 2 {
                return DocumentDelta::None;
            }
            DocumentDelta::Insert(DrawingObject::Rect(Rect::from_corners(start, end).with_style(&options.stroke)))
        }
        Tool::Circle => {
            if points.len() < 2 {
                return DocumentDelta::None;
            }
            // 圆的包围盒左上角固定在按下点，半径为拖动距离
            let radius = (end - start).norm();
            DocumentDelta::Insert(DrawingObject::Circle(
                Circle::new(start.x, start.y, radius).with_style(&options.stroke),
            ))
        }
        Tool::Draw => {
            if points.len() < 2 {
                return DocumentDelta::None;
            }
            DocumentDelta::Insert(DrawingObject::Path(
                Path::new(points.iter().copied()).with_style(&options.stroke),
            ))
        }
        Tool::Delete => match document.hit_test(&start, options.hit_tolerance) {
            Some(index) => DocumentDelta::Remove { index },
            None => DocumentDelta::None,
        },
        Tool::Move => {
            let delta = end - start;
            if delta.norm() == 0.0 {
                return DocumentDelta::None;
            }
            let Some(index) = document.hit_test(&start, options.hit_tolerance) else {
                return DocumentDelta::None;
            };
            let Some(mut object) = document.get(index).cloned() else {
                return DocumentDelta::None;
            };
            object.translate(delta);
            DocumentDelta::Replace { index, object }
        }
        Tool::Measure | Tool::Select => DocumentDelta::None,
    }
}

/// 测量两点距离，结果四舍五入为整数
pub fn measure(a: Point2, b: Point2, snap: &SnapConfig) -> f64 {
    let (a, b) = (snap.snap(a), snap.snap(b));
    (b - a).norm().round()
}
