//! 图元定义
//!
//! 支持的图元：
//! - 线段 (Line)
//! - 矩形 (Rect)
//! - 圆 (Circle)
//! - 手绘路径 (Path)
//!
//! 所有坐标都处于屏幕坐标系（原点左上，Y 向下）。矩形和圆的 `left`/`top`
//! 是包围盒左上角，不是中心。

use crate::math::{distance_to_segment, BoundingBox2, Point2, Vector2};
use crate::properties::{StrokeStyle, DEFAULT_STROKE, IMPORTED_STROKE_WIDTH, TRANSPARENT};
use serde::{Deserialize, Deserializer, Serialize};

/// 图元枚举
///
/// 序列化为带 `type` 标签的扁平 JSON 对象，例如
/// `{"type":"line","x1":0,"y1":0,"x2":10,"y2":0,"stroke":"#333333","strokeWidth":3}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawingObject {
    Line(Line),
    Rect(Rect),
    Circle(Circle),
    Path(Path),
}

impl DrawingObject {
    /// 获取类型名称（与 JSON 中的 `type` 字段一致）
    pub fn type_name(&self) -> &'static str {
        match self {
            DrawingObject::Line(_) => "line",
            DrawingObject::Rect(_) => "rect",
            DrawingObject::Circle(_) => "circle",
            DrawingObject::Path(_) => "path",
        }
    }

    pub fn stroke(&self) -> &str {
        match self {
            DrawingObject::Line(l) => &l.stroke,
            DrawingObject::Rect(r) => &r.stroke,
            DrawingObject::Circle(c) => &c.stroke,
            DrawingObject::Path(p) => &p.stroke,
        }
    }

    pub fn stroke_width(&self) -> f64 {
        match self {
            DrawingObject::Line(l) => l.stroke_width,
            DrawingObject::Rect(r) => r.stroke_width,
            DrawingObject::Circle(c) => c.stroke_width,
            DrawingObject::Path(p) => p.stroke_width,
        }
    }

    /// 包围盒（屏幕坐标）；空路径没有包围盒
    pub fn bounds(&self) -> Option<BoundingBox2> {
        match self {
            DrawingObject::Line(l) => BoundingBox2::from_points([l.start(), l.end()]),
            DrawingObject::Rect(r) => Some(BoundingBox2::new(
                Point2::new(r.left, r.top),
                Point2::new(r.left + r.width, r.top + r.height),
            )),
            DrawingObject::Circle(c) => Some(BoundingBox2::new(
                Point2::new(c.left, c.top),
                Point2::new(c.left + 2.0 * c.radius, c.top + 2.0 * c.radius),
            )),
            DrawingObject::Path(p) => BoundingBox2::from_points(p.points.iter().map(|pt| pt.to_point2())),
        }
    }

    /// 拾取测试
    ///
    /// 线段和路径按到线段的距离判断；矩形按包围盒判断；圆按到圆心的距离判断。
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        let reach = tolerance + self.stroke_width() / 2.0;
        match self {
            DrawingObject::Line(l) => distance_to_segment(point, &l.start(), &l.end()) <= reach,
            DrawingObject::Rect(_) => self
                .bounds()
                .is_some_and(|b| b.expand(reach).contains(point)),
            DrawingObject::Circle(c) => (*point - c.center()).norm() <= c.radius + reach,
            DrawingObject::Path(p) => match p.points.as_slice() {
                [] => false,
                [only] => (*point - only.to_point2()).norm() <= reach,
                points => points
                    .windows(2)
                    .any(|w| distance_to_segment(point, &w[0].to_point2(), &w[1].to_point2()) <= reach),
            },
        }
    }

    /// 平移
    pub fn translate(&mut self, delta: Vector2) {
        match self {
            DrawingObject::Line(l) => {
                l.x1 += delta.x;
                l.y1 += delta.y;
                l.x2 += delta.x;
                l.y2 += delta.y;
            }
            DrawingObject::Rect(r) => {
                r.left += delta.x;
                r.top += delta.y;
            }
            DrawingObject::Circle(c) => {
                c.left += delta.x;
                c.top += delta.y;
            }
            DrawingObject::Path(p) => {
                for pt in &mut p.points {
                    pt.x += delta.x;
                    pt.y += delta.y;
                }
            }
        }
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        let style = StrokeStyle::default();
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            stroke: style.color,
            stroke_width: style.width,
        }
    }

    pub fn with_style(mut self, style: &StrokeStyle) -> Self {
        self.stroke = style.color.clone();
        self.stroke_width = style.width;
        self
    }

    pub fn start(&self) -> Point2 {
        Point2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point2 {
        Point2::new(self.x2, self.y2)
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end() - self.start()).norm()
    }
}

/// 矩形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        let style = StrokeStyle::default();
        Self {
            left,
            top,
            width,
            height,
            stroke: style.color,
            stroke_width: style.width,
            fill: Some(TRANSPARENT.to_string()),
        }
    }

    /// 由任意两个对角点创建（宽高取绝对值）
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    pub fn with_style(mut self, style: &StrokeStyle) -> Self {
        self.stroke = style.color.clone();
        self.stroke_width = style.width;
        self
    }

    pub fn with_fill(mut self, fill: Option<String>) -> Self {
        self.fill = fill;
        self
    }
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub left: f64,
    pub top: f64,
    pub radius: f64,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl Circle {
    pub fn new(left: f64, top: f64, radius: f64) -> Self {
        let style = StrokeStyle::default();
        Self {
            left,
            top,
            radius,
            stroke: style.color,
            stroke_width: style.width,
            fill: Some(TRANSPARENT.to_string()),
        }
    }

    /// 由圆心创建
    pub fn from_center(center: Point2, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius)
    }

    pub fn with_style(mut self, style: &StrokeStyle) -> Self {
        self.stroke = style.color.clone();
        self.stroke_width = style.width;
        self
    }

    pub fn with_fill(mut self, fill: Option<String>) -> Self {
        self.fill = fill;
        self
    }

    /// 圆心（屏幕坐标）
    pub fn center(&self) -> Point2 {
        Point2::new(self.left + self.radius, self.top + self.radius)
    }
}

/// 路径上的点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_point2(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl From<Point2> for PathPoint {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// 手绘路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub points: Vec<PathPoint>,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Path {
    pub fn new(points: impl IntoIterator<Item = Point2>) -> Self {
        let style = StrokeStyle::default();
        Self {
            points: points.into_iter().map(PathPoint::from).collect(),
            stroke: style.color,
            stroke_width: style.width,
        }
    }

    pub fn with_style(mut self, style: &StrokeStyle) -> Self {
        self.stroke = style.color.clone();
        self.stroke_width = style.width;
        self
    }

    /// 相邻点组成的线段数
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// 宽松形式的图元，所有字段可选
///
/// 用于读取外部快照：字段缺失或类型未知的对象在转换时被跳过，而不是让
/// 整个文档解析失败。数值字段接受数字或数字字符串，其他值视为缺失。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObject {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub left: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub top: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stroke_width: Option<f64>,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub points: Option<Vec<PathPoint>>,
}

impl RawObject {
    /// 转换为强类型图元
    ///
    /// 缺少必需几何字段、宽高/半径为负或类型未知时返回 `None`。
    pub fn into_object(self) -> Option<DrawingObject> {
        let stroke = self.stroke.unwrap_or_else(|| DEFAULT_STROKE.to_string());
        let stroke_width = self.stroke_width.unwrap_or(IMPORTED_STROKE_WIDTH);

        match self.kind.as_str() {
            "line" => Some(DrawingObject::Line(Line {
                x1: self.x1?,
                y1: self.y1?,
                x2: self.x2?,
                y2: self.y2?,
                stroke,
                stroke_width,
            })),
            "rect" => {
                let (width, height) = (self.width?, self.height?);
                if width < 0.0 || height < 0.0 {
                    return None;
                }
                Some(DrawingObject::Rect(Rect {
                    left: self.left?,
                    top: self.top?,
                    width,
                    height,
                    stroke,
                    stroke_width,
                    fill: self.fill,
                }))
            }
            "circle" => {
                let radius = self.radius?;
                if radius < 0.0 {
                    return None;
                }
                Some(DrawingObject::Circle(Circle {
                    left: self.left?,
                    top: self.top?,
                    radius,
                    stroke,
                    stroke_width,
                    fill: self.fill,
                }))
            }
            "path" => Some(DrawingObject::Path(Path {
                points: self.points?,
                stroke,
                stroke_width,
            })),
            _ => None,
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}
