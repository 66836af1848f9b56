//! 数学基础类型
//!
//! 所有坐标使用 f64，点和向量直接复用 nalgebra。

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// 几何比较容差
pub const EPSILON: f64 = 1e-10;

/// 二维轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 由点集构造；点集为空时返回 `None`
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first, first);
        for p in iter {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// 向四周扩展 `margin`
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// 点到线段的距离
pub fn distance_to_segment(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let (point, a, b) = (*point, *a, *b);
    let v = b - a;
    let w = point - a;

    let c1 = w.dot(&v);
    if c1 <= 0.0 {
        return (point - a).norm();
    }

    let c2 = v.dot(&v);
    if c2 <= c1 {
        return (point - b).norm();
    }

    let t = c1 / c2;
    (point - (a + v * t)).norm()
}
