//! 坐标系转换
//!
//! 编辑器使用屏幕坐标（原点左上，Y 向下）；DXF 使用 CAD 坐标（Y 向上）。
//! 两者之间只做 Y 取反：`cad_y = -screen_y`。
//!
//! 只镜像位置坐标。角度（DXF 中以度为单位、从 X 正方向逆时针计）按原样使用。

use crate::geometry::{Circle, Rect};
use crate::math::Point2;

/// Y 轴镜像
#[inline]
pub fn flip_y(y: f64) -> f64 {
    -y
}

/// 屏幕坐标 → CAD 坐标
#[inline]
pub fn screen_to_cad(p: Point2) -> Point2 {
    Point2::new(p.x, flip_y(p.y))
}

/// CAD 坐标 → 屏幕坐标
#[inline]
pub fn cad_to_screen(p: Point2) -> Point2 {
    Point2::new(p.x, flip_y(p.y))
}

/// 矩形四个角点（CAD 坐标）
///
/// 顺序：左上 → 右上 → 右下 → 左下。CAD 中上边位于 `-top`，
/// 下边位于 `-(top + height)`。
pub fn rect_corners_cad(rect: &Rect) -> [Point2; 4] {
    let x = rect.left;
    let y = flip_y(rect.top);
    let (w, h) = (rect.width, rect.height);
    [
        Point2::new(x, y),
        Point2::new(x + w, y),
        Point2::new(x + w, y - h),
        Point2::new(x, y - h),
    ]
}

/// 圆心（CAD 坐标）：`(left + r, -(top + r))`
pub fn circle_center_cad(circle: &Circle) -> Point2 {
    Point2::new(circle.left + circle.radius, flip_y(circle.top + circle.radius))
}

/// 由 CAD 圆心反求屏幕包围盒左上角 `(left, top)`
pub fn circle_origin_from_cad(center: Point2, radius: f64) -> (f64, f64) {
    (center.x - radius, flip_y(center.y) - radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_flip_roundtrip() {
        let screen = Point2::new(10.0, 20.0);
        let cad = screen_to_cad(screen);
        assert_eq!(cad, Point2::new(10.0, -20.0));
        assert_eq!(cad_to_screen(cad), screen);
    }

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let [tl, tr, br, bl] = rect_corners_cad(&rect);
        assert_eq!(tl, Point2::new(10.0, -20.0));
        assert_eq!(tr, Point2::new(40.0, -20.0));
        assert_eq!(br, Point2::new(40.0, -60.0));
        assert_eq!(bl, Point2::new(10.0, -60.0));
    }

    #[test]
    fn test_circle_center_roundtrip() {
        let circle = Circle::new(10.0, 20.0, 5.0);
        let center = circle_center_cad(&circle);
        assert_eq!(center, Point2::new(15.0, -25.0));
        assert_eq!(circle_origin_from_cad(center, 5.0), (10.0, 20.0));
    }
}
