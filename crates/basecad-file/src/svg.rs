//! SVG 导出
//!
//! 每个线段、矩形、圆输出一个元素，坐标为屏幕坐标。手绘路径不导出。

use basecad_core::document::Document;
use basecad_core::geometry::DrawingObject;

/// 画布宽度
pub const SVG_WIDTH: u32 = 800;
/// 画布高度
pub const SVG_HEIGHT: u32 = 600;

const FALLBACK_STROKE: &str = "#333";
const FALLBACK_STROKE_WIDTH: f64 = 2.0;
const FALLBACK_FILL: &str = "none";

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 描边属性，带回退值
fn stroke_attrs(stroke: &str, width: f64) -> String {
    let stroke = if stroke.is_empty() { FALLBACK_STROKE } else { stroke };
    let width = if width == 0.0 || width.is_nan() {
        FALLBACK_STROKE_WIDTH
    } else {
        width
    };
    format!(r#"stroke="{}" stroke-width="{}""#, escape_xml(stroke), width)
}

fn fill_attr(fill: Option<&str>) -> String {
    let fill = fill.filter(|f| !f.is_empty()).unwrap_or(FALLBACK_FILL);
    format!(r#"fill="{}""#, escape_xml(fill))
}

/// 文档导出为 SVG 文本
pub fn document_to_svg(document: &Document) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        SVG_WIDTH, SVG_HEIGHT
    );

    for object in document.objects() {
        let element = match object {
            DrawingObject::Line(l) => format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                l.x1,
                l.y1,
                l.x2,
                l.y2,
                stroke_attrs(&l.stroke, l.stroke_width)
            ),
            DrawingObject::Rect(r) => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {} {}/>"#,
                r.left,
                r.top,
                r.width,
                r.height,
                stroke_attrs(&r.stroke, r.stroke_width),
                fill_attr(r.fill.as_deref())
            ),
            DrawingObject::Circle(c) => {
                let center = c.center();
                format!(
                    r#"<circle cx="{}" cy="{}" r="{}" {} {}/>"#,
                    center.x,
                    center.y,
                    c.radius,
                    stroke_attrs(&c.stroke, c.stroke_width),
                    fill_attr(c.fill.as_deref())
                )
            }
            DrawingObject::Path(_) => continue,
        };
        out.push_str(&element);
    }

    out.push_str("</svg>");
    out
}
