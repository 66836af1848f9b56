//! DXF文件导入/导出
//!
//! 文档与 DXF 文本之间的编解码，基于 `dxf` crate。所有位置坐标在两个
//! 方向上都做 Y 取反，角度按原样使用（度）。
//!
//! 导出写入 R12 (AC1009)。实体使用 `dxf` 的默认图层 `0`，只有描边是
//! 调色板颜色的线段、矩形、圆才写入颜色；手绘路径不带颜色。

use crate::error::FileError;
use basecad_core::coords::{cad_to_screen, circle_center_cad, circle_origin_from_cad, rect_corners_cad, screen_to_cad};
use basecad_core::document::Document;
use basecad_core::geometry::{Circle, DrawingObject, Line};
use basecad_core::math::Point2;
use basecad_core::properties::{normalize_hex, StrokeStyle, DEFAULT_STROKE, TRANSPARENT};
use dxf::entities::{Entity, EntityType};
use std::path::Path;

/// 圆弧离散化的线段数
pub const ARC_SEGMENTS: usize = 32;

/// POINT 实体导入后的圆半径
pub const POINT_RADIUS: f64 = 2.0;

/// 调色板中的 ACI 颜色
const ACI_PALETTE: [(u8, &str); 9] = [
    (1, "#FF0000"),
    (2, "#FFFF00"),
    (3, "#00FF00"),
    (4, "#00FFFF"),
    (5, "#0000FF"),
    (6, "#FF00FF"),
    (7, "#000000"),
    (8, "#808080"),
    (9, "#C0C0C0"),
];

/// ACI 颜色索引转换为十六进制颜色
///
/// 没有索引（ByLayer / ByBlock）时按 7 处理；调色板外的索引回退为 `#333333`。
pub fn aci_to_hex(index: Option<u8>) -> &'static str {
    let index = index.unwrap_or(7);
    ACI_PALETTE
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_STROKE)
}

/// 十六进制颜色转换为 ACI 索引；只匹配调色板中的颜色
pub fn hex_to_aci(color: &str) -> Option<u8> {
    let hex = normalize_hex(color)?;
    ACI_PALETTE.iter().find(|(_, h)| *h == hex).map(|(i, _)| *i)
}

fn to_dxf_point(p: Point2) -> dxf::Point {
    dxf::Point::new(p.x, p.y, 0.0)
}

fn with_color(specific: EntityType, color: Option<u8>) -> Entity {
    let mut entity = Entity::new(specific);
    if let Some(index) = color {
        entity.common.color = dxf::Color::from_index(index);
    }
    entity
}

fn line_entity(start: Point2, end: Point2, color: Option<u8>) -> Entity {
    with_color(
        EntityType::Line(dxf::entities::Line::new(to_dxf_point(start), to_dxf_point(end))),
        color,
    )
}

/// 文档转换为 DXF 图纸（CAD 坐标）
pub fn to_drawing(document: &Document) -> dxf::Drawing {
    let mut drawing = dxf::Drawing::new();
    drawing.header.version = dxf::enums::AcadVersion::R12;

    for object in document.objects() {
        match object {
            DrawingObject::Line(line) => {
                drawing.add_entity(line_entity(
                    screen_to_cad(line.start()),
                    screen_to_cad(line.end()),
                    hex_to_aci(&line.stroke),
                ));
            }
            DrawingObject::Rect(rect) => {
                let color = hex_to_aci(&rect.stroke);
                let corners = rect_corners_cad(rect);
                for (i, corner) in corners.iter().enumerate() {
                    drawing.add_entity(line_entity(*corner, corners[(i + 1) % corners.len()], color));
                }
            }
            DrawingObject::Circle(circle) => {
                let specific = EntityType::Circle(dxf::entities::Circle::new(
                    to_dxf_point(circle_center_cad(circle)),
                    circle.radius,
                ));
                drawing.add_entity(with_color(specific, hex_to_aci(&circle.stroke)));
            }
            DrawingObject::Path(path) => {
                for pair in path.points.windows(2) {
                    drawing.add_entity(line_entity(
                        screen_to_cad(pair[0].to_point2()),
                        screen_to_cad(pair[1].to_point2()),
                        None,
                    ));
                }
            }
        }
    }

    drawing
}

/// 文档编码为 DXF 文本
///
/// 空文档同样输出完整的 DXF 结构。
pub fn encode(document: &Document) -> Result<String, FileError> {
    let drawing = to_drawing(document);
    let mut buffer = Vec::new();
    drawing.save(&mut buffer).map_err(|e| FileError::Dxf(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| FileError::Dxf(e.to_string()))
}

/// DXF 文本解码为文档
///
/// 文本为空或不是可解析的 DXF 时返回 [`FileError::Dxf`]。
pub fn decode(text: &str) -> Result<Document, FileError> {
    if text.trim().is_empty() {
        return Err(FileError::Dxf("Empty input".to_string()));
    }
    let drawing = dxf::Drawing::load(&mut text.as_bytes()).map_err(|e| FileError::Dxf(e.to_string()))?;
    Ok(from_drawing(&drawing))
}

/// DXF 图纸转换为文档
pub fn from_drawing(drawing: &dxf::Drawing) -> Document {
    let mut document = Document::new();
    let mut total = 0usize;
    let mut ignored = 0usize;

    for entity in drawing.entities() {
        total += 1;
        let objects = convert_dxf_entity(entity);
        if objects.is_empty() {
            ignored += 1;
        }
        for object in objects {
            document.push(object);
        }
    }

    if ignored > 0 {
        tracing::debug!("Ignored {} DXF entities", ignored);
    }
    tracing::info!("Decoded {} DXF entities into {} objects", total, document.len());

    document
}

/// 将DXF实体转换为图元（圆弧和多段线产生多个线段）
fn convert_dxf_entity(entity: &Entity) -> Vec<DrawingObject> {
    let hex = aci_to_hex(entity.common.color.index());
    let style = StrokeStyle::imported(hex);
    let segments = |points: Vec<Point2>| -> Vec<DrawingObject> {
        points
            .windows(2)
            .map(|pair| DrawingObject::Line(Line::new(pair[0], pair[1]).with_style(&style)))
            .collect()
    };

    match &entity.specific {
        EntityType::Line(line) => vec![DrawingObject::Line(
            Line::new(
                cad_to_screen(Point2::new(line.p1.x, line.p1.y)),
                cad_to_screen(Point2::new(line.p2.x, line.p2.y)),
            )
            .with_style(&style),
        )],

        EntityType::Circle(circle) => {
            let center = Point2::new(circle.center.x, circle.center.y);
            let (left, top) = circle_origin_from_cad(center, circle.radius);
            vec![DrawingObject::Circle(
                Circle::new(left, top, circle.radius)
                    .with_style(&style)
                    .with_fill(Some(TRANSPARENT.to_string())),
            )]
        }

        EntityType::Arc(arc) => segments(tessellate_arc(
            Point2::new(arc.center.x, arc.center.y),
            arc.radius,
            arc.start_angle,
            arc.end_angle,
        )),

        EntityType::LwPolyline(lwpoly) => {
            let vertices = lwpoly.vertices.iter().map(|v| Point2::new(v.x, v.y));
            segments(polyline_points(vertices, lwpoly.is_closed()))
        }

        EntityType::Polyline(poly) => {
            let vertices = poly.vertices().map(|v| Point2::new(v.location.x, v.location.y));
            segments(polyline_points(vertices, poly.is_closed()))
        }

        EntityType::ModelPoint(point) => {
            let center = cad_to_screen(Point2::new(point.location.x, point.location.y));
            vec![DrawingObject::Circle(
                Circle::from_center(center, POINT_RADIUS)
                    .with_style(&style)
                    .with_fill(Some(hex.to_string())),
            )]
        }

        _ => Vec::new(),
    }
}

/// 多段线顶点转为屏幕坐标；不足两个顶点时为空，闭合时追加起点
fn polyline_points(vertices: impl Iterator<Item = Point2>, closed: bool) -> Vec<Point2> {
    let mut points: Vec<Point2> = vertices.map(cad_to_screen).collect();
    if points.len() < 2 {
        return Vec::new();
    }
    if closed {
        points.push(points[0]);
    }
    points
}

/// 圆弧离散化为 [`ARC_SEGMENTS`] + 1 个点
///
/// 角度以度为单位，终止角为 0 时按 360 处理。
/// 圆心 Y 不取反：`y = cy - r·sin(a)`。
pub fn tessellate_arc(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Vec<Point2> {
    let end = if end_angle == 0.0 { 360.0 } else { end_angle };
    let step = (end - start_angle) / ARC_SEGMENTS as f64;

    (0..=ARC_SEGMENTS)
        .map(|i| {
            let a = (start_angle + step * i as f64).to_radians();
            Point2::new(center.x + radius * a.cos(), center.y - radius * a.sin())
        })
        .collect()
}

/// 从DXF文件导入
pub fn import(path: &Path) -> Result<Document, FileError> {
    let text = std::fs::read_to_string(path)?;
    decode(&text)
}

/// 导出到DXF文件
pub fn export(document: &Document, path: &Path) -> Result<(), FileError> {
    std::fs::write(path, encode(document)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basecad_core::geometry::{Path as SketchPath, Rect};
    use proptest::prelude::*;

    fn entities_dxf(body: &str) -> String {
        format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body)
    }

    fn lines(document: &Document) -> Vec<&Line> {
        document
            .objects()
            .iter()
            .filter_map(|o| match o {
                DrawingObject::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    fn reload(document: &Document) -> dxf::Drawing {
        let text = encode(document).unwrap();
        dxf::Drawing::load(&mut text.as_bytes()).unwrap()
    }

    #[test]
    fn test_aci_lookup() {
        assert_eq!(aci_to_hex(Some(1)), "#FF0000");
        assert_eq!(aci_to_hex(Some(7)), "#000000");
        assert_eq!(aci_to_hex(Some(9)), "#C0C0C0");
        assert_eq!(aci_to_hex(Some(99)), "#333333");
        assert_eq!(aci_to_hex(None), "#000000");

        assert_eq!(hex_to_aci("#ff0000"), Some(1));
        assert_eq!(hex_to_aci("#f0f"), Some(6));
        assert_eq!(hex_to_aci("#333333"), None);
        assert_eq!(hex_to_aci("red"), None);
    }

    #[test]
    fn test_line_flip_example() {
        let doc = Document::from_objects(vec![DrawingObject::Line(Line::new(
            Point2::new(10.0, 20.0),
            Point2::new(30.0, 40.0),
        ))]);
        let drawing = reload(&doc);
        match &drawing.entities().next().unwrap().specific {
            EntityType::Line(line) => {
                assert_eq!((line.p1.x, line.p1.y), (10.0, -20.0));
                assert_eq!((line.p2.x, line.p2.y), (30.0, -40.0));
            }
            other => panic!("Expected line, got {:?}", other),
        }

        let decoded = decode(&encode(&doc).unwrap()).unwrap();
        let line = lines(&decoded)[0];
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 20.0, 30.0, 40.0));
        assert_eq!(line.stroke_width, 2.0);
    }

    #[test]
    fn test_empty_document_is_valid_dxf() {
        let text = encode(&Document::new()).unwrap();
        assert!(text.contains("AC1009"));
        assert!(text.contains("ENTITIES"));
        assert!(text.trim_end().ends_with("EOF"));
        assert!(decode(&text).unwrap().is_empty());
    }

    #[test]
    fn test_rect_encodes_four_lines() {
        let doc = Document::from_objects(vec![DrawingObject::Rect(Rect::new(10.0, 20.0, 30.0, 40.0))]);
        let decoded = decode(&encode(&doc).unwrap()).unwrap();
        let edges: Vec<_> = lines(&decoded).iter().map(|l| (l.x1, l.y1, l.x2, l.y2)).collect();
        assert_eq!(
            edges,
            vec![
                (10.0, 20.0, 40.0, 20.0),
                (40.0, 20.0, 40.0, 60.0),
                (40.0, 60.0, 10.0, 60.0),
                (10.0, 60.0, 10.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_circle_encoding() {
        let doc = Document::from_objects(vec![DrawingObject::Circle(Circle::new(10.0, 20.0, 5.0))]);
        match &reload(&doc).entities().next().unwrap().specific {
            EntityType::Circle(circle) => {
                assert_eq!((circle.center.x, circle.center.y, circle.radius), (15.0, -25.0, 5.0));
            }
            other => panic!("Expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_path_segments_carry_no_color() {
        let path = SketchPath::new([Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)])
            .with_style(&StrokeStyle::new("#FF0000", 3.0));
        let drawing = reload(&Document::from_objects(vec![DrawingObject::Path(path)]));
        let entities: Vec<_> = drawing.entities().collect();
        assert_eq!(entities.len(), 2);
        for entity in entities {
            assert!(matches!(entity.specific, EntityType::Line(_)));
            assert!(entity.common.color.is_by_layer());
            assert_eq!(entity.common.layer, "0");
        }
    }

    #[test]
    fn test_palette_stroke_survives_roundtrip() {
        let red = StrokeStyle::new("#FF0000", 3.0);
        let doc = Document::from_objects(vec![DrawingObject::Line(
            Line::new(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)).with_style(&red),
        )]);
        let drawing = reload(&doc);
        assert_eq!(drawing.entities().next().unwrap().common.color.index(), Some(1));

        let decoded = decode(&encode(&doc).unwrap()).unwrap();
        assert_eq!(lines(&decoded)[0].stroke, "#FF0000");
    }

    #[test]
    fn test_decode_circle() {
        let text = entities_dxf("0\nCIRCLE\n62\n3\n10\n50\n20\n-60\n40\n10\n");
        let doc = decode(&text).unwrap();
        match &doc.objects()[0] {
            DrawingObject::Circle(circle) => {
                assert_eq!((circle.left, circle.top, circle.radius), (40.0, 50.0, 10.0));
                assert_eq!(circle.fill.as_deref(), Some("transparent"));
                assert_eq!(circle.stroke, "#00FF00");
            }
            other => panic!("Expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_line_colors() {
        let text = entities_dxf(concat!(
            "0\nLINE\n62\n1\n10\n0\n20\n0\n11\n1\n21\n1\n",
            "0\nLINE\n62\n99\n10\n0\n20\n0\n11\n1\n21\n1\n",
            "0\nLINE\n10\n0\n20\n0\n11\n1\n21\n1\n",
        ));
        let doc = decode(&text).unwrap();
        let strokes: Vec<_> = lines(&doc).iter().map(|l| l.stroke.as_str()).collect();
        assert_eq!(strokes, ["#FF0000", "#333333", "#000000"]);
    }

    #[test]
    fn test_arc_tessellation() {
        let text = entities_dxf("0\nARC\n10\n0\n20\n0\n40\n10\n50\n0\n51\n180\n");
        let doc = decode(&text).unwrap();
        let segments = lines(&doc);
        assert_eq!(segments.len(), ARC_SEGMENTS);
        assert_eq!(doc.len(), ARC_SEGMENTS);

        for line in &segments {
            assert!((line.start().coords.norm() - 10.0).abs() < 1e-9);
            assert!((line.end().coords.norm() - 10.0).abs() < 1e-9);
        }
        let first = segments[0].start();
        let last = segments[ARC_SEGMENTS - 1].end();
        assert!((first - Point2::new(10.0, 0.0)).norm() < 1e-9);
        assert!((last - Point2::new(-10.0, 0.0)).norm() < 1e-9);
        // 上半圆在屏幕坐标中位于 y <= 0
        assert!(segments.iter().all(|l| l.y1 <= 1e-9));
    }

    #[test]
    fn test_arc_uses_raw_center_y() {
        let points = tessellate_arc(Point2::new(5.0, 7.0), 1.0, 0.0, 90.0);
        assert_eq!(points.len(), ARC_SEGMENTS + 1);
        assert!((points[0] - Point2::new(6.0, 7.0)).norm() < 1e-9);
        assert!((points[ARC_SEGMENTS] - Point2::new(5.0, 6.0)).norm() < 1e-9);
    }

    #[test]
    fn test_arc_zero_end_is_full_turn() {
        let full = tessellate_arc(Point2::origin(), 1.0, 0.0, 360.0);
        assert!((full[0] - full[ARC_SEGMENTS]).norm() < 1e-9);
        assert_eq!(tessellate_arc(Point2::origin(), 1.0, 0.0, 0.0), full);

        // 缺省角度的 ARC 是整圆
        let doc = decode(&entities_dxf("0\nARC\n10\n0\n20\n0\n40\n1\n")).unwrap();
        let segments = lines(&doc);
        assert!((segments[0].start() - segments[ARC_SEGMENTS - 1].end()).norm() < 1e-9);
    }

    #[test]
    fn test_decode_polylines() {
        let text = entities_dxf(concat!(
            "0\nLWPOLYLINE\n90\n3\n70\n1\n10\n0\n20\n0\n10\n10\n20\n0\n10\n10\n20\n10\n",
            "0\nLWPOLYLINE\n90\n1\n70\n0\n10\n0\n20\n0\n",
            "0\nPOLYLINE\n66\n1\n70\n0\n0\nVERTEX\n10\n0\n20\n5\n0\nVERTEX\n10\n5\n20\n5\n0\nSEQEND\n",
        ));
        let doc = decode(&text).unwrap();
        let segments = lines(&doc);
        // 闭合三角形 3 段 + 单点多段线 0 段 + 开放多段线 1 段
        assert_eq!(segments.len(), 4);
        assert_eq!((segments[2].x1, segments[2].y1, segments[2].x2, segments[2].y2), (10.0, -10.0, 0.0, 0.0));
        assert_eq!((segments[3].y1, segments[3].y2), (-5.0, -5.0));
    }

    #[test]
    fn test_decode_point() {
        let doc = decode(&entities_dxf("0\nPOINT\n62\n5\n10\n10\n20\n-10\n")).unwrap();
        match &doc.objects()[0] {
            DrawingObject::Circle(circle) => {
                assert_eq!((circle.left, circle.top, circle.radius), (8.0, 8.0, 2.0));
                assert_eq!(circle.fill.as_deref(), Some("#0000FF"));
                assert_eq!(circle.stroke, "#0000FF");
            }
            other => panic!("Expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_entities_ignored() {
        let doc = decode(&entities_dxf("0\nTEXT\n1\nhello\n0\nSOLID\n10\n0\n20\n0\n")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_entities_section() {
        let doc = decode("0\nSECTION\n2\nHEADER\n0\nENDSEC\n0\nEOF\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("").is_err());
        assert!(decode("  \n").is_err());
        assert!(matches!(decode("hello world"), Err(FileError::Dxf(_))));
        assert!(decode("0\nLINE\n10\nnot-a-number\n").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.dxf");
        let doc = Document::from_objects(vec![DrawingObject::Circle(Circle::new(0.0, 0.0, 3.0))]);
        export(&doc, &path).unwrap();
        assert_eq!(import(&path).unwrap().len(), 1);
    }

    fn palette_color() -> impl Strategy<Value = &'static str> {
        prop::sample::select(ACI_PALETTE.iter().map(|(_, hex)| *hex).collect::<Vec<_>>())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6
    }

    proptest! {
        #[test]
        fn test_line_and_circle_roundtrip(
            x1 in -1e6f64..1e6, y1 in -1e6f64..1e6,
            x2 in -1e6f64..1e6, y2 in -1e6f64..1e6,
            radius in 0.0f64..1e4,
            color in palette_color(),
        ) {
            let style = StrokeStyle::imported(color);
            let line = Line::new(Point2::new(x1, y1), Point2::new(x2, y2)).with_style(&style);
            let circle = Circle::new(x1, y2, radius).with_style(&style);
            let doc = Document::from_objects(vec![DrawingObject::Line(line.clone()), DrawingObject::Circle(circle.clone())]);

            let decoded = decode(&encode(&doc).unwrap()).unwrap();
            prop_assert_eq!(decoded.len(), 2);
            match (&decoded.objects()[0], &decoded.objects()[1]) {
                (DrawingObject::Line(l), DrawingObject::Circle(c)) => {
                    prop_assert!(close(l.x1, line.x1) && close(l.y1, line.y1));
                    prop_assert!(close(l.x2, line.x2) && close(l.y2, line.y2));
                    prop_assert_eq!(&l.stroke, &line.stroke);
                    prop_assert_eq!(l.stroke_width, line.stroke_width);

                    prop_assert!(close(c.left, circle.left) && close(c.top, circle.top));
                    prop_assert!(close(c.radius, circle.radius));
                    prop_assert_eq!(&c.stroke, &circle.stroke);
                    prop_assert_eq!(&c.fill, &circle.fill);
                }
                other => prop_assert!(false, "Unexpected objects {:?}", other),
            }
        }
    }
}
