//! 导入/导出入口
//!
//! 导入时自动识别 JSON 快照或 DXF 文本；导出支持 JSON、SVG、DXF。

use crate::error::FileError;
use crate::{dxf_io, svg};
use basecad_core::document::Document;
use basecad_core::history::Snapshot;
use std::path::Path;

/// 导入内容格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Dxf,
}

impl ImportFormat {
    /// 第一个非空白字符为 `{` 时视为 JSON，否则为 DXF
    pub fn detect(payload: &str) -> Self {
        if payload.trim_start().starts_with('{') {
            ImportFormat::Json
        } else {
            ImportFormat::Dxf
        }
    }
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Svg,
    Dxf,
}

impl ExportFormat {
    /// 按名称或扩展名识别（不区分大小写）
    pub fn from_name(name: &str) -> Result<Self, FileError> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "svg" => Ok(ExportFormat::Svg),
            "dxf" => Ok(ExportFormat::Dxf),
            other => Err(FileError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 按文件扩展名识别
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| FileError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_name(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
        }
    }
}

/// 从文本导入文档
///
/// 内容无法解析时返回错误，调用方的当前文档不受影响。
pub fn import_text(payload: &str) -> Result<Document, FileError> {
    match ImportFormat::detect(payload) {
        ImportFormat::Json => Ok(serde_json::from_str(payload)?),
        ImportFormat::Dxf => dxf_io::decode(payload),
    }
}

/// 导出文档
pub fn export_document(document: &Document, format: ExportFormat) -> Result<String, FileError> {
    match format {
        ExportFormat::Json => Ok(document.to_json()?),
        ExportFormat::Svg => Ok(svg::document_to_svg(document)),
        ExportFormat::Dxf => dxf_io::encode(document),
    }
}

/// 导出快照
///
/// JSON 原样返回快照内容；其他格式先解析为文档，缺字段的图元被跳过。
pub fn export_snapshot(snapshot: &Snapshot, format: ExportFormat) -> Result<String, FileError> {
    match format {
        ExportFormat::Json => Ok(snapshot.as_str().to_string()),
        _ => export_document(&Document::from_snapshot(snapshot)?, format),
    }
}

/// 从文件导入
pub fn import_file(path: &Path) -> Result<Document, FileError> {
    let payload = std::fs::read_to_string(path)?;
    let document = import_text(&payload)?;
    tracing::info!("Imported {} objects from {}", document.len(), path.display());
    Ok(document)
}

/// 导出到文件，未指定格式时按扩展名识别
pub fn export_file(document: &Document, path: &Path, format: Option<ExportFormat>) -> Result<ExportFormat, FileError> {
    let format = match format {
        Some(format) => format,
        None => ExportFormat::from_path(path)?,
    };
    std::fs::write(path, export_document(document, format)?)?;
    tracing::info!("Exported {} objects to {} as {:?}", document.len(), path.display(), format);
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basecad_core::geometry::{DrawingObject, Line, Rect};
    use basecad_core::math::Point2;

    fn sample() -> Document {
        Document::from_objects(vec![
            DrawingObject::Line(Line::new(Point2::new(10.0, 20.0), Point2::new(30.0, 40.0))),
            DrawingObject::Rect(Rect::new(0.0, 0.0, 5.0, 5.0)),
        ])
    }

    #[test]
    fn test_detect() {
        assert_eq!(ImportFormat::detect("  \n{\"objects\":[]}"), ImportFormat::Json);
        assert_eq!(ImportFormat::detect("0\nSECTION\n"), ImportFormat::Dxf);
        assert_eq!(ImportFormat::detect(""), ImportFormat::Dxf);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.SVG")).unwrap(), ExportFormat::Svg);
        assert_eq!(ExportFormat::from_path(Path::new("drawing.dxf")).unwrap(), ExportFormat::Dxf);
        assert!(matches!(
            ExportFormat::from_path(Path::new("image.png")),
            Err(FileError::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
        assert_eq!(ExportFormat::from_name(".json").unwrap().extension(), "json");
    }

    #[test]
    fn test_import_text() {
        let json = sample().to_json().unwrap();
        assert_eq!(import_text(&json).unwrap(), sample());

        let dxf = export_document(&sample(), ExportFormat::Dxf).unwrap();
        assert_eq!(import_text(&dxf).unwrap().len(), 5);
    }

    #[test]
    fn test_import_text_errors() {
        let err = import_text("{ not json").unwrap_err();
        assert!(matches!(err, FileError::Json(_)));
        assert!(err.is_parse_error());

        let err = import_text("garbage").unwrap_err();
        assert!(matches!(err, FileError::Dxf(_)));
    }

    #[test]
    fn test_export_snapshot_json_is_verbatim() {
        let snapshot = Snapshot::new(r#"{"objects":[{"type":"line","x1":1,"y1":2,"x2":3,"y2":4,"extra":true}]}"#);
        assert_eq!(export_snapshot(&snapshot, ExportFormat::Json).unwrap(), snapshot.as_str());

        let dxf = export_snapshot(&snapshot, ExportFormat::Dxf).unwrap();
        assert_eq!(import_text(&dxf).unwrap().len(), 1);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        for ext in ["json", "dxf", "svg"] {
            let path = dir.path().join(format!("sketch.{}", ext));
            let format = export_file(&sample(), &path, None).unwrap();
            assert_eq!(format.extension(), ext);
        }

        assert_eq!(import_file(&dir.path().join("sketch.json")).unwrap(), sample());
        assert_eq!(import_file(&dir.path().join("sketch.dxf")).unwrap().len(), 5);
        assert!(import_file(&dir.path().join("missing.json")).is_err());
    }
}
