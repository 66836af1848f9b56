//! BaseCAD 文件互操作
//!
//! 支持：
//! - `.json` 文档快照导入/导出
//! - `.dxf` 导入/导出（LINE / CIRCLE / ARC / LWPOLYLINE / POLYLINE / POINT）
//! - `.svg` 导出

pub mod dxf_io;
pub mod error;
pub mod interchange;
pub mod svg;

pub use error::FileError;
pub use interchange::{export_document, export_file, export_snapshot, import_file, import_text, ExportFormat, ImportFormat};
