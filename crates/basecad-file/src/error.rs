//! 文件操作错误定义

use basecad_core::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Model(#[from] ModelError),

    #[error("DXF parse error: {0}")]
    Dxf(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl FileError {
    /// 是否为输入内容无法解析（JSON 或 DXF）
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FileError::Json(_) | FileError::Dxf(_) | FileError::Model(ModelError::Json(_))
        )
    }
}
