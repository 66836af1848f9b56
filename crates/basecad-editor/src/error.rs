//! 编辑会话错误定义

use basecad_core::ModelError;
use basecad_file::FileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Document error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Snapshot store error: {0}")]
    Store(String),
}

impl EditorError {
    /// 是否为导入内容无法解析
    pub fn is_parse_error(&self) -> bool {
        match self {
            EditorError::File(e) => e.is_parse_error(),
            EditorError::Model(ModelError::Json(_)) => true,
            _ => false,
        }
    }
}
