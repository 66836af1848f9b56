//! 模型层错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object index {index} out of range (document has {len} objects)")]
    IndexOutOfRange { index: usize, len: usize },
}
