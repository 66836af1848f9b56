//! BaseCAD 编辑会话
//!
//! 把核心模型、历史记录和文件互操作组合成一个单线程的编辑会话：
//! - 手势 → 文档变更 → 快照入栈 → 写入存储
//! - 撤销/重做时从快照恢复文档
//! - 导入失败不影响当前文档

pub mod config;
pub mod error;
pub mod session;
pub mod shortcut;
pub mod store;

pub use config::EditorConfig;
pub use error::EditorError;
pub use session::EditorSession;
pub use shortcut::Shortcut;
pub use store::{FileStore, MemoryStore, SnapshotStore};
