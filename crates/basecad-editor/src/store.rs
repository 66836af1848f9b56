//! 快照存储
//!
//! 会话在每次编辑、撤销、重做后把当前快照写入存储，下次打开时恢复。

use crate::error::EditorError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 键值形式的快照存储
pub trait SnapshotStore {
    /// 读取快照，不存在时返回 `None`
    fn load(&self, key: &str) -> Result<Option<String>, EditorError>;

    /// 写入快照，覆盖已有内容
    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), EditorError>;
}

/// 内存存储
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, EditorError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), EditorError> {
        self.entries.insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

/// 目录存储，每个键对应 `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, EditorError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EditorError::Store(format!("Cannot read {}: {}", path.display(), e))),
        }
    }

    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), EditorError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| EditorError::Store(format!("Cannot create {}: {}", self.dir.display(), e)))?;
        let path = self.path_for(key);
        std::fs::write(&path, snapshot)
            .map_err(|e| EditorError::Store(format!("Cannot write {}: {}", path.display(), e)))?;
        tracing::trace!("Saved snapshot to {}", path.display());
        Ok(())
    }
}
