//! 撤销/重做历史
//!
//! 线性历史栈，每个条目是一份完整的文档快照。历史只存储和定位快照，
//! 从不解析其内容。
//!
//! - `push_state` 丢弃当前位置之后的所有条目（重做分支），再追加新快照
//! - 超过容量时丢弃最旧的条目，游标始终指向最新条目
//! - 在边界上 `undo`/`redo` 返回 `None`，不修改状态

use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认最大历史条目数
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// 空文档的规范快照
pub const EMPTY_SNAPSHOT: &str = r#"{"objects":[]}"#;

/// 文档快照（不透明的序列化字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// 空文档快照
    pub fn empty() -> Self {
        Self(EMPTY_SNAPSHOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Snapshot {
    fn from(content: String) -> Self {
        Self(content)
    }
}

impl From<&str> for Snapshot {
    fn from(content: &str) -> Self {
        Self(content.to_string())
    }
}

impl AsRef<str> for Snapshot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 线性历史栈
#[derive(Debug, Clone)]
pub struct History {
    /// 快照序列，下标越大越新
    entries: Vec<Snapshot>,
    /// 当前快照下标，始终满足 `cursor < entries.len()`
    cursor: usize,
    /// 最大条目数（至少为 1）
    max_history: usize,
}

impl History {
    /// 创建历史，初始条目为空文档快照
    pub fn new(max_history: usize) -> Self {
        Self::with_initial(Snapshot::empty(), max_history)
    }

    /// 以指定快照作为初始状态
    pub fn with_initial(initial: Snapshot, max_history: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_history: max_history.max(1),
        }
    }

    /// 记录一次完成的编辑
    pub fn push_state(&mut self, snapshot: Snapshot) {
        let discarded = self.entries.len() - (self.cursor + 1);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        if self.entries.len() > self.max_history {
            let overflow = self.entries.len() - self.max_history;
            self.entries.drain(..overflow);
            tracing::trace!("History trimmed {} oldest entries", overflow);
        }

        self.cursor = self.entries.len() - 1;

        if discarded > 0 {
            tracing::debug!("History push discarded {} redo entries", discarded);
        }
    }

    /// 撤销，返回撤销后的当前快照
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// 重做，返回重做后的当前快照
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// 重置为只含空文档快照的初始状态
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(Snapshot::empty());
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// 当前快照
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(n: usize) -> Snapshot {
        Snapshot::new(format!("s{}", n))
    }

    #[test]
    fn test_initial_state() {
        let mut history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), &Snapshot::empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_push_then_undo_returns_initial() {
        let mut history = History::default();
        history.push_state(snap(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let restored = history.undo().cloned();
        assert_eq!(restored, Some(Snapshot::empty()));
        assert!(history.can_redo());
        assert!(!history.can_undo());

        assert_eq!(history.redo().cloned(), Some(snap(1)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::default();
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.push_state(snap(3));

        history.undo();
        assert_eq!(history.undo().cloned(), Some(snap(1)));

        history.push_state(snap(4));
        assert!(history.redo().is_none());
        assert_eq!(history.entries(), &[Snapshot::empty(), snap(1), snap(4)]);
        assert_eq!(history.current(), &snap(4));
    }

    #[test]
    fn test_bounded_history() {
        let max = DEFAULT_MAX_HISTORY;
        let mut history = History::new(max);
        for i in 1..=max + 10 {
            history.push_state(snap(i));
        }

        assert_eq!(history.len(), max);
        assert_eq!(history.entries()[0], snap(11));
        assert_eq!(history.cursor(), max - 1);
        assert_eq!(history.current(), &snap(max + 10));
    }

    #[test]
    fn test_trim_after_undo_keeps_cursor_valid() {
        let mut history = History::new(3);
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.undo();
        history.push_state(snap(3));
        history.push_state(snap(4));

        assert_eq!(history.entries(), &[snap(1), snap(3), snap(4)]);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.undo().cloned(), Some(snap(3)));
        assert_eq!(history.undo().cloned(), Some(snap(1)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.clear();
        assert_eq!(history.entries(), &[Snapshot::empty()]);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = History::new(0);
        history.push_state(snap(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &snap(1));
    }
}
