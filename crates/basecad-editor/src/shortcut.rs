//! 键盘快捷键

/// 会话级快捷操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Undo,
    Redo,
}

impl Shortcut {
    /// 按键映射：Ctrl/Cmd+Z 撤销，Ctrl/Cmd+Shift+Z 或 Ctrl/Cmd+Y 重做
    pub fn from_key(key: &str, ctrl_or_cmd: bool, shift: bool) -> Option<Self> {
        if !ctrl_or_cmd {
            return None;
        }
        match key.to_ascii_lowercase().as_str() {
            "z" if shift => Some(Shortcut::Redo),
            "z" => Some(Shortcut::Undo),
            "y" => Some(Shortcut::Redo),
            _ => None,
        }
    }
}
