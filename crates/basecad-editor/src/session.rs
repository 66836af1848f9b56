//! 编辑会话
//!
//! 会话持有当前文档、历史栈和快照存储。每次完成的编辑都会序列化文档、
//! 写入存储并压入历史；撤销/重做从历史中取回快照并恢复文档。
//! 存储写入失败时，文档和历史保持调用前的状态。
//! 所有操作同步执行，会话不可跨线程共享修改。

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::shortcut::Shortcut;
use crate::store::SnapshotStore;
use basecad_core::document::Document;
use basecad_core::gesture::{self, Tool};
use basecad_core::history::{History, Snapshot};
use basecad_core::math::Point2;
use basecad_file::{export_snapshot, import_text, ExportFormat, ImportFormat};

pub struct EditorSession<S: SnapshotStore> {
    config: EditorConfig,
    store: S,
    document: Document,
    history: History,
    tool: Tool,
    zoom: f64,
}

impl<S: SnapshotStore> EditorSession<S> {
    /// 打开会话
    ///
    /// 存储中已有快照时，把它压在空文档之上作为当前状态。
    /// 存储的快照无法解析时忽略它，从空文档开始。
    pub fn open(config: EditorConfig, store: S) -> Result<Self, EditorError> {
        let mut history = History::new(config.max_history);
        let mut document = Document::new();

        if let Some(saved) = store.load(&config.storage_key)? {
            match Document::from_json(&saved) {
                Ok(restored) => {
                    tracing::info!("Restored {} objects from '{}'", restored.len(), config.storage_key);
                    document = restored;
                    history.push_state(Snapshot::new(saved));
                }
                Err(e) => tracing::warn!("Ignoring unreadable stored drawing: {}", e),
            }
        }

        Ok(Self {
            config,
            store,
            document,
            history,
            tool: Tool::Line,
            zoom: 1.0,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!("Tool: {}", tool.name());
        self.tool = tool;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// 用当前工具应用一次手势，返回文档是否改变
    pub fn apply_gesture(&mut self, points: &[Point2]) -> Result<bool, EditorError> {
        let delta = gesture::apply_gesture(&self.document, self.tool, points, &self.config.gesture_options());
        if delta.is_none() {
            return Ok(false);
        }
        let mut next = self.document.clone();
        next.apply(delta)?;
        self.commit(next.to_snapshot()?)?;
        self.document = next;
        Ok(true)
    }

    /// 撤销，已在最早状态时返回 `false`
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(false);
        };
        if let Err(e) = self.restore(&snapshot) {
            self.history.redo();
            return Err(e);
        }
        Ok(true)
    }

    /// 重做，已在最新状态时返回 `false`
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(false);
        };
        if let Err(e) = self.restore(&snapshot) {
            self.history.undo();
            return Err(e);
        }
        Ok(true)
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> Result<bool, EditorError> {
        match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
        }
    }

    /// 清空文档和历史
    pub fn reset(&mut self) -> Result<(), EditorError> {
        self.store
            .save(&self.config.storage_key, Snapshot::empty().as_str())?;
        self.document.clear();
        self.history.clear();
        tracing::info!("Drawing reset");
        Ok(())
    }

    /// 导入 JSON 或 DXF 文本，替换当前文档
    ///
    /// 失败时文档、历史和存储都保持不变。JSON 内容原样作为新快照。
    pub fn import_text(&mut self, payload: &str) -> Result<(), EditorError> {
        let document = import_text(payload)?;
        let snapshot = match ImportFormat::detect(payload) {
            ImportFormat::Json => Snapshot::new(payload),
            ImportFormat::Dxf => document.to_snapshot()?,
        };
        self.commit(snapshot)?;
        tracing::info!("Imported {} objects", document.len());
        self.document = document;
        Ok(())
    }

    /// 导出当前状态；JSON 与当前快照逐字节一致
    pub fn export(&self, format: ExportFormat) -> Result<String, EditorError> {
        Ok(export_snapshot(self.history.current(), format)?)
    }

    /// 两点距离（四舍五入），按配置做网格捕捉
    pub fn measure(&self, a: Point2, b: Point2) -> f64 {
        gesture::measure(a, b, &self.config.snap_config())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom = (self.zoom + self.config.zoom_step).min(self.config.zoom_max);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = (self.zoom - self.config.zoom_step).max(self.config.zoom_min);
        self.zoom
    }

    fn commit(&mut self, snapshot: Snapshot) -> Result<(), EditorError> {
        self.store.save(&self.config.storage_key, snapshot.as_str())?;
        self.history.push_state(snapshot);
        Ok(())
    }

    /// 历史游标已移动后恢复文档；失败时由调用方移回游标
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), EditorError> {
        let document = Document::from_snapshot(snapshot)?;
        self.store.save(&self.config.storage_key, snapshot.as_str())?;
        self.document = document;
        Ok(())
    }
}
