//! BaseCAD 核心
//!
//! 提供2D草图图元、文档模型、坐标系转换和撤销/重做历史。
//!
//! # 架构设计
//!
//! - `geometry`: 图元（直线、矩形、圆、手绘路径）
//! - `document`: 有序图元集合，JSON 快照的序列化形式
//! - `coords`: 屏幕坐标（Y 向下）与 CAD 坐标（Y 向上）互转
//! - `history`: 基于快照的线性撤销/重做栈
//! - `gesture`: 把一次完整的绘图手势转换为文档变更
//!
//! # 示例
//!
//! ```rust
//! use basecad_core::prelude::*;
//!
//! let mut doc = Document::new();
//! doc.push(DrawingObject::Line(Line::new(Point2::new(10.0, 20.0), Point2::new(30.0, 40.0))));
//!
//! let mut history = History::default();
//! history.push_state(doc.to_snapshot().unwrap());
//! assert!(history.can_undo());
//! ```

pub mod coords;
pub mod document;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod math;
pub mod properties;
pub mod snap;

pub use error::ModelError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::document::Document;
    pub use crate::error::ModelError;
    pub use crate::geometry::{Circle, DrawingObject, Line, Path, PathPoint, RawObject, Rect};
    pub use crate::gesture::{apply_gesture, measure, DocumentDelta, GestureOptions, Tool};
    pub use crate::history::{History, Snapshot, DEFAULT_MAX_HISTORY};
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::properties::StrokeStyle;
    pub use crate::snap::SnapConfig;
}
