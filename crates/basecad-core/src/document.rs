//! 草图文档
//!
//! 文档是图元的有序集合，顺序即绘制顺序（后加入的在上层）。
//! JSON 形式为 `{"objects":[...]}`，即历史快照和持久化存储的内容。

use crate::error::ModelError;
use crate::geometry::{DrawingObject, RawObject};
use crate::gesture::DocumentDelta;
use crate::history::Snapshot;
use crate::math::{BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 草图文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Document {
    pub objects: Vec<DrawingObject>,
}

/// 宽松读取的文档形式
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    objects: Vec<RawObject>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let total = raw.objects.len();
        let objects: Vec<DrawingObject> = raw.objects.into_iter().filter_map(RawObject::into_object).collect();
        if objects.len() < total {
            tracing::debug!(
                "Skipped {} incomplete or unknown objects while reading document",
                total - objects.len()
            );
        }
        Self { objects }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_objects(objects: Vec<DrawingObject>) -> Self {
        Self { objects }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&DrawingObject> {
        self.objects.get(index)
    }

    /// 追加图元（位于最上层）
    pub fn push(&mut self, object: DrawingObject) {
        self.objects.push(object);
    }

    pub fn remove(&mut self, index: usize) -> Result<DrawingObject, ModelError> {
        self.check_index(index)?;
        Ok(self.objects.remove(index))
    }

    pub fn replace(&mut self, index: usize, object: DrawingObject) -> Result<DrawingObject, ModelError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.objects[index], object))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// 应用手势产生的变更，返回文档是否改变
    pub fn apply(&mut self, delta: DocumentDelta) -> Result<bool, ModelError> {
        match delta {
            DocumentDelta::None => Ok(false),
            DocumentDelta::Insert(object) => {
                self.push(object);
                Ok(true)
            }
            DocumentDelta::Remove { index } => {
                self.remove(index)?;
                Ok(true)
            }
            DocumentDelta::Replace { index, object } => {
                self.replace(index, object)?;
                Ok(true)
            }
        }
    }

    /// 查找点击位置最上层的图元下标
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> Option<usize> {
        self.objects.iter().rposition(|o| o.hit_test(point, tolerance))
    }

    /// 所有图元的总包围盒
    pub fn bounds(&self) -> Option<BoundingBox2> {
        self.objects
            .iter()
            .filter_map(DrawingObject::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 解析
    ///
    /// 不完整的图元被跳过；JSON 本身无效时返回错误。
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_snapshot(&self) -> Result<Snapshot, ModelError> {
        self.to_json().map(Snapshot::from)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, ModelError> {
        Self::from_json(snapshot.as_str())
    }

    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index < self.objects.len() {
            Ok(())
        } else {
            Err(ModelError::IndexOutOfRange {
                index,
                len: self.objects.len(),
            })
        }
    }
}
