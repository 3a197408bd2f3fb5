// ==========================================
// 资源分配数据工作台 - 导入批次与矫正报告
// ==========================================
// 依据: 字段映射规范 v0.2 - 宽容矫正可观测化
// ==========================================

use crate::domain::records::{ClientRecord, TaskRecord, WorkerRecord};
use crate::domain::types::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ==========================================
// UploadSources - 一次上传的三个文件
// ==========================================
// 约定: 三类文件必须齐备,缺一整批拒绝
#[derive(Debug, Clone, Default)]
pub struct UploadSources {
    pub clients: Option<PathBuf>,
    pub workers: Option<PathBuf>,
    pub tasks: Option<PathBuf>,
}

impl UploadSources {
    pub fn new<P: Into<PathBuf>>(clients: P, workers: P, tasks: P) -> Self {
        Self {
            clients: Some(clients.into()),
            workers: Some(workers.into()),
            tasks: Some(tasks.into()),
        }
    }

    /// 列出缺失的实体类别（声明顺序）
    pub fn missing_kinds(&self) -> Vec<EntityKind> {
        let mut missing = Vec::new();
        if self.clients.is_none() {
            missing.push(EntityKind::Clients);
        }
        if self.workers.is_none() {
            missing.push(EntityKind::Workers);
        }
        if self.tasks.is_none() {
            missing.push(EntityKind::Tasks);
        }
        missing
    }
}

// ==========================================
// CoercionNote - 类型矫正记录
// ==========================================
// 用途: 矫正从不失败,但每次兜底替换都留痕,供上层转为警告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionNote {
    pub entity_kind: EntityKind, // 所属实体类别
    pub row_number: usize,       // 数据区行下标（0 起）
    pub entity_id: String,       // 记录主键（可能是合成 ID）
    pub field: String,           // 被矫正字段（标准字段名）
    pub original: String,        // 原始值
    pub substituted: String,     // 替换后的值
}

impl CoercionNote {
    /// 转为用户可读的警告文本
    pub fn to_warning(&self) -> String {
        format!(
            "{} 第 {} 行 ({}): 字段 {} 原值 \"{}\" 已替换为 \"{}\"",
            self.entity_kind.label_zh(),
            self.row_number,
            self.entity_id,
            self.field,
            self.original,
            self.substituted
        )
    }
}

// ==========================================
// ImportBatch - 导入批次元信息
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,              // 批次 ID（UUID）
    pub client_rows: usize,            // 客户文件行数
    pub worker_rows: usize,            // 人员文件行数
    pub task_rows: usize,              // 任务文件行数
    pub note_count: usize,             // 矫正记录数
    pub imported_at: DateTime<Utc>,    // 导入完成时间
    pub elapsed_ms: i64,               // 导入耗时（毫秒）
}

// ==========================================
// DatasetBundle - 一次导入的完整产物
// ==========================================
// 用途: 导入编排器返回值,由 API 层发布到应用状态
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub clients: Vec<ClientRecord>,
    pub workers: Vec<WorkerRecord>,
    pub tasks: Vec<TaskRecord>,
    pub notes: Vec<CoercionNote>,
    pub batch: ImportBatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_kinds_order() {
        let sources = UploadSources {
            clients: None,
            workers: Some(PathBuf::from("workers.csv")),
            tasks: None,
        };
        assert_eq!(
            sources.missing_kinds(),
            vec![EntityKind::Clients, EntityKind::Tasks]
        );
    }

    #[test]
    fn test_complete_sources_have_no_missing() {
        let sources = UploadSources::new("c.csv", "w.csv", "t.csv");
        assert!(sources.missing_kinds().is_empty());
    }

    #[test]
    fn test_note_warning_text() {
        let note = CoercionNote {
            entity_kind: EntityKind::Clients,
            row_number: 3,
            entity_id: "C4".to_string(),
            field: "PriorityLevel".to_string(),
            original: "abc".to_string(),
            substituted: "1".to_string(),
        };
        let text = note.to_warning();
        assert!(text.contains("PriorityLevel"));
        assert!(text.contains("abc"));
        assert!(text.contains("C4"));
    }
}
