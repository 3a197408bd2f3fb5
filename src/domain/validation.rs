// ==========================================
// 资源分配数据工作台 - 数据校验领域模型
// ==========================================
// 依据: 数据字典 v0.2 - 校验结果结构
// 职责: 定义校验结果与外部校验器接口（校验引擎本体由协作方提供）
// ==========================================

use crate::domain::records::Dataset;
use crate::domain::types::{EntityKind, Severity};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// SourceLocator - 源文件定位
// ==========================================
// 用途: 将校验结果回指到上传文件中的行/列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLocator {
    pub row: usize,             // 源文件行号（数据区 0 起）
    pub column: Option<String>, // 源列名（可缺省）
}

// ==========================================
// ValidationFinding - 校验结果
// ==========================================
// 生命周期: 外部校验器产出 → 状态层持有 → 界面展示/用户消除,不落盘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub finding_id: String,            // 结果 ID（UUID）
    pub entity_kind: EntityKind,       // 所属实体类别
    pub entity_id: String,             // 实体主键
    pub field: String,                 // 涉及字段（标准字段名）
    pub severity: Severity,            // 严重级别
    pub message: String,               // 描述
    pub suggested_fix: Option<String>, // 建议修复值（可缺省）
    pub locator: Option<SourceLocator>, // 源文件定位（可缺省）
    pub created_at: DateTime<Utc>,     // 产出时间
}

impl ValidationFinding {
    /// 新建校验结果（自动分配 ID 与时间戳）
    pub fn new(
        entity_kind: EntityKind,
        entity_id: &str,
        field: &str,
        severity: Severity,
        message: &str,
    ) -> Self {
        Self {
            finding_id: Uuid::new_v4().to_string(),
            entity_kind,
            entity_id: entity_id.to_string(),
            field: field.to_string(),
            severity,
            message: message.to_string(),
            suggested_fix: None,
            locator: None,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// ValidationProvider Trait
// ==========================================
// 用途: 外部校验协作方接入点
// 约定: 校验只读数据快照,产出结果列表,不修改记录
#[async_trait]
pub trait ValidationProvider: Send + Sync {
    /// 对数据快照执行一轮校验
    ///
    /// # 参数
    /// - dataset: 三类记录集合快照
    ///
    /// # 返回
    /// - Vec<ValidationFinding>: 校验结果列表（可为空）
    async fn validate(&self, dataset: &Dataset) -> Vec<ValidationFinding>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_new_assigns_identity() {
        let finding = ValidationFinding::new(
            EntityKind::Tasks,
            "T1",
            "Duration",
            Severity::Warning,
            "持续阶段数超出常见范围",
        );
        assert!(!finding.finding_id.is_empty());
        assert_eq!(finding.entity_kind, EntityKind::Tasks);
        assert!(finding.suggested_fix.is_none());
    }

    #[test]
    fn test_finding_serialization() {
        let mut finding = ValidationFinding::new(
            EntityKind::Clients,
            "C1",
            "RequestedTaskIDs",
            Severity::Error,
            "引用了不存在的任务",
        );
        finding.suggested_fix = Some("移除 T99".to_string());
        finding.locator = Some(SourceLocator {
            row: 4,
            column: Some("RequestedTaskIDs".to_string()),
        });

        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["entity_kind"], "clients");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["locator"]["row"], 4);
    }
}
