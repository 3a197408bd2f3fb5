// ==========================================
// 资源分配数据工作台 - 领域类型定义
// ==========================================
// 依据: 数据字典 v0.2 - 实体类别与共享枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 实体类别 (Entity Kind)
// ==========================================
// 三类记录共享同一条导入管道,按类别选择字段模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Clients, // 客户（默认视图）
    Workers, // 人员
    Tasks,   // 任务
}

impl EntityKind {
    /// 全部实体类别（声明顺序 = 导入顺序）
    pub const ALL: [EntityKind; 3] = [EntityKind::Clients, EntityKind::Workers, EntityKind::Tasks];

    /// 类别的中文显示名
    pub fn label_zh(&self) -> &'static str {
        match self {
            EntityKind::Clients => "客户",
            EntityKind::Workers => "人员",
            EntityKind::Tasks => "任务",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Clients => write!(f, "clients"),
            EntityKind::Workers => write!(f, "workers"),
            EntityKind::Tasks => write!(f, "tasks"),
        }
    }
}

// ==========================================
// 严重级别 (Severity)
// ==========================================
// 校验结果与导入提示共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,   // 错误（需要处理）
    Warning, // 警告（允许继续）
    Info,    // 提示（仅记录）
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,  // 升序
    Desc, // 降序
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Clients.to_string(), "clients");
        assert_eq!(EntityKind::Workers.to_string(), "workers");
        assert_eq!(EntityKind::Tasks.to_string(), "tasks");
    }

    #[test]
    fn test_entity_kind_serde_lowercase() {
        let json = serde_json::to_string(&EntityKind::Tasks).unwrap();
        assert_eq!(json, "\"tasks\"");

        let kind: EntityKind = serde_json::from_str("\"workers\"").unwrap();
        assert_eq!(kind, EntityKind::Workers);
    }

    #[test]
    fn test_severity_roundtrip() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
