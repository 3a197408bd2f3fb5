// ==========================================
// 资源分配数据工作台 - 字段模式注册表
// ==========================================
// 依据: 数据字典 v0.2 - 标准字段表
// 职责: 声明每个实体类别的标准字段集合与目标类型
// ==========================================
// 红线: 表内声明顺序即表头匹配顺序,调整顺序会改变映射结果
// ==========================================

use crate::domain::types::EntityKind;

// ==========================================
// FieldKind - 字段目标类型
// ==========================================
// 数值类型携带解析失败时的兜底默认值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// 普通文本（TRIM 后原样保留）
    Text,
    /// 整数，解析失败时取 default
    Integer { default: i64 },
    /// 浮点数，解析失败时取 default
    Float { default: f64 },
    /// 逗号分隔的文本列表
    TextList,
    /// 逗号分隔的整数列表
    IntList,
    /// 不透明 JSON 负载（不解析，原样传递）
    Json,
}

// ==========================================
// FieldSpec - 标准字段声明
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// 标准字段名（记录归一化后的键）
    pub canonical: &'static str,
    /// 人类可读标签（表头匹配的依据）
    pub label: &'static str,
    /// 目标类型
    pub kind: FieldKind,
}

// ==========================================
// 标准字段表（声明顺序敏感）
// ==========================================

/// 客户实体字段表
const CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "ClientID", label: "Client ID", kind: FieldKind::Text },
    FieldSpec { canonical: "ClientName", label: "Client Name", kind: FieldKind::Text },
    FieldSpec { canonical: "GroupTag", label: "Group Tag", kind: FieldKind::Text },
    FieldSpec { canonical: "PriorityLevel", label: "Priority Level", kind: FieldKind::Integer { default: 1 } },
    FieldSpec { canonical: "RequestedTaskIDs", label: "Requested Task IDs", kind: FieldKind::TextList },
    FieldSpec { canonical: "PreferredPhases", label: "Preferred Phases", kind: FieldKind::IntList },
    FieldSpec { canonical: "MaxBudget", label: "Max Budget", kind: FieldKind::Float { default: 0.0 } },
    FieldSpec { canonical: "AttributesJSON", label: "Attributes JSON", kind: FieldKind::Json },
];

/// 人员实体字段表
const WORKER_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "WorkerID", label: "Worker ID", kind: FieldKind::Text },
    FieldSpec { canonical: "WorkerName", label: "Worker Name", kind: FieldKind::Text },
    FieldSpec { canonical: "WorkerGroup", label: "Worker Group", kind: FieldKind::Text },
    FieldSpec { canonical: "Skills", label: "Skills", kind: FieldKind::TextList },
    FieldSpec { canonical: "AvailableSlots", label: "Available Slots", kind: FieldKind::IntList },
    FieldSpec { canonical: "MaxLoadPerPhase", label: "Max Load Per Phase", kind: FieldKind::Integer { default: 1 } },
    FieldSpec { canonical: "HourlyRate", label: "Hourly Rate", kind: FieldKind::Float { default: 0.0 } },
    FieldSpec { canonical: "AttributesJSON", label: "Attributes JSON", kind: FieldKind::Json },
];

/// 任务实体字段表
const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "TaskID", label: "Task ID", kind: FieldKind::Text },
    FieldSpec { canonical: "TaskName", label: "Task Name", kind: FieldKind::Text },
    FieldSpec { canonical: "Duration", label: "Duration", kind: FieldKind::Integer { default: 1 } },
    FieldSpec { canonical: "RequiredSkills", label: "Required Skills", kind: FieldKind::TextList },
    FieldSpec { canonical: "PreferredPhases", label: "Preferred Phases", kind: FieldKind::IntList },
    FieldSpec { canonical: "PriorityLevel", label: "Priority Level", kind: FieldKind::Integer { default: 1 } },
    FieldSpec { canonical: "Dependencies", label: "Dependencies", kind: FieldKind::TextList },
    FieldSpec { canonical: "MaxConcurrent", label: "Max Concurrent", kind: FieldKind::Integer { default: 1 } },
    FieldSpec { canonical: "AttributesJSON", label: "Attributes JSON", kind: FieldKind::Json },
];

/// 获取某类别的标准字段表（声明顺序）
pub fn fields_of(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Clients => CLIENT_FIELDS,
        EntityKind::Workers => WORKER_FIELDS,
        EntityKind::Tasks => TASK_FIELDS,
    }
}

/// 获取某类别的主键字段名
pub fn id_field(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Clients => "ClientID",
        EntityKind::Workers => "WorkerID",
        EntityKind::Tasks => "TaskID",
    }
}

/// 判断某字段名是否属于该类别的标准字段集合
pub fn is_canonical(kind: EntityKind, field: &str) -> bool {
    fields_of(kind).iter().any(|f| f.canonical == field)
}

/// 查找某类别下指定标准字段的声明
pub fn field_spec(kind: EntityKind, field: &str) -> Option<&'static FieldSpec> {
    fields_of(kind).iter().find(|f| f.canonical == field)
}
