// ==========================================
// 资源分配数据工作台 - 记录领域模型
// ==========================================
// 依据: 数据字典 v0.2 - clients/workers/tasks 实体
// ==========================================
// 红线: 封闭结构体,未识别列进入 extras 侧表,不做开放字段袋
// 红线: 经过类型矫正后,数值字段永远有值,列表字段永远是序列
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ClientRecord - 客户记录
// ==========================================
// 用途: 导入层写入,查询/规则层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    // ===== 主键 =====
    #[serde(rename = "ClientID")]
    pub client_id: String, // 客户唯一标识（缺失时合成 temp-<行下标>）

    // ===== 基础信息 =====
    #[serde(rename = "ClientName")]
    pub client_name: String, // 显示名
    #[serde(rename = "GroupTag")]
    pub group_tag: String, // 分组标签

    // ===== 配置维度 =====
    #[serde(rename = "PriorityLevel")]
    pub priority_level: i64, // 优先级（整数,兜底 1）
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>, // 关联任务 ID 列表
    #[serde(rename = "PreferredPhases")]
    pub preferred_phases: Vec<i64>, // 期望阶段列表
    #[serde(rename = "MaxBudget")]
    pub max_budget: f64, // 预算上限（兜底 0）

    // ===== 不透明负载 =====
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String, // 自由 JSON 文本,原样传递

    // ===== 未识别列侧表 =====
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

// ==========================================
// WorkerRecord - 人员记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    // ===== 主键 =====
    #[serde(rename = "WorkerID")]
    pub worker_id: String,

    // ===== 基础信息 =====
    #[serde(rename = "WorkerName")]
    pub worker_name: String,
    #[serde(rename = "WorkerGroup")]
    pub worker_group: String,

    // ===== 能力维度 =====
    #[serde(rename = "Skills")]
    pub skills: Vec<String>, // 技能标签列表
    #[serde(rename = "AvailableSlots")]
    pub available_slots: Vec<i64>, // 可用阶段列表
    #[serde(rename = "MaxLoadPerPhase")]
    pub max_load_per_phase: i64, // 单阶段最大负载（兜底 1）
    #[serde(rename = "HourlyRate")]
    pub hourly_rate: f64, // 小时费率（兜底 0）

    // ===== 不透明负载 =====
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String,

    // ===== 未识别列侧表 =====
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

// ==========================================
// TaskRecord - 任务记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    // ===== 主键 =====
    #[serde(rename = "TaskID")]
    pub task_id: String,

    // ===== 基础信息 =====
    #[serde(rename = "TaskName")]
    pub task_name: String,

    // ===== 执行维度 =====
    #[serde(rename = "Duration")]
    pub duration: i64, // 持续阶段数（兜底 1）
    #[serde(rename = "RequiredSkills")]
    pub required_skills: Vec<String>, // 所需技能列表
    #[serde(rename = "PreferredPhases")]
    pub preferred_phases: Vec<i64>, // 期望阶段列表
    #[serde(rename = "PriorityLevel")]
    pub priority_level: i64, // 优先级（兜底 1）
    #[serde(rename = "Dependencies")]
    pub dependencies: Vec<String>, // 前置任务 ID 列表
    #[serde(rename = "MaxConcurrent")]
    pub max_concurrent: i64, // 最大并发数（兜底 1）

    // ===== 不透明负载 =====
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String,

    // ===== 未识别列侧表 =====
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

// ==========================================
// Dataset - 三类记录集合快照
// ==========================================
// 用途: 状态层对外提供的整体视图（AI 检索负载 / 校验入参）
// 约定: 快照是克隆,修改快照不影响状态层
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub clients: Vec<ClientRecord>,
    pub workers: Vec<WorkerRecord>,
    pub tasks: Vec<TaskRecord>,
}

impl Dataset {
    /// 三类记录是否全部为空
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.workers.is_empty() && self.tasks.is_empty()
    }

    /// 记录总数
    pub fn total_records(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }
}
