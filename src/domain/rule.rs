// ==========================================
// 资源分配数据工作台 - 业务规则领域模型
// ==========================================
// 依据: 规则配置规范 v0.1 - 六类分配规则
// 用途: 规则由用户创建/编辑,持有于应用状态,随配置导出
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// GroupScope - 分组约束的作用对象
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupScope {
    Client, // 客户分组
    Worker, // 人员分组
}

// ==========================================
// RuleParams - 规则参数（六类标签变体）
// ==========================================
// 序列化: 外部 JSON 以 type 字段区分变体,参数字段 camelCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuleParams {
    /// 共跑: 一组任务必须安排在同一阶段执行
    #[serde(rename_all = "camelCase")]
    CoRun { tasks: Vec<String> },

    /// 槽位限制: 指定分组至少保留的公共可用槽位数
    #[serde(rename_all = "camelCase")]
    SlotRestriction {
        scope: GroupScope,
        group_tag: String,
        min_common_slots: i64,
    },

    /// 负载上限: 某人员分组单阶段最多承接的槽位数
    #[serde(rename_all = "camelCase")]
    LoadLimit {
        worker_group: String,
        max_slots_per_phase: i64,
    },

    /// 阶段窗口: 任务仅允许落在指定阶段集合内
    #[serde(rename_all = "camelCase")]
    PhaseWindow {
        task_id: String,
        allowed_phases: Vec<i64>,
    },

    /// 模式匹配: 按正则模式套用规则模板
    #[serde(rename_all = "camelCase")]
    PatternMatch {
        pattern: String,
        template: String,
        #[serde(default)]
        params: serde_json::Value,
    },

    /// 优先级覆盖: 显式规则优先序（先出现者优先）
    #[serde(rename_all = "camelCase")]
    PrecedenceOverride { priority_order: Vec<String> },
}

impl RuleParams {
    /// 变体的类别标识（与序列化 tag 一致）
    pub fn kind_tag(&self) -> &'static str {
        match self {
            RuleParams::CoRun { .. } => "coRun",
            RuleParams::SlotRestriction { .. } => "slotRestriction",
            RuleParams::LoadLimit { .. } => "loadLimit",
            RuleParams::PhaseWindow { .. } => "phaseWindow",
            RuleParams::PatternMatch { .. } => "patternMatch",
            RuleParams::PrecedenceOverride { .. } => "precedenceOverride",
        }
    }
}

// ==========================================
// BusinessRule - 业务规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRule {
    pub rule_id: String,                 // 规则 ID（UUID）
    #[serde(flatten)]
    pub params: RuleParams,              // 类别参数（平铺到规则 JSON）
    pub enabled: bool,                   // 启用标记
    pub priority: i64,                   // 规则优先级（小者先）
    pub source_query: Option<String>,    // 自然语言来源（由 AI 转换生成时记录）
    pub created_at: DateTime<Utc>,       // 创建时间
}

impl BusinessRule {
    /// 新建启用状态的规则
    pub fn new(params: RuleParams, priority: i64) -> Self {
        Self {
            rule_id: Uuid::new_v4().to_string(),
            params,
            enabled: true,
            priority,
            source_query: None,
            created_at: Utc::now(),
        }
    }

    /// 新建由自然语言转换而来的规则
    pub fn from_natural_language(params: RuleParams, priority: i64, query: &str) -> Self {
        let mut rule = Self::new(params, priority);
        rule.source_query = Some(query.to_string());
        rule
    }
}
