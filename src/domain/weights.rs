// ==========================================
// 资源分配数据工作台 - 优先级权重
// ==========================================
// 依据: 规则配置规范 v0.1 - 权重档案
// ==========================================
// 注意: 权重之和不做归一化约束,消费方自行处理
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PrioritizationWeights - 五维优先级权重
// ==========================================
// 用途: 随规则配置一并导出,本系统只存储不应用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationWeights {
    pub priority_level: f64, // 客户优先级权重
    pub fulfillment: f64,    // 任务满足度权重
    pub fairness: f64,       // 分配公平性权重
    pub workload: f64,       // 负载均衡权重
    pub efficiency: f64,     // 执行效率权重
}

impl Default for PrioritizationWeights {
    /// 默认权重档案（偏重客户优先级与满足度）
    fn default() -> Self {
        Self {
            priority_level: 0.30,
            fulfillment: 0.25,
            fairness: 0.20,
            workload: 0.15,
            efficiency: 0.10,
        }
    }
}
