// ==========================================
// 资源分配数据工作台 - 规则配置API
// ==========================================
// 职责: 业务规则增删改查与优先级权重管理
// ==========================================
// 说明: 规则只存储与导出,不在本系统内对数据集求值
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::SharedState;
use crate::domain::rule::{BusinessRule, RuleParams};
use crate::domain::weights::PrioritizationWeights;
use tracing::info;

/// 规则配置API
pub struct RuleApi {
    state: SharedState,
}

impl RuleApi {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    // ==========================================
    // 规则 CRUD（克隆-修改-整体替换）
    // ==========================================

    /// 新建规则
    pub fn add_rule(&self, params: RuleParams, priority: i64) -> ApiResult<BusinessRule> {
        let rule = BusinessRule::new(params, priority);
        self.append(rule.clone())?;
        info!(rule_id = %rule.rule_id, kind = rule.params.kind_tag(), "规则已创建");
        Ok(rule)
    }

    /// 新建由自然语言转换而来的规则（记录原始查询）
    pub fn add_rule_from_query(
        &self,
        params: RuleParams,
        priority: i64,
        query: &str,
    ) -> ApiResult<BusinessRule> {
        let rule = BusinessRule::from_natural_language(params, priority, query);
        self.append(rule.clone())?;
        info!(rule_id = %rule.rule_id, "自然语言规则已创建");
        Ok(rule)
    }

    /// 更新规则参数
    pub fn update_rule_params(&self, rule_id: &str, params: RuleParams) -> ApiResult<BusinessRule> {
        self.modify(rule_id, |rule| rule.params = params.clone())
    }

    /// 调整规则优先级
    pub fn set_rule_priority(&self, rule_id: &str, priority: i64) -> ApiResult<BusinessRule> {
        self.modify(rule_id, |rule| rule.priority = priority)
    }

    /// 启用/停用规则
    pub fn set_rule_enabled(&self, rule_id: &str, enabled: bool) -> ApiResult<BusinessRule> {
        self.modify(rule_id, |rule| rule.enabled = enabled)
    }

    /// 删除规则
    pub fn remove_rule(&self, rule_id: &str) -> ApiResult<()> {
        let current = self.read()?.rules().to_vec();
        let next: Vec<BusinessRule> = current
            .iter()
            .filter(|r| r.rule_id != rule_id)
            .cloned()
            .collect();

        if next.len() == current.len() {
            return Err(ApiError::NotFound(format!("规则不存在: {}", rule_id)));
        }
        self.write()?.replace_rules(next);
        info!(rule_id, "规则已删除");
        Ok(())
    }

    /// 规则列表（优先级升序,同级保持创建顺序）
    pub fn list_rules(&self) -> ApiResult<Vec<BusinessRule>> {
        let mut rules = self.read()?.rules().to_vec();
        rules.sort_by_key(|r| r.priority);
        Ok(rules)
    }

    // ==========================================
    // 优先级权重
    // ==========================================

    pub fn weights(&self) -> ApiResult<PrioritizationWeights> {
        Ok(self.read()?.weights())
    }

    /// 整体替换权重档案（不做归一化检查）
    pub fn set_weights(&self, weights: PrioritizationWeights) -> ApiResult<()> {
        self.write()?.replace_weights(weights);
        info!("优先级权重已更新");
        Ok(())
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn append(&self, rule: BusinessRule) -> ApiResult<()> {
        let mut next = self.read()?.rules().to_vec();
        next.push(rule);
        self.write()?.replace_rules(next);
        Ok(())
    }

    fn modify(
        &self,
        rule_id: &str,
        apply: impl Fn(&mut BusinessRule),
    ) -> ApiResult<BusinessRule> {
        let mut next = self.read()?.rules().to_vec();
        let rule = next
            .iter_mut()
            .find(|r| r.rule_id == rule_id)
            .ok_or_else(|| ApiError::NotFound(format!("规则不存在: {}", rule_id)))?;
        apply(rule);
        let updated = rule.clone();
        self.write()?.replace_rules(next);
        Ok(updated)
    }

    fn read(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, crate::app::AppState>> {
        self.state
            .read()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }

    fn write(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, crate::app::AppState>> {
        self.state
            .write()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }
}
