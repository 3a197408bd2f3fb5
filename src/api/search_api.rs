// ==========================================
// 资源分配数据工作台 - 检索API
// ==========================================
// 职责: 把应用状态快照接到检索服务上
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::SharedState;
use crate::search::{AiSearchClient, SearchConfig, SearchOutcome, SearchService};

/// 检索API
pub struct SearchApi {
    state: SharedState,
    service: SearchService,
}

impl SearchApi {
    /// 远端 AI 检索 + 本地降级
    pub fn new(state: SharedState, config: SearchConfig) -> Self {
        Self {
            state,
            service: SearchService::new(Some(AiSearchClient::new(config))),
        }
    }

    /// 纯本地检索（未配置端点的离线模式）
    pub fn local_only(state: SharedState) -> Self {
        Self {
            state,
            service: SearchService::local_only(),
        }
    }

    /// 自然语言检索当前数据集
    ///
    /// # 返回
    /// - Ok(Some(outcome)): 本次查询仍为最新,结果有效
    /// - Ok(None): 结果已被更新查询取代,界面应丢弃
    /// - Err(ApiError): 仅状态访问失败（检索失败本身走本地降级,不报错）
    pub async fn search(&self, query: &str) -> ApiResult<Option<SearchOutcome>> {
        let dataset = self
            .state
            .read()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))?
            .dataset();
        Ok(self.service.search(query, &dataset).await)
    }
}
