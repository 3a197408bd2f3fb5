// ==========================================
// 资源分配数据工作台 - 检索服务
// ==========================================
// 职责: 远端 AI 检索 + 本地降级 + 过期结果压制
// ==========================================
// 红线: 新查询取代在途旧查询;旧查询的结果以"已取代"返回,不得送达界面
// ==========================================

use crate::domain::records::Dataset;
use crate::search::ai_client::AiSearchClient;
use crate::search::fallback::{self, FALLBACK_CONFIDENCE};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

// ==========================================
// SearchSource - 结果来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Remote, // 语言模型协作方
    Local,  // 本地关键词降级
}

// ==========================================
// SearchOutcome - 检索结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub entities: Vec<serde_json::Value>,
    pub explanation: String,
    pub confidence: f64,
    pub source: SearchSource,
}

// ==========================================
// SearchService
// ==========================================
// 无远端客户端时直接走本地降级（离线/未配置场景）
pub struct SearchService {
    client: Option<AiSearchClient>,
    generation: AtomicU64, // 请求代数,新查询递增
}

impl SearchService {
    pub fn new(client: Option<AiSearchClient>) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    /// 纯本地检索服务（不配置远端端点）
    pub fn local_only() -> Self {
        Self::new(None)
    }

    /// 执行一次检索
    ///
    /// # 参数
    /// - query: 自然语言检索词
    /// - dataset: 数据集快照
    ///
    /// # 返回
    /// - Some(SearchOutcome): 本次查询仍是最新代,结果有效
    /// - None: 等待期间有更新查询发出,本结果已被取代
    ///
    /// # 说明
    /// 远端失败不向上抛错: 自动降级为本地关键词匹配并压低置信度
    pub async fn search(&self, query: &str, dataset: &Dataset) -> Option<SearchOutcome> {
        let generation = self.begin_query();
        debug!(generation, query = %query, "发起检索");

        let outcome = match &self.client {
            Some(client) => match client.search(query, dataset).await {
                Ok(response) => {
                    info!(
                        hits = response.entities.len(),
                        confidence = response.confidence,
                        "远端检索成功"
                    );
                    SearchOutcome {
                        entities: response.entities,
                        explanation: response.explanation,
                        confidence: response.confidence,
                        source: SearchSource::Remote,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "远端检索失败，降级为本地关键词匹配");
                    Self::local_outcome(query, dataset)
                }
            },
            None => Self::local_outcome(query, dataset),
        };

        // 过期结果压制: 等待期间若有更新查询,本结果作废
        if !self.is_latest(generation) {
            debug!(generation, "检索结果已被更新查询取代");
            return None;
        }
        Some(outcome)
    }

    /// 登记新一代查询,返回本次查询的代数
    fn begin_query(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 指定代数是否仍是最新查询
    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn local_outcome(query: &str, dataset: &Dataset) -> SearchOutcome {
        let (entities, explanation) = fallback::keyword_search(query, dataset);
        SearchOutcome {
            entities,
            explanation,
            confidence: FALLBACK_CONFIDENCE,
            source: SearchSource::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::ClientRecord;
    use std::collections::BTreeMap;

    fn dataset_with_client(name: &str) -> Dataset {
        let mut dataset = Dataset::default();
        dataset.clients.push(ClientRecord {
            client_id: "C1".to_string(),
            client_name: name.to_string(),
            group_tag: String::new(),
            priority_level: 1,
            requested_task_ids: vec![],
            preferred_phases: vec![],
            max_budget: 0.0,
            attributes_json: String::new(),
            extras: BTreeMap::new(),
        });
        dataset
    }

    #[tokio::test]
    async fn test_local_only_search() {
        let service = SearchService::local_only();
        let dataset = dataset_with_client("Acme");

        let outcome = service.search("acme", &dataset).await.expect("latest query");

        assert_eq!(outcome.source, SearchSource::Local);
        assert_eq!(outcome.entities.len(), 1);
        assert_eq!(outcome.confidence, FALLBACK_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_newer_query_supersedes_older_generation() {
        let service = SearchService::local_only();
        let dataset = dataset_with_client("Acme");

        // 旧查询登记后,更新查询完整执行
        let stale_generation = service.begin_query();
        let outcome = service.search("acme", &dataset).await;

        // 最新查询照常送达,旧代数已不再是最新（其结果会被压制）
        assert!(outcome.is_some());
        assert!(!service.is_latest(stale_generation));
    }
}
