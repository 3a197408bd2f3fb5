// ==========================================
// 资源分配数据工作台 - AI 检索客户端
// ==========================================
// 职责: 向语言模型协作方发起自然语言检索请求
// 协议: POST {query, data:{clients,workers,tasks}}
//       响应 {entities, explanation, confidence}
// ==========================================

use crate::domain::records::Dataset;
use crate::search::config::SearchConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// AI 检索错误类型
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("AI 检索请求失败: {0}")]
    RequestFailed(String),

    #[error("AI 检索端点返回异常状态: {0}")]
    BadStatus(String),

    #[error("AI 检索响应解析失败: {0}")]
    ParseFailed(String),
}

// ==========================================
// 请求/响应结构
// ==========================================

#[derive(Serialize)]
struct AiSearchRequest<'a> {
    query: &'a str,
    data: &'a Dataset,
}

/// 语言模型协作方的响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSearchResponse {
    pub entities: Vec<serde_json::Value>, // 命中实体（协作方定义的形态,原样传递）
    pub explanation: String,              // 检索解释
    pub confidence: f64,                  // 置信度 [0,1]
}

// ==========================================
// AiSearchClient
// ==========================================
pub struct AiSearchClient {
    config: SearchConfig,
    client: reqwest::Client,
}

impl AiSearchClient {
    pub fn new(config: SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// 发起一次检索请求
    ///
    /// # 参数
    /// - query: 自然语言检索词
    /// - dataset: 当前三类记录集合快照（随请求整体发送）
    ///
    /// # 返回
    /// - Ok(AiSearchResponse): 协作方响应
    /// - Err(SearchError): 传输/状态/解析失败（调用方负责本地降级）
    pub async fn search(
        &self,
        query: &str,
        dataset: &Dataset,
    ) -> Result<AiSearchResponse, SearchError> {
        let body = AiSearchRequest {
            query,
            data: dataset,
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::BadStatus(response.status().to_string()));
        }

        response
            .json::<AiSearchResponse>()
            .await
            .map_err(|e| SearchError::ParseFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "entities": [{"kind": "tasks", "record": {"TaskID": "T1"}}],
            "explanation": "duration longer than one phase",
            "confidence": 0.87
        }"#;
        let response: AiSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.entities.len(), 1);
        assert_eq!(response.confidence, 0.87);
    }

    #[test]
    fn test_request_serialization_shape() {
        let dataset = Dataset::default();
        let body = AiSearchRequest {
            query: "high priority clients",
            data: &dataset,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["query"], "high priority clients");
        assert!(value["data"]["clients"].is_array());
        assert!(value["data"]["workers"].is_array());
        assert!(value["data"]["tasks"].is_array());
    }
}
