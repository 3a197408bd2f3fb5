// ==========================================
// 资源分配数据工作台 - AI 检索配置
// ==========================================
// 约定: 凭据只从环境变量读取,不落配置文件
// ==========================================

/// AI 检索凭据环境变量名（本系统唯一环境变量）
pub const API_KEY_ENV: &str = "AI_SEARCH_API_KEY";

// ==========================================
// SearchConfig - AI 检索服务配置
// ==========================================
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// 语言模型检索端点（完整 URL）
    pub endpoint: String,
    /// Bearer 凭据（缺省时请求不携带鉴权头）
    pub api_key: Option<String>,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// 构造配置,凭据从环境变量读取
    pub fn from_env(endpoint: impl Into<String>) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self {
            endpoint: endpoint.into(),
            api_key,
            timeout_secs: 30,
        }
    }

    /// 构造显式凭据的配置（测试/嵌入场景）
    pub fn with_key(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: Some(api_key.into()),
            timeout_secs: 30,
        }
    }
}
