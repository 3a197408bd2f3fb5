// ==========================================
// 资源分配数据工作台 - 检索层
// ==========================================
// 职责: 自然语言检索（远端 AI 协作方 + 本地降级）
// ==========================================

pub mod ai_client;
pub mod config;
pub mod fallback;
pub mod service;

// 重导出核心类型
pub use ai_client::{AiSearchClient, AiSearchResponse, SearchError};
pub use config::{SearchConfig, API_KEY_ENV};
pub use fallback::FALLBACK_CONFIDENCE;
pub use service::{SearchOutcome, SearchService, SearchSource};
