// ==========================================
// 资源分配数据工作台 - 核心库
// ==========================================
// 技术栈: Rust + Tokio
// 系统定位: 数据清洗与规则配置（表现层为外部协作方）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体、字段模式与规则
pub mod domain;

// 导入层 - 上传文件到类型化记录
pub mod importer;

// 查询层 - 表格视图过滤与排序
pub mod query;

// 检索层 - 自然语言检索与本地降级
pub mod search;

// 导出层 - 下载格式生成
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EntityKind, Severity, SortDirection};

// 领域实体
pub use domain::{
    BusinessRule, ClientRecord, CoercionNote, Dataset, DatasetBundle, ImportBatch,
    PrioritizationWeights, RuleParams, TaskRecord, UploadSources, ValidationFinding,
    ValidationProvider, WorkerRecord,
};

// 导入管道
pub use importer::{DatasetImporter, DatasetImporterImpl, HeaderMapperImpl, RecordCoercerImpl};

// API
pub use api::{DataApi, ExportApi, ImportApi, RuleApi, SearchApi};

// 应用状态
pub use app::{AppState, SharedState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "资源分配数据工作台";
