// ==========================================
// 资源分配数据工作台 - 领域层
// ==========================================
// 职责: 实体、字段模式、规则与校验结果的类型定义
// ==========================================

pub mod import_report;
pub mod records;
pub mod rule;
pub mod schema;
pub mod types;
pub mod validation;
pub mod weights;

// 重导出核心类型
pub use import_report::{CoercionNote, DatasetBundle, ImportBatch, UploadSources};
pub use records::{ClientRecord, Dataset, TaskRecord, WorkerRecord};
pub use rule::{BusinessRule, GroupScope, RuleParams};
pub use types::{EntityKind, Severity, SortDirection};
pub use validation::{SourceLocator, ValidationFinding, ValidationProvider};
pub use weights::PrioritizationWeights;
