// ==========================================
// 资源分配数据工作台 - 导入层
// ==========================================
// 职责: 上传文件 → 类型化记录集合
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod dataset_importer_impl;
pub mod dataset_importer_trait;
pub mod error;
pub mod file_parser;
pub mod header_mapper;
pub mod record_coercer;

// 重导出核心类型
pub use dataset_importer_impl::DatasetImporterImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_mapper::HeaderMapper as HeaderMapperImpl;
pub use record_coercer::RecordCoercer as RecordCoercerImpl;

// 重导出 Trait 接口
pub use dataset_importer_trait::{
    DatasetImporter, FileParser, HeaderMapper, RawRow, RecordCoercer,
};
