// ==========================================
// 资源分配数据工作台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换内层错误为用户友好的错误消息
// ==========================================

use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入/导出错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailed(String),

    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从内层错误转换
// 目的: 内层技术错误 → 用户可读的业务错误
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let api_err: ApiError = ImportError::IncompleteUpload("任务".to_string()).into();
        match api_err {
            ApiError::ImportFailed(msg) => {
                assert!(msg.contains("上传不完整"));
                assert!(msg.contains("任务"));
            }
            _ => panic!("Expected ImportFailed"),
        }
    }

    #[test]
    fn test_export_error_conversion() {
        let api_err: ApiError = ExportError::UnsupportedFormat("xlsx".to_string()).into();
        match api_err {
            ApiError::ExportFailed(msg) => assert!(msg.contains("xlsx")),
            _ => panic!("Expected ExportFailed"),
        }
    }
}
