// ==========================================
// 资源分配数据工作台 - 导出API
// ==========================================
// 职责: 按类别/格式生成下载内容
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::SharedState;
use crate::domain::types::EntityKind;
use crate::export::{self, ExportError, ExportFormat};

/// 导出API
pub struct ExportApi {
    state: SharedState,
}

impl ExportApi {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// 导出某类记录集合
    ///
    /// # 参数
    /// - kind: 实体类别
    /// - format: 导出格式（XLSX 显式拒绝）
    ///
    /// # 返回
    /// - Ok(String): 导出文本（CSV 或 JSON）
    pub fn export_records(&self, kind: EntityKind, format: ExportFormat) -> ApiResult<String> {
        let state = self
            .state
            .read()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))?;

        let text = match (kind, format) {
            (_, ExportFormat::Xlsx) => {
                return Err(ExportError::UnsupportedFormat("xlsx".to_string()).into());
            }
            (EntityKind::Clients, ExportFormat::Csv) => {
                export::records_to_csv(kind, state.clients())?
            }
            (EntityKind::Workers, ExportFormat::Csv) => {
                export::records_to_csv(kind, state.workers())?
            }
            (EntityKind::Tasks, ExportFormat::Csv) => export::records_to_csv(kind, state.tasks())?,
            (EntityKind::Clients, ExportFormat::Json) => export::records_to_json(state.clients())?,
            (EntityKind::Workers, ExportFormat::Json) => export::records_to_json(state.workers())?,
            (EntityKind::Tasks, ExportFormat::Json) => export::records_to_json(state.tasks())?,
        };
        Ok(text)
    }

    /// 导出规则 + 权重配置 JSON
    pub fn export_rules_config(&self) -> ApiResult<String> {
        let state = self
            .state
            .read()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))?;
        Ok(export::rules_config_to_json(state.rules(), &state.weights())?)
    }
}
