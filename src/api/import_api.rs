// ==========================================
// 资源分配数据工作台 - 数据导入API
// ==========================================
// 职责: 封装三类文件导入,发布结果到应用状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::SharedState;
use crate::domain::import_report::UploadSources;
use crate::importer::{DatasetImporter, DatasetImporterImpl, UniversalFileParser};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID
    pub batch_id: String,
    /// 导入的客户记录数
    pub client_count: usize,
    /// 导入的人员记录数
    pub worker_count: usize,
    /// 导入的任务记录数
    pub task_count: usize,
    /// 矫正警告（字段兜底替换的可读描述）
    pub warnings: Vec<String>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    state: SharedState,
    importer: Box<dyn DatasetImporter>,
}

impl ImportApi {
    /// 创建使用默认导入编排器的实例
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            importer: Box::new(DatasetImporterImpl::with_defaults()),
        }
    }

    /// 注入自定义导入编排器（测试/替换组件）
    pub fn with_importer(state: SharedState, importer: Box<dyn DatasetImporter>) -> Self {
        Self { state, importer }
    }

    /// 导入三类文件并发布到应用状态
    ///
    /// # 参数
    /// - sources: 三个文件路径（任一缺失整批拒绝）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果（矫正替换转为警告返回）
    /// - Err(ApiError): 扩展名不支持 / 缺文件 / 解析失败
    ///
    /// # 说明
    /// 成功后三类集合整体替换进应用状态,当前视图切回客户页
    pub async fn import_dataset(&self, sources: UploadSources) -> ApiResult<ImportApiResponse> {
        // 扩展名前置拦截: 不支持的文件在解析前拒绝
        for path in [&sources.clients, &sources.workers, &sources.tasks]
            .into_iter()
            .flatten()
        {
            Self::ensure_supported(path)?;
        }

        // 执行导入批次
        let bundle = self.importer.import_bundle(sources).await?;

        // 矫正留痕转为用户可读警告
        let warnings: Vec<String> = bundle.notes.iter().map(|n| n.to_warning()).collect();
        let response = ImportApiResponse {
            batch_id: bundle.batch.batch_id.clone(),
            client_count: bundle.clients.len(),
            worker_count: bundle.workers.len(),
            task_count: bundle.tasks.len(),
            warnings,
            elapsed_ms: bundle.batch.elapsed_ms,
        };

        // 发布到应用状态（整体替换）
        let mut state = self
            .state
            .write()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))?;
        state.publish_bundle(bundle);

        info!(
            batch_id = %response.batch_id,
            warnings = response.warnings.len(),
            "导入完成并已发布"
        );
        Ok(response)
    }

    fn ensure_supported(path: &Path) -> ApiResult<()> {
        if UniversalFileParser::is_supported(path) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(format!(
                "文件类型不支持: {}（仅支持 .csv/.xlsx/.xls）",
                path.display()
            )))
        }
    }
}
