// ==========================================
// 资源分配数据工作台 - 数据表格API
// ==========================================
// 职责: 表格视图查询、单元格编辑、校验结果管理、视图切换
// ==========================================
// 红线: 单元格编辑必须经类型矫正器回炉,保证类型不变量在编辑后仍成立
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::SharedState;
use crate::domain::records::{ClientRecord, TaskRecord, WorkerRecord};
use crate::domain::types::EntityKind;
use crate::domain::validation::{ValidationFinding, ValidationProvider};
use crate::export::value_to_cell;
use crate::importer::{HeaderMapperImpl, RawRow, RecordCoercer, RecordCoercerImpl};
use crate::query::{self, SortSpec};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// 单元格编辑结果: 回炉后的记录 + 矫正警告
#[derive(Debug, Clone)]
pub struct EditOutcome<T> {
    pub record: T,
    pub warnings: Vec<String>,
}

/// 数据表格API
pub struct DataApi {
    state: SharedState,
    header_mapper: HeaderMapperImpl,
    record_coercer: RecordCoercerImpl,
}

impl DataApi {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            header_mapper: HeaderMapperImpl,
            record_coercer: RecordCoercerImpl,
        }
    }

    // ==========================================
    // 表格视图查询
    // ==========================================

    /// 客户表格视图（过滤 + 排序）
    pub fn list_clients(&self, term: &str, sort: Option<&SortSpec>) -> ApiResult<Vec<ClientRecord>> {
        let state = self.read_state()?;
        Ok(query::apply_view(state.clients(), term, sort))
    }

    /// 人员表格视图
    pub fn list_workers(&self, term: &str, sort: Option<&SortSpec>) -> ApiResult<Vec<WorkerRecord>> {
        let state = self.read_state()?;
        Ok(query::apply_view(state.workers(), term, sort))
    }

    /// 任务表格视图
    pub fn list_tasks(&self, term: &str, sort: Option<&SortSpec>) -> ApiResult<Vec<TaskRecord>> {
        let state = self.read_state()?;
        Ok(query::apply_view(state.tasks(), term, sort))
    }

    // ==========================================
    // 单元格编辑（克隆-修改-整体替换）
    // ==========================================

    /// 编辑客户记录的单个字段
    ///
    /// # 参数
    /// - client_id: 目标记录主键
    /// - field: 字段名（源列名或标准字段名均可,先归一化再写入）
    /// - value: 新值（原样文本,经矫正器回炉成目标类型）
    pub fn update_client_field(
        &self,
        client_id: &str,
        field: &str,
        value: &str,
    ) -> ApiResult<EditOutcome<ClientRecord>> {
        let mut collection = self.read_state()?.clients().to_vec();
        let index = collection
            .iter()
            .position(|r| r.client_id == client_id)
            .ok_or_else(|| ApiError::NotFound(format!("客户记录不存在: {}", client_id)))?;

        let row = self.edited_row(EntityKind::Clients, &collection[index], field, value)?;
        let (mut records, notes) = self.record_coercer.coerce_clients(vec![row]);
        let record = records
            .pop()
            .ok_or_else(|| ApiError::InternalError("矫正器未产出记录".to_string()))?;

        collection[index] = record.clone();
        self.write_state()?.replace_clients(collection);

        debug!(client_id, field, "客户记录字段已更新");
        Ok(EditOutcome {
            record,
            warnings: notes.iter().map(|n| n.to_warning()).collect(),
        })
    }

    /// 编辑人员记录的单个字段
    pub fn update_worker_field(
        &self,
        worker_id: &str,
        field: &str,
        value: &str,
    ) -> ApiResult<EditOutcome<WorkerRecord>> {
        let mut collection = self.read_state()?.workers().to_vec();
        let index = collection
            .iter()
            .position(|r| r.worker_id == worker_id)
            .ok_or_else(|| ApiError::NotFound(format!("人员记录不存在: {}", worker_id)))?;

        let row = self.edited_row(EntityKind::Workers, &collection[index], field, value)?;
        let (mut records, notes) = self.record_coercer.coerce_workers(vec![row]);
        let record = records
            .pop()
            .ok_or_else(|| ApiError::InternalError("矫正器未产出记录".to_string()))?;

        collection[index] = record.clone();
        self.write_state()?.replace_workers(collection);

        debug!(worker_id, field, "人员记录字段已更新");
        Ok(EditOutcome {
            record,
            warnings: notes.iter().map(|n| n.to_warning()).collect(),
        })
    }

    /// 编辑任务记录的单个字段
    pub fn update_task_field(
        &self,
        task_id: &str,
        field: &str,
        value: &str,
    ) -> ApiResult<EditOutcome<TaskRecord>> {
        let mut collection = self.read_state()?.tasks().to_vec();
        let index = collection
            .iter()
            .position(|r| r.task_id == task_id)
            .ok_or_else(|| ApiError::NotFound(format!("任务记录不存在: {}", task_id)))?;

        let row = self.edited_row(EntityKind::Tasks, &collection[index], field, value)?;
        let (mut records, notes) = self.record_coercer.coerce_tasks(vec![row]);
        let record = records
            .pop()
            .ok_or_else(|| ApiError::InternalError("矫正器未产出记录".to_string()))?;

        collection[index] = record.clone();
        self.write_state()?.replace_tasks(collection);

        debug!(task_id, field, "任务记录字段已更新");
        Ok(EditOutcome {
            record,
            warnings: notes.iter().map(|n| n.to_warning()).collect(),
        })
    }

    // ==========================================
    // 校验结果管理
    // ==========================================

    /// 运行外部校验协作方,结果整体替换进状态
    pub async fn run_validation(&self, provider: &dyn ValidationProvider) -> ApiResult<usize> {
        let dataset = self.read_state()?.dataset();
        let findings = provider.validate(&dataset).await;
        let count = findings.len();

        self.write_state()?.replace_findings(findings);
        info!(count, "校验结果已更新");
        Ok(count)
    }

    /// 当前校验结果列表
    pub fn list_findings(&self) -> ApiResult<Vec<ValidationFinding>> {
        Ok(self.read_state()?.findings().to_vec())
    }

    /// 消除单条校验结果
    pub fn dismiss_finding(&self, finding_id: &str) -> ApiResult<()> {
        let current = self.read_state()?.findings().to_vec();
        let next: Vec<ValidationFinding> = current
            .iter()
            .filter(|f| f.finding_id != finding_id)
            .cloned()
            .collect();

        if next.len() == current.len() {
            return Err(ApiError::NotFound(format!("校验结果不存在: {}", finding_id)));
        }
        self.write_state()?.replace_findings(next);
        Ok(())
    }

    // ==========================================
    // 当前视图
    // ==========================================

    pub fn active_view(&self) -> ApiResult<EntityKind> {
        Ok(self.read_state()?.active_view())
    }

    pub fn set_active_view(&self, kind: EntityKind) -> ApiResult<()> {
        self.write_state()?.set_active_view(kind);
        Ok(())
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 把记录还原为原始行并覆写目标字段
    ///
    /// 字段名先经表头归一化,因此 "Priority Level" 与 "PriorityLevel" 等价
    fn edited_row<T: Serialize>(
        &self,
        kind: EntityKind,
        record: &T,
        field: &str,
        value: &str,
    ) -> ApiResult<RawRow> {
        let projected = serde_json::to_value(record)
            .map_err(|e| ApiError::InternalError(format!("记录投影失败: {}", e)))?;
        let Value::Object(fields) = projected else {
            return Err(ApiError::InternalError("记录投影不是对象".to_string()));
        };

        let mut row = RawRow::new();
        for (key, v) in fields {
            if key == "extras" {
                if let Value::Object(extras) = v {
                    for (extra_key, extra_value) in extras {
                        row.insert(extra_key, value_to_cell(&extra_value));
                    }
                }
            } else {
                row.insert(key, value_to_cell(&v));
            }
        }

        let canonical = self.header_mapper.map_header(kind, field);
        row.insert(canonical, value.to_string());
        Ok(row)
    }

    fn read_state(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, crate::app::AppState>> {
        self.state
            .read()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }

    fn write_state(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, crate::app::AppState>> {
        self.state
            .write()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }
}
