// ==========================================
// 资源分配数据工作台 - 应用状态
// ==========================================
// 职责: 进程内共享数据的唯一持有者
// ==========================================
// 红线: 只做整体替换（换整个集合/整个规则表/整个权重档案）,
//       不做字段级就地并发修改;读方拿快照,写方换整值
// ==========================================

use crate::domain::import_report::DatasetBundle;
use crate::domain::records::{ClientRecord, Dataset, TaskRecord, WorkerRecord};
use crate::domain::rule::BusinessRule;
use crate::domain::types::EntityKind;
use crate::domain::validation::ValidationFinding;
use crate::domain::weights::PrioritizationWeights;
use std::sync::{Arc, RwLock};
use tracing::info;

/// API 层共享的状态句柄
pub type SharedState = Arc<RwLock<AppState>>;

/// 应用状态
///
/// 三类记录集合、规则表、权重档案、校验结果与当前视图
/// 由 API 层经 SharedState 共享
#[derive(Debug, Default)]
pub struct AppState {
    clients: Vec<ClientRecord>,
    workers: Vec<WorkerRecord>,
    tasks: Vec<TaskRecord>,
    rules: Vec<BusinessRule>,
    weights: PrioritizationWeights,
    findings: Vec<ValidationFinding>,
    active_view: EntityKind,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建共享句柄
    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::new()))
    }

    // ==========================================
    // 记录集合（整体替换）
    // ==========================================

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn workers(&self) -> &[WorkerRecord] {
        &self.workers
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn replace_clients(&mut self, next: Vec<ClientRecord>) {
        self.clients = next;
    }

    pub fn replace_workers(&mut self, next: Vec<WorkerRecord>) {
        self.workers = next;
    }

    pub fn replace_tasks(&mut self, next: Vec<TaskRecord>) {
        self.tasks = next;
    }

    /// 发布一次导入产物: 三类集合整体替换,视图切回客户页
    pub fn publish_bundle(&mut self, bundle: DatasetBundle) {
        info!(
            batch_id = %bundle.batch.batch_id,
            clients = bundle.clients.len(),
            workers = bundle.workers.len(),
            tasks = bundle.tasks.len(),
            "发布导入数据集到应用状态"
        );
        self.clients = bundle.clients;
        self.workers = bundle.workers;
        self.tasks = bundle.tasks;
        self.active_view = EntityKind::Clients;
    }

    /// 三类集合的克隆快照（检索负载/外部校验入参）
    pub fn dataset(&self) -> Dataset {
        Dataset {
            clients: self.clients.clone(),
            workers: self.workers.clone(),
            tasks: self.tasks.clone(),
        }
    }

    // ==========================================
    // 规则表与权重（整体替换）
    // ==========================================

    pub fn rules(&self) -> &[BusinessRule] {
        &self.rules
    }

    pub fn replace_rules(&mut self, next: Vec<BusinessRule>) {
        self.rules = next;
    }

    pub fn weights(&self) -> PrioritizationWeights {
        self.weights
    }

    pub fn replace_weights(&mut self, next: PrioritizationWeights) {
        self.weights = next;
    }

    // ==========================================
    // 校验结果（外部协作方产出,此处只持有）
    // ==========================================

    pub fn findings(&self) -> &[ValidationFinding] {
        &self.findings
    }

    pub fn replace_findings(&mut self, next: Vec<ValidationFinding>) {
        self.findings = next;
    }

    // ==========================================
    // 当前视图
    // ==========================================

    pub fn active_view(&self) -> EntityKind {
        self.active_view
    }

    pub fn set_active_view(&mut self, kind: EntityKind) {
        self.active_view = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import_report::ImportBatch;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample_bundle() -> DatasetBundle {
        DatasetBundle {
            clients: vec![ClientRecord {
                client_id: "C1".to_string(),
                client_name: "Acme".to_string(),
                group_tag: String::new(),
                priority_level: 1,
                requested_task_ids: vec![],
                preferred_phases: vec![],
                max_budget: 0.0,
                attributes_json: String::new(),
                extras: BTreeMap::new(),
            }],
            workers: vec![],
            tasks: vec![],
            notes: vec![],
            batch: ImportBatch {
                batch_id: "b-1".to_string(),
                client_rows: 1,
                worker_rows: 0,
                task_rows: 0,
                note_count: 0,
                imported_at: Utc::now(),
                elapsed_ms: 0,
            },
        }
    }

    #[test]
    fn test_publish_bundle_replaces_and_switches_view() {
        let mut state = AppState::new();
        state.set_active_view(EntityKind::Tasks);

        state.publish_bundle(sample_bundle());

        assert_eq!(state.clients().len(), 1);
        assert_eq!(state.active_view(), EntityKind::Clients);
    }

    #[test]
    fn test_dataset_snapshot_is_detached() {
        let mut state = AppState::new();
        state.publish_bundle(sample_bundle());

        let mut snapshot = state.dataset();
        snapshot.clients.clear();

        // 快照修改不影响状态本体
        assert_eq!(state.clients().len(), 1);
    }

    #[test]
    fn test_replacement_style_rules_update() {
        let mut state = AppState::new();
        assert!(state.rules().is_empty());

        let mut next = state.rules().to_vec();
        next.push(crate::domain::rule::BusinessRule::new(
            crate::domain::rule::RuleParams::CoRun {
                tasks: vec!["T1".to_string()],
            },
            0,
        ));
        state.replace_rules(next);

        assert_eq!(state.rules().len(), 1);
    }
}
