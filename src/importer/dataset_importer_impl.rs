// ==========================================
// 资源分配数据工作台 - 数据集导入编排实现
// ==========================================
// 职责: 整合导入流程,从三个上传文件到类型化数据集
// 流程: 齐备性检查 → 并发解析 → 表头归一化 → 类型矫正 → 批次汇总
// ==========================================

use crate::domain::import_report::{DatasetBundle, ImportBatch, UploadSources};
use crate::domain::types::EntityKind;
use crate::importer::dataset_importer_trait::{
    DatasetImporter, FileParser, HeaderMapper, RawRow, RecordCoercer,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// DatasetImporterImpl - 数据集导入编排器
// ==========================================
pub struct DatasetImporterImpl {
    // 导入组件
    file_parser: Arc<dyn FileParser>,
    header_mapper: Box<dyn HeaderMapper>,
    record_coercer: Box<dyn RecordCoercer>,
}

impl DatasetImporterImpl {
    /// 创建新的 DatasetImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - header_mapper: 表头归一化器
    /// - record_coercer: 类型矫正器
    pub fn new(
        file_parser: Arc<dyn FileParser>,
        header_mapper: Box<dyn HeaderMapper>,
        record_coercer: Box<dyn RecordCoercer>,
    ) -> Self {
        Self {
            file_parser,
            header_mapper,
            record_coercer,
        }
    }

    /// 使用默认组件装配（扩展名自适应解析器 + 标准映射/矫正器）
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(UniversalFileParser),
            Box::new(crate::importer::header_mapper::HeaderMapper),
            Box::new(crate::importer::record_coercer::RecordCoercer),
        )
    }

    /// 在阻塞线程池上解析单个文件
    fn spawn_parse(
        &self,
        path: PathBuf,
    ) -> tokio::task::JoinHandle<ImportResult<Vec<RawRow>>> {
        let parser = Arc::clone(&self.file_parser);
        tokio::task::spawn_blocking(move || parser.parse_to_raw_rows(&path))
    }

    /// 展平任务结果（执行失败与解析失败统一为 ImportError）
    fn flatten(
        result: Result<ImportResult<Vec<RawRow>>, tokio::task::JoinError>,
    ) -> ImportResult<Vec<RawRow>> {
        result.map_err(|e| ImportError::TaskJoinError(e.to_string()))?
    }

    /// 归一化一类文件的全部行
    fn normalize_rows(&self, kind: EntityKind, rows: Vec<RawRow>) -> Vec<RawRow> {
        rows.into_iter()
            .map(|row| self.header_mapper.normalize_row(kind, row))
            .collect()
    }
}

#[async_trait::async_trait]
impl DatasetImporter for DatasetImporterImpl {
    #[instrument(skip(self, sources), fields(batch_id))]
    async fn import_bundle(&self, sources: UploadSources) -> ImportResult<DatasetBundle> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(batch_id = %batch_id, "开始导入数据集");

        // === 步骤 1: 齐备性检查 ===
        // 缺任何一类文件整批拒绝,不触碰已给出的文件
        let missing = sources.missing_kinds();
        if !missing.is_empty() {
            let names = missing
                .iter()
                .map(|k| k.label_zh())
                .collect::<Vec<_>>()
                .join("、");
            warn!(missing = %names, "上传不完整，整批拒绝");
            return Err(ImportError::IncompleteUpload(names));
        }
        let (Some(clients_path), Some(workers_path), Some(tasks_path)) =
            (sources.clients, sources.workers, sources.tasks)
        else {
            return Err(ImportError::InternalError(
                "齐备性检查后仍缺少文件路径".to_string(),
            ));
        };

        // === 步骤 2: 并发解析三类文件 ===
        // 三个解析全部发出后统一等待;全部完成后按类别声明顺序取首个错误
        debug!("步骤 1: 并发解析三类文件");
        let (clients_parsed, workers_parsed, tasks_parsed) = futures::future::join3(
            self.spawn_parse(clients_path),
            self.spawn_parse(workers_path),
            self.spawn_parse(tasks_path),
        )
        .await;
        let client_rows = Self::flatten(clients_parsed)?;
        let worker_rows = Self::flatten(workers_parsed)?;
        let task_rows = Self::flatten(tasks_parsed)?;
        info!(
            clients = client_rows.len(),
            workers = worker_rows.len(),
            tasks = task_rows.len(),
            "文件解析完成"
        );

        // === 步骤 3: 表头归一化 ===
        debug!("步骤 2: 表头归一化");
        let client_rows = self.normalize_rows(EntityKind::Clients, client_rows);
        let worker_rows = self.normalize_rows(EntityKind::Workers, worker_rows);
        let task_rows = self.normalize_rows(EntityKind::Tasks, task_rows);

        // === 步骤 4: 类型矫正 ===
        debug!("步骤 3: 类型矫正");
        let (clients, mut notes) = self.record_coercer.coerce_clients(client_rows);
        let (workers, worker_notes) = self.record_coercer.coerce_workers(worker_rows);
        let (tasks, task_notes) = self.record_coercer.coerce_tasks(task_rows);
        notes.extend(worker_notes);
        notes.extend(task_notes);

        if !notes.is_empty() {
            warn!(note_count = notes.len(), "矫正过程产生兜底替换");
        }

        // === 步骤 5: 组装批次信息 ===
        let elapsed = start_time.elapsed();
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            client_rows: clients.len(),
            worker_rows: workers.len(),
            task_rows: tasks.len(),
            note_count: notes.len(),
            imported_at: Utc::now(),
            elapsed_ms: elapsed.as_millis() as i64,
        };

        info!(
            batch_id = %batch_id,
            clients = batch.client_rows,
            workers = batch.worker_rows,
            tasks = batch.task_rows,
            notes = batch.note_count,
            elapsed_ms = batch.elapsed_ms,
            "数据集导入完成"
        );

        Ok(DatasetBundle {
            clients,
            workers,
            tasks,
            notes,
            batch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn sample_files() -> (
        tempfile::NamedTempFile,
        tempfile::NamedTempFile,
        tempfile::NamedTempFile,
    ) {
        let clients = write_csv(
            "Client ID,Client Name,Priority Level,Requested Task IDs,Max Budget\n\
             C1,Acme,3,\"T1, T2\",1000\n\
             C2,Beta,abc,T3,\n",
        );
        let workers = write_csv(
            "WorkerID,WorkerName,Skills,AvailableSlots,MaxLoadPerPhase\n\
             W1,Ann,\"go, rust\",\"1,2\",2\n",
        );
        let tasks = write_csv(
            "TaskID,TaskName,Duration,RequiredSkills\n\
             T1,Build,2,go\n\
             T2,Ship,1,rust\n",
        );
        (clients, workers, tasks)
    }

    #[tokio::test]
    async fn test_import_bundle_success() {
        let (c, w, t) = sample_files();
        let importer = DatasetImporterImpl::with_defaults();

        let bundle = importer
            .import_bundle(UploadSources::new(c.path(), w.path(), t.path()))
            .await
            .expect("import should succeed");

        assert_eq!(bundle.clients.len(), 2);
        assert_eq!(bundle.workers.len(), 1);
        assert_eq!(bundle.tasks.len(), 2);
        // 表头 "Client ID" 已归一到标准字段
        assert_eq!(bundle.clients[0].client_id, "C1");
        assert_eq!(bundle.clients[0].requested_task_ids, vec!["T1", "T2"]);
        // "abc" 优先级兜底为 1 并留痕
        assert_eq!(bundle.clients[1].priority_level, 1);
        assert!(bundle.notes.iter().any(|n| n.field == "PriorityLevel"));
        assert_eq!(bundle.batch.client_rows, 2);
    }

    #[tokio::test]
    async fn test_import_bundle_missing_file_rejected_without_parsing() {
        let (c, w, _) = sample_files();
        let importer = DatasetImporterImpl::with_defaults();

        let sources = UploadSources {
            clients: Some(c.path().to_path_buf()),
            workers: Some(w.path().to_path_buf()),
            tasks: None,
        };
        let result = importer.import_bundle(sources).await;

        match result {
            Err(ImportError::IncompleteUpload(msg)) => assert!(msg.contains("任务")),
            other => panic!("expected IncompleteUpload, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_import_bundle_parse_failure_aborts_batch() {
        let (c, w, _) = sample_files();
        let importer = DatasetImporterImpl::with_defaults();

        let sources = UploadSources {
            clients: Some(c.path().to_path_buf()),
            workers: Some(w.path().to_path_buf()),
            tasks: Some(PathBuf::from("no_such_tasks.csv")),
        };
        let result = importer.import_bundle(sources).await;

        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
