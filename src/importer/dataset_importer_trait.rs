// ==========================================
// 资源分配数据工作台 - 数据集导入 Trait
// ==========================================
// 依据: 字段映射规范 v0.2 - 导入管道
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::import_report::{CoercionNote, DatasetBundle, UploadSources};
use crate::domain::records::{ClientRecord, TaskRecord, WorkerRecord};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录: 源列名 → 单元格文本
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（跳过完全空白行）
    /// - Err(ImportError): 文件读取/格式错误
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// HeaderMapper Trait
// ==========================================
// 用途: 表头归一化接口（阶段 1）
// 实现者: HeaderMapperImpl
pub trait HeaderMapper: Send + Sync {
    /// 将源表头映射为标准字段名
    ///
    /// # 参数
    /// - kind: 实体类别
    /// - headers: 源表头列表
    ///
    /// # 返回
    /// - Vec<(源表头, 标准字段名)>: 未命中的表头原样传递
    fn map_headers(&self, kind: EntityKind, headers: &[String]) -> Vec<(String, String)>;

    /// 将整行按标准字段名重建键
    ///
    /// # 说明
    /// 纯函数,无副作用;空行返回空行
    fn normalize_row(&self, kind: EntityKind, row: RawRow) -> RawRow;
}

// ==========================================
// RecordCoercer Trait
// ==========================================
// 用途: 类型矫正接口（阶段 2）
// 实现者: RecordCoercerImpl
// 约定: 矫正是全量的——输出记录每个声明字段都有值;从不报错,
//       兜底替换以 CoercionNote 留痕
pub trait RecordCoercer: Send + Sync {
    /// 矫正客户行集合
    fn coerce_clients(&self, rows: Vec<RawRow>) -> (Vec<ClientRecord>, Vec<CoercionNote>);

    /// 矫正人员行集合
    fn coerce_workers(&self, rows: Vec<RawRow>) -> (Vec<WorkerRecord>, Vec<CoercionNote>);

    /// 矫正任务行集合
    fn coerce_tasks(&self, rows: Vec<RawRow>) -> (Vec<TaskRecord>, Vec<CoercionNote>);
}

// ==========================================
// DatasetImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: DatasetImporterImpl
#[async_trait]
pub trait DatasetImporter: Send + Sync {
    /// 一次性导入三类文件
    ///
    /// # 参数
    /// - sources: 三个文件路径（任一缺失则整批拒绝）
    ///
    /// # 返回
    /// - Ok(DatasetBundle): 三类记录集合 + 矫正报告 + 批次信息
    /// - Err(ImportError): 缺文件 / 首个解析错误（整批中止）
    ///
    /// # 导入流程
    /// 1. 齐备性检查（缺失即拒绝,不触碰任何文件）
    /// 2. 三个文件并发解析（全部等待完成,按类别声明顺序取首个错误）
    /// 3. 表头归一化
    /// 4. 类型矫正（收集矫正记录）
    /// 5. 组装批次信息
    async fn import_bundle(&self, sources: UploadSources) -> ImportResult<DatasetBundle>;
}
