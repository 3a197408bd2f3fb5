// ==========================================
// 资源分配数据工作台 - 导出层
// ==========================================
// 职责: 记录集合与规则配置的下载格式生成
// 支持: CSV / JSON;XLSX 显式拒绝（工作簿栈只读）
// ==========================================

use crate::domain::rule::BusinessRule;
use crate::domain::schema;
use crate::domain::types::EntityKind;
use crate::domain::weights::PrioritizationWeights;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出格式不支持: {0}")]
    UnsupportedFormat(String),

    #[error("CSV 生成失败: {0}")]
    CsvError(String),

    #[error("序列化失败: {0}")]
    SerializationError(String),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

/// 单元格文本化: 字符串去引号,列表以 ", " 连接,其余取 JSON 文本
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// 记录集合 → CSV 文本
///
/// 列顺序: 标准字段表声明顺序,extras 键按字典序追加
pub fn records_to_csv<T: Serialize>(kind: EntityKind, records: &[T]) -> ExportResult<String> {
    let projected: Vec<Value> = records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(|e| ExportError::SerializationError(e.to_string())))
        .collect::<ExportResult<_>>()?;

    // 收集出现过的 extras 列
    let mut extra_keys = BTreeSet::new();
    for row in &projected {
        if let Some(Value::Object(extras)) = row.get("extras") {
            extra_keys.extend(extras.keys().cloned());
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    // 表头
    let mut header: Vec<String> = schema::fields_of(kind)
        .iter()
        .map(|f| f.canonical.to_string())
        .collect();
    header.extend(extra_keys.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| ExportError::CsvError(e.to_string()))?;

    // 数据行
    for row in &projected {
        let mut cells: Vec<String> = schema::fields_of(kind)
            .iter()
            .map(|f| row.get(f.canonical).map(value_to_cell).unwrap_or_default())
            .collect();
        for key in &extra_keys {
            let cell = row
                .get("extras")
                .and_then(|e| e.get(key))
                .map(value_to_cell)
                .unwrap_or_default();
            cells.push(cell);
        }
        writer
            .write_record(&cells)
            .map_err(|e| ExportError::CsvError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::CsvError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::CsvError(e.to_string()))
}

/// 记录集合 → JSON 文本（标准字段名投影）
pub fn records_to_json<T: Serialize>(records: &[T]) -> ExportResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// 规则 + 权重 → 配置 JSON 文档
pub fn rules_config_to_json(
    rules: &[BusinessRule],
    weights: &PrioritizationWeights,
) -> ExportResult<String> {
    let doc = serde_json::json!({
        "rules": rules,
        "prioritization": weights,
    });
    serde_json::to_string_pretty(&doc).map_err(|e| ExportError::SerializationError(e.to_string()))
}
