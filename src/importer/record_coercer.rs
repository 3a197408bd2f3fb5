// ==========================================
// 资源分配数据工作台 - 类型矫正器实现
// ==========================================
// 依据: 字段映射规范 v0.2 - 目标类型与兜底默认值
// 职责: 原始行 → 类型化记录,宽容矫正 + 留痕
// ==========================================
// 红线: 矫正从不失败;输出记录的每个声明字段必有值
// 红线: 兜底替换必须产出 CoercionNote,不得静默吞掉
// ==========================================

use crate::domain::import_report::CoercionNote;
use crate::domain::records::{ClientRecord, TaskRecord, WorkerRecord};
use crate::domain::schema::{self, FieldKind};
use crate::domain::types::EntityKind;
use crate::importer::dataset_importer_trait::{RawRow, RecordCoercer as RecordCoercerTrait};
use std::collections::BTreeMap;

pub struct RecordCoercer;

/// 单行矫正上下文（留痕所需的定位信息）
struct RowCtx<'a> {
    kind: EntityKind,
    row_number: usize,
    entity_id: &'a str,
    notes: &'a mut Vec<CoercionNote>,
}

impl RowCtx<'_> {
    fn record(&mut self, field: &str, original: &str, substituted: String) {
        self.notes.push(CoercionNote {
            entity_kind: self.kind,
            row_number: self.row_number,
            entity_id: self.entity_id.to_string(),
            field: field.to_string(),
            original: original.to_string(),
            substituted,
        });
    }
}

impl RecordCoercer {
    /// 提取文本字段（TRIM,缺省为空串）
    fn text(row: &RawRow, field: &str) -> String {
        row.get(field).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// 主键: 取类别主键字段;缺失/空白时合成 temp-<行下标>
    fn identity(row: &RawRow, kind: EntityKind, index: usize) -> String {
        let raw = Self::text(row, schema::id_field(kind));
        if raw.is_empty() {
            format!("temp-{}", index)
        } else {
            raw
        }
    }

    /// 从字段表读取整数兜底默认值
    fn int_default(kind: EntityKind, field: &str) -> i64 {
        match schema::field_spec(kind, field).map(|s| s.kind) {
            Some(FieldKind::Integer { default }) => default,
            _ => 0,
        }
    }

    /// 从字段表读取浮点兜底默认值
    fn float_default(kind: EntityKind, field: &str) -> f64 {
        match schema::field_spec(kind, field).map(|s| s.kind) {
            Some(FieldKind::Float { default }) => default,
            _ => 0.0,
        }
    }

    /// 矫正整数标量
    ///
    /// 缺失/空白 → 默认值（不留痕,列本来就没给值）;
    /// 给了值但解析失败 → 默认值 + 留痕
    fn coerce_int(row: &RawRow, field: &str, ctx: &mut RowCtx<'_>) -> i64 {
        let default = Self::int_default(ctx.kind, field);
        let raw = Self::text(row, field);
        if raw.is_empty() {
            return default;
        }
        match raw.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                ctx.record(field, &raw, default.to_string());
                default
            }
        }
    }

    /// 矫正浮点标量（NaN/无穷视同解析失败）
    fn coerce_float(row: &RawRow, field: &str, ctx: &mut RowCtx<'_>) -> f64 {
        let default = Self::float_default(ctx.kind, field);
        let raw = Self::text(row, field);
        if raw.is_empty() {
            return default;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                ctx.record(field, &raw, default.to_string());
                default
            }
        }
    }

    /// 把原始值展开为列表片段
    ///
    /// JSON 数组字面量按元素传递,其余按逗号切分 + TRIM,丢弃空片段
    fn split_pieces(raw: &str) -> Vec<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        if trimmed.starts_with('[') {
            if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
                return values
                    .into_iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.trim().to_string(),
                        other => other.to_string(),
                    })
                    .filter(|s| !s.is_empty())
                    .collect();
            }
        }
        trimmed
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// 矫正文本列表
    fn coerce_text_list(row: &RawRow, field: &str) -> Vec<String> {
        row.get(field).map(|raw| Self::split_pieces(raw)).unwrap_or_default()
    }

    /// 矫正整数列表（解析失败的片段丢弃 + 留痕,列表不变形）
    fn coerce_int_list(row: &RawRow, field: &str, ctx: &mut RowCtx<'_>) -> Vec<i64> {
        let Some(raw) = row.get(field) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for piece in Self::split_pieces(raw) {
            match piece.parse::<i64>() {
                Ok(v) => out.push(v),
                Err(_) => ctx.record(field, &piece, "（片段已丢弃）".to_string()),
            }
        }
        out
    }

    /// 未识别列进入 extras 侧表（原值保留）
    fn extras(row: &RawRow, kind: EntityKind) -> BTreeMap<String, String> {
        row.iter()
            .filter(|(key, _)| !schema::is_canonical(kind, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl RecordCoercerTrait for RecordCoercer {
    fn coerce_clients(&self, rows: Vec<RawRow>) -> (Vec<ClientRecord>, Vec<CoercionNote>) {
        let mut notes = Vec::new();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let id = Self::identity(&row, EntityKind::Clients, index);
                let mut ctx = RowCtx {
                    kind: EntityKind::Clients,
                    row_number: index,
                    entity_id: &id,
                    notes: &mut notes,
                };
                ClientRecord {
                    client_name: Self::text(&row, "ClientName"),
                    group_tag: Self::text(&row, "GroupTag"),
                    priority_level: Self::coerce_int(&row, "PriorityLevel", &mut ctx),
                    requested_task_ids: Self::coerce_text_list(&row, "RequestedTaskIDs"),
                    preferred_phases: Self::coerce_int_list(&row, "PreferredPhases", &mut ctx),
                    max_budget: Self::coerce_float(&row, "MaxBudget", &mut ctx),
                    attributes_json: Self::text(&row, "AttributesJSON"),
                    extras: Self::extras(&row, EntityKind::Clients),
                    client_id: id.clone(),
                }
            })
            .collect();
        (records, notes)
    }

    fn coerce_workers(&self, rows: Vec<RawRow>) -> (Vec<WorkerRecord>, Vec<CoercionNote>) {
        let mut notes = Vec::new();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let id = Self::identity(&row, EntityKind::Workers, index);
                let mut ctx = RowCtx {
                    kind: EntityKind::Workers,
                    row_number: index,
                    entity_id: &id,
                    notes: &mut notes,
                };
                WorkerRecord {
                    worker_name: Self::text(&row, "WorkerName"),
                    worker_group: Self::text(&row, "WorkerGroup"),
                    skills: Self::coerce_text_list(&row, "Skills"),
                    available_slots: Self::coerce_int_list(&row, "AvailableSlots", &mut ctx),
                    max_load_per_phase: Self::coerce_int(&row, "MaxLoadPerPhase", &mut ctx),
                    hourly_rate: Self::coerce_float(&row, "HourlyRate", &mut ctx),
                    attributes_json: Self::text(&row, "AttributesJSON"),
                    extras: Self::extras(&row, EntityKind::Workers),
                    worker_id: id.clone(),
                }
            })
            .collect();
        (records, notes)
    }

    fn coerce_tasks(&self, rows: Vec<RawRow>) -> (Vec<TaskRecord>, Vec<CoercionNote>) {
        let mut notes = Vec::new();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let id = Self::identity(&row, EntityKind::Tasks, index);
                let mut ctx = RowCtx {
                    kind: EntityKind::Tasks,
                    row_number: index,
                    entity_id: &id,
                    notes: &mut notes,
                };
                TaskRecord {
                    task_name: Self::text(&row, "TaskName"),
                    duration: Self::coerce_int(&row, "Duration", &mut ctx),
                    required_skills: Self::coerce_text_list(&row, "RequiredSkills"),
                    preferred_phases: Self::coerce_int_list(&row, "PreferredPhases", &mut ctx),
                    priority_level: Self::coerce_int(&row, "PriorityLevel", &mut ctx),
                    dependencies: Self::coerce_text_list(&row, "Dependencies"),
                    max_concurrent: Self::coerce_int(&row, "MaxConcurrent", &mut ctx),
                    attributes_json: Self::text(&row, "AttributesJSON"),
                    extras: Self::extras(&row, EntityKind::Tasks),
                    task_id: id.clone(),
                }
            })
            .collect();
        (records, notes)
    }
}
