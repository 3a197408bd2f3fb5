// ==========================================
// 资源分配数据工作台 - 查询/过滤门面
// ==========================================
// 职责: 表格视图的内存过滤与排序
// 约定: 记录经标准 JSON 投影参与匹配与比较,不改动记录本身
// ==========================================

use crate::domain::types::SortDirection;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

// ==========================================
// SortSpec - 排序请求
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub key: String, // 标准字段名
    pub direction: SortDirection,
}

// ==========================================
// SortCycle - 排序键切换状态机
// ==========================================
// 同一键反复激活: 升序 → 降序 → 取消排序;换键从升序重新开始
#[derive(Debug, Clone, Default)]
pub struct SortCycle {
    current: Option<SortSpec>,
}

impl SortCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 激活一个排序键,返回切换后的状态
    pub fn toggle(&mut self, key: &str) -> Option<&SortSpec> {
        self.current = match self.current.take() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Asc => Some(SortSpec {
                    key: key.to_string(),
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec {
                key: key.to_string(),
                direction: SortDirection::Asc,
            }),
        };
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&SortSpec> {
        self.current.as_ref()
    }
}

/// 单个 JSON 值的字符串形态（字符串去引号,其余取紧凑 JSON 文本）
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 记录是否命中检索词: 任一字段值的字符串形态大小写不敏感包含检索词
fn record_matches(projected: &Value, needle_lower: &str) -> bool {
    match projected {
        Value::Object(fields) => fields
            .values()
            .any(|v| stringify(v).to_lowercase().contains(needle_lower)),
        other => stringify(other).to_lowercase().contains(needle_lower),
    }
}

/// 按字段自然序比较两条投影记录
///
/// 数值按数值序,字符串按字典序,类型不一致退化为字符串形态比较;
/// 缺失字段视为相等（不承诺平局次序）
fn compare_by_key(a: &Value, b: &Value, key: &str) -> Ordering {
    let (Some(av), Some(bv)) = (a.get(key), b.get(key)) else {
        return Ordering::Equal;
    };
    match (av, bv) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => stringify(av).cmp(&stringify(bv)),
    }
}

/// 过滤 + 排序,产出表格渲染用的视图
///
/// # 参数
/// - records: 当前集合
/// - term: 自由文本检索词（空串/空白命中全部）
/// - sort: 排序请求（None 保持导入顺序）
pub fn apply_view<T: Serialize + Clone>(
    records: &[T],
    term: &str,
    sort: Option<&SortSpec>,
) -> Vec<T> {
    let needle = term.trim().to_lowercase();

    let mut paired: Vec<(T, Value)> = records
        .iter()
        .map(|r| (r.clone(), serde_json::to_value(r).unwrap_or(Value::Null)))
        .filter(|(_, projected)| needle.is_empty() || record_matches(projected, &needle))
        .collect();

    if let Some(spec) = sort {
        paired.sort_by(|(_, a), (_, b)| {
            let ordering = compare_by_key(a, b, &spec.key);
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    paired.into_iter().map(|(record, _)| record).collect()
}
