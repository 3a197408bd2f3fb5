// ==========================================
// 资源分配数据工作台 - 本地检索降级
// ==========================================
// 职责: AI 协作方不可用时的关键词启发式匹配
// 约定: 永不失败;置信度固定低于远端路径
// ==========================================

use crate::domain::records::Dataset;
use crate::domain::types::EntityKind;
use serde::Serialize;
use serde_json::{json, Value};

/// 降级路径的固定置信度（低于远端响应的常见区间）
pub const FALLBACK_CONFIDENCE: f64 = 0.35;

/// 关键词提取时忽略的常见虚词
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "all", "are", "find", "for", "有", "哪些", "in", "is", "me", "of", "or",
    "show", "that", "the", "to", "which", "with", "查询", "的",
];

/// 把自然语言检索词拆成关键词（小写、去虚词、丢弃单字符片段）
fn keywords_of(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .map(str::trim)
        .filter(|t| t.chars().count() >= 2 && !STOPWORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// 记录投影后是否命中任一关键词
fn projected_matches(projected: &Value, keywords: &[String]) -> bool {
    let Value::Object(fields) = projected else {
        return false;
    };
    fields.values().any(|v| {
        let text = match v {
            Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        keywords.iter().any(|k| text.contains(k))
    })
}

fn collect_hits<T: Serialize>(
    kind: EntityKind,
    records: &[T],
    keywords: &[String],
    out: &mut Vec<Value>,
) {
    for record in records {
        let projected = serde_json::to_value(record).unwrap_or(Value::Null);
        if projected_matches(&projected, keywords) {
            out.push(json!({
                "kind": kind,
                "record": projected,
            }));
        }
    }
}

/// 本地关键词检索
///
/// # 返回
/// - (命中实体, 解释文本): 检索词无有效关键词时命中为空
pub fn keyword_search(query: &str, dataset: &Dataset) -> (Vec<Value>, String) {
    let keywords = keywords_of(query);
    if keywords.is_empty() {
        return (
            Vec::new(),
            "检索词未包含可用关键词，本地匹配未执行".to_string(),
        );
    }

    let mut hits = Vec::new();
    collect_hits(EntityKind::Clients, &dataset.clients, &keywords, &mut hits);
    collect_hits(EntityKind::Workers, &dataset.workers, &keywords, &mut hits);
    collect_hits(EntityKind::Tasks, &dataset.tasks, &keywords, &mut hits);

    let explanation = format!(
        "AI 检索不可用，已按关键词 [{}] 本地匹配，命中 {} 条记录",
        keywords.join(", "),
        hits.len()
    );
    (hits, explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::TaskRecord;
    use std::collections::BTreeMap;

    fn task(id: &str, name: &str, skills: &[&str]) -> TaskRecord {
        TaskRecord {
            task_id: id.to_string(),
            task_name: name.to_string(),
            duration: 1,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            preferred_phases: vec![],
            priority_level: 1,
            dependencies: vec![],
            max_concurrent: 1,
            attributes_json: String::new(),
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn test_keywords_strip_stopwords() {
        let keywords = keywords_of("show me all tasks with welding");
        assert!(keywords.contains(&"welding".to_string()));
        assert!(keywords.contains(&"tasks".to_string()));
        assert!(!keywords.contains(&"all".to_string()));
        assert!(!keywords.contains(&"me".to_string()));
    }

    #[test]
    fn test_keyword_search_matches_skill_field() {
        let mut dataset = Dataset::default();
        dataset.tasks.push(task("T1", "Frame", &["welding"]));
        dataset.tasks.push(task("T2", "Paint", &["painting"]));

        let (hits, explanation) = keyword_search("find welding work", &dataset);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["kind"], "tasks");
        assert_eq!(hits[0]["record"]["TaskID"], "T1");
        assert!(explanation.contains("welding"));
    }

    #[test]
    fn test_keyword_search_empty_query() {
        let dataset = Dataset::default();
        let (hits, _) = keyword_search("  of the  ", &dataset);
        assert!(hits.is_empty());
    }
}
