// ==========================================
// 资源分配数据工作台 - 表头归一化实现
// ==========================================
// 依据: 字段映射规范 v0.2 - 源表头 → 标准字段映射
// 职责: 模糊子串匹配,把任意源列名归一到标准字段名
// ==========================================
// 红线: 首个命中即返回（按字段表声明顺序）,不做最长/最优匹配;
//       该策略被下游依赖,不得擅自"优化"
// ==========================================

use crate::domain::schema;
use crate::domain::types::EntityKind;
use crate::importer::dataset_importer_trait::{HeaderMapper as HeaderMapperTrait, RawRow};

pub struct HeaderMapper;

impl HeaderMapper {
    /// 归一化文本: 去除全部空白并转小写
    ///
    /// 表头与标签两侧使用同一套归一化,
    /// 使 "Client ID" / "ClientID" / "  client id  " 归并到同一形态
    fn fold(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }

    /// 映射单个表头
    ///
    /// # 返回
    /// - 命中: 标准字段名
    /// - 未命中: 原表头原样返回（未知列以原名存续）
    pub fn map_header(&self, kind: EntityKind, raw: &str) -> String {
        let folded = Self::fold(raw);
        for spec in schema::fields_of(kind) {
            if folded.contains(&Self::fold(spec.label)) {
                return spec.canonical.to_string();
            }
        }
        raw.to_string()
    }
}

impl HeaderMapperTrait for HeaderMapper {
    fn map_headers(&self, kind: EntityKind, headers: &[String]) -> Vec<(String, String)> {
        headers
            .iter()
            .map(|h| (h.clone(), self.map_header(kind, h)))
            .collect()
    }

    fn normalize_row(&self, kind: EntityKind, row: RawRow) -> RawRow {
        // 纯函数: 仅重建键,不触碰值
        // 两个源列归并到同一标准字段时,后写入者覆盖先写入者
        row.into_iter()
            .map(|(key, value)| (self.map_header(kind, &key), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_header_exact_and_spaced_variants() {
        let mapper = HeaderMapper;
        assert_eq!(mapper.map_header(EntityKind::Clients, "Client ID"), "ClientID");
        assert_eq!(mapper.map_header(EntityKind::Clients, "ClientID"), "ClientID");
        assert_eq!(mapper.map_header(EntityKind::Clients, "  client id  "), "ClientID");
    }

    #[test]
    fn test_map_header_substring_containment() {
        let mapper = HeaderMapper;
        // 源表头包含标签即命中
        assert_eq!(
            mapper.map_header(EntityKind::Workers, "worker id (primary)"),
            "WorkerID"
        );
        assert_eq!(
            mapper.map_header(EntityKind::Tasks, "Estimated Duration"),
            "Duration"
        );
    }

    #[test]
    fn test_unknown_header_passes_through() {
        let mapper = HeaderMapper;
        assert_eq!(mapper.map_header(EntityKind::Clients, "Notes"), "Notes");
        // 别类实体的字段在本类别下不命中
        assert_eq!(mapper.map_header(EntityKind::Clients, "Skills"), "Skills");
    }

    #[test]
    fn test_first_match_wins_by_declaration_order() {
        let mapper = HeaderMapper;
        // "Task ID" 与 "Task Name" 的标签同时被包含时,取声明顺序靠前者
        assert_eq!(
            mapper.map_header(EntityKind::Tasks, "task id task name"),
            "TaskID"
        );
    }

    #[test]
    fn test_map_headers_preserves_input_order() {
        let mapper = HeaderMapper;
        let headers = vec![
            "ClientName".to_string(),
            "Notes".to_string(),
            "client id".to_string(),
        ];
        let mapped = mapper.map_headers(EntityKind::Clients, &headers);
        assert_eq!(
            mapped,
            vec![
                ("ClientName".to_string(), "ClientName".to_string()),
                ("Notes".to_string(), "Notes".to_string()),
                ("client id".to_string(), "ClientID".to_string()),
            ]
        );
    }

    #[test]
    fn test_map_headers_empty_input() {
        let mapper = HeaderMapper;
        let mapped = mapper.map_headers(EntityKind::Clients, &[]);
        assert!(mapped.is_empty());
    }

    #[test]
    fn test_normalize_row_rekeys_values() {
        let mapper = HeaderMapper;
        let mut row = RawRow::new();
        row.insert("Client ID".to_string(), "C1".to_string());
        row.insert("Notes".to_string(), "vip".to_string());

        let normalized = mapper.normalize_row(EntityKind::Clients, row);

        assert_eq!(normalized.get("ClientID"), Some(&"C1".to_string()));
        assert_eq!(normalized.get("Notes"), Some(&"vip".to_string()));
        assert!(normalized.get("Client ID").is_none());
    }
}
