// ==========================================
// 规则配置API 集成测试
// ==========================================
// 测试目标: 规则 CRUD、权重档案、配置导出
// ==========================================

use alloc_data_studio::api::{ApiError, ExportApi, RuleApi};
use alloc_data_studio::app::AppState;
use alloc_data_studio::domain::rule::{GroupScope, RuleParams};
use alloc_data_studio::logging;
use alloc_data_studio::PrioritizationWeights;

#[test]
fn test_rule_crud_lifecycle() {
    logging::init_test();
    let state = AppState::shared();
    let api = RuleApi::new(state);

    // 创建
    let co_run = api
        .add_rule(
            RuleParams::CoRun {
                tasks: vec!["T1".to_string(), "T2".to_string()],
            },
            10,
        )
        .expect("add");
    let load_limit = api
        .add_rule(
            RuleParams::LoadLimit {
                worker_group: "GroupA".to_string(),
                max_slots_per_phase: 3,
            },
            5,
        )
        .expect("add");

    // 列表按优先级升序
    let rules = api.list_rules().expect("list");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].rule_id, load_limit.rule_id);
    assert_eq!(rules[1].rule_id, co_run.rule_id);

    // 停用
    let updated = api.set_rule_enabled(&co_run.rule_id, false).expect("toggle");
    assert!(!updated.enabled);

    // 更新参数
    let updated = api
        .update_rule_params(
            &load_limit.rule_id,
            RuleParams::LoadLimit {
                worker_group: "GroupA".to_string(),
                max_slots_per_phase: 2,
            },
        )
        .expect("update");
    assert!(matches!(
        updated.params,
        RuleParams::LoadLimit { max_slots_per_phase: 2, .. }
    ));

    // 删除
    api.remove_rule(&co_run.rule_id).expect("remove");
    assert_eq!(api.list_rules().expect("list").len(), 1);
    assert!(matches!(
        api.remove_rule(&co_run.rule_id),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_rule_from_natural_language_keeps_origin() {
    logging::init_test();
    let state = AppState::shared();
    let api = RuleApi::new(state);

    let rule = api
        .add_rule_from_query(
            RuleParams::SlotRestriction {
                scope: GroupScope::Worker,
                group_tag: "GroupB".to_string(),
                min_common_slots: 2,
            },
            0,
            "GroupB 的人员至少要有 2 个公共槽位",
        )
        .expect("add");

    assert_eq!(
        rule.source_query.as_deref(),
        Some("GroupB 的人员至少要有 2 个公共槽位")
    );
}

#[test]
fn test_weights_replacement() {
    logging::init_test();
    let state = AppState::shared();
    let api = RuleApi::new(state);

    let default = api.weights().expect("weights");
    assert_eq!(default, PrioritizationWeights::default());

    let custom = PrioritizationWeights {
        priority_level: 0.5,
        fulfillment: 0.2,
        fairness: 0.1,
        workload: 0.1,
        efficiency: 0.1,
    };
    api.set_weights(custom).expect("set");
    assert_eq!(api.weights().expect("weights"), custom);
}

#[test]
fn test_rules_config_export_document() {
    logging::init_test();
    let state = AppState::shared();
    let rule_api = RuleApi::new(state.clone());
    let export_api = ExportApi::new(state);

    rule_api
        .add_rule(
            RuleParams::PhaseWindow {
                task_id: "T3".to_string(),
                allowed_phases: vec![1, 2, 3],
            },
            1,
        )
        .expect("add");

    let json_text = export_api.export_rules_config().expect("export");
    let doc: serde_json::Value = serde_json::from_str(&json_text).expect("parse");

    assert_eq!(doc["rules"][0]["type"], "phaseWindow");
    assert_eq!(doc["rules"][0]["taskId"], "T3");
    assert_eq!(doc["rules"][0]["allowedPhases"][2], 3);
    assert!(doc["prioritization"]["priorityLevel"].as_f64().is_some());
}
