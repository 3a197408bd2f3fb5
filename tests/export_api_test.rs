// ==========================================
// 导出API 集成测试
// ==========================================
// 测试目标: CSV/JSON 导出形态、XLSX 显式拒绝
// ==========================================


use alloc_data_studio::api::{ApiError, ExportApi, ImportApi};
use alloc_data_studio::app::{AppState, SharedState};
use alloc_data_studio::export::ExportFormat;
use alloc_data_studio::logging;
use alloc_data_studio::EntityKind;
use test_helpers::{clients_csv, full_sources, tasks_csv, workers_csv};

async fn seeded_state() -> SharedState {
    let state = AppState::shared();
    let api = ImportApi::new(state.clone());
    let (c, w, t) = (clients_csv(), workers_csv(), tasks_csv());
    api.import_dataset(full_sources(&c, &w, &t))
        .await
        .expect("seed import");
    state
}

#[tokio::test]
async fn test_export_clients_csv_shape() {
    logging::init_test();
    let api = ExportApi::new(seeded_state().await);

    let csv_text = api
        .export_records(EntityKind::Clients, ExportFormat::Csv)
        .expect("export");

    let mut lines = csv_text.lines();
    let header = lines.next().expect("header");
    assert_eq!(
        header,
        "ClientID,ClientName,GroupTag,PriorityLevel,RequestedTaskIDs,PreferredPhases,MaxBudget,AttributesJSON"
    );
    // 列表字段重新以 ", " 连接
    assert!(csv_text.contains("\"T1, T2\""));
    // 三条数据行
    assert_eq!(lines.count(), 3);
}

#[tokio::test]
async fn test_export_tasks_json_canonical_names() {
    logging::init_test();
    let api = ExportApi::new(seeded_state().await);

    let json_text = api
        .export_records(EntityKind::Tasks, ExportFormat::Json)
        .expect("export");
    let parsed: serde_json::Value = serde_json::from_str(&json_text).expect("parse");

    assert_eq!(parsed.as_array().map(Vec::len), Some(3));
    assert_eq!(parsed[0]["TaskID"], "T1");
    assert_eq!(parsed[0]["RequiredSkills"][0], "go");
    // 缺主键行以合成 ID 导出
    assert_eq!(parsed[2]["TaskID"], "temp-2");
}

#[tokio::test]
async fn test_export_xlsx_explicitly_rejected() {
    logging::init_test();
    let api = ExportApi::new(seeded_state().await);

    let result = api.export_records(EntityKind::Workers, ExportFormat::Xlsx);

    match result {
        Err(ApiError::ExportFailed(msg)) => assert!(msg.contains("xlsx")),
        other => panic!("expected ExportFailed, got {:?}", other.map(|_| ())),
    }
}
