// ==========================================
// 资源分配数据工作台 - 应用层
// ==========================================
// 职责: 应用级共享状态
// ==========================================

pub mod state;

pub use state::{AppState, SharedState};
