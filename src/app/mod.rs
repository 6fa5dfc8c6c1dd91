// ==========================================
// manobrista 产能报表 - 应用层
// ==========================================
// 职责: 会话上下文与应用状态组装
// ==========================================

pub mod session;
pub mod state;

// 重导出
pub use session::ReportSession;
pub use state::AppState;
