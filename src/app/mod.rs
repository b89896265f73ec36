// ==========================================
// 产线监控驾驶舱 - 应用层
// ==========================================
// 职责: 驾驶舱状态与会话,连接数据源、用户交互与引擎
// ==========================================

pub mod session;
pub mod state;

// 重导出
pub use session::{DashboardSession, RefreshOutcome};
pub use state::DashboardState;
