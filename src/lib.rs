// ==========================================
// 产线监控驾驶舱 - 核心库
// ==========================================
// 职责: 产线遥测的时间窗过滤、节拍聚合与分页窗口规划
// 系统定位: 驾驶舱前端的计算核心（不含界面与传输实现）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录、时间窗、统计、分页
pub mod domain;

// 引擎层 - 过滤/聚合/分页算法
pub mod engine;

// 配置层 - 驾驶舱配置
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 数据源与查询接口
pub mod api;

// 应用层 - 状态与会话
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FilterKind, LineData, LineStats, LinesSnapshot, PageItem, PageNavigation, PagePlan, PageTail,
    SectionSelection, TimeWindow,
};

// 引擎
pub use engine::{CycleAggregator, PageWindowPlanner, SectionSelector, TimeWindowFilter};

// 配置
pub use config::{ConfigManager, DashboardConfig};

// API
pub use api::{ApiError, ApiResult, DashboardApi, InMemoryLineDataSource, LineDataSource};

// 应用
pub use app::{DashboardSession, DashboardState, RefreshOutcome};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线监控驾驶舱";
