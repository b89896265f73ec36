// ==========================================
// 产线监控驾驶舱 - API层
// ==========================================
// 职责: 对外业务接口,衔接数据源与引擎
// ==========================================

pub mod dashboard_api;
pub mod data_source;
pub mod error;

pub use dashboard_api::DashboardApi;
pub use data_source::{InMemoryLineDataSource, LineDataSource};
pub use error::{ApiError, ApiResult};
