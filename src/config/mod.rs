// ==========================================
// 产线监控驾驶舱 - 配置层
// ==========================================
// 职责: 驾驶舱配置管理（分页、默认过滤类型）
// 存储: 进程内 key-value,支持快照导出/恢复
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, DashboardConfig};
