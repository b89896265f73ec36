// ==========================================
// 产线监控驾驶舱 - 引擎层
// ==========================================
// 职责: 时间窗过滤、节拍聚合、分页窗口规划
// 红线: 引擎均为同步纯函数,无 IO、无共享可变状态,
//       每次调用从头计算
// ==========================================

pub mod cycle_aggregator;
pub mod page_window;
pub mod section;
pub mod time_window;

// 重导出核心引擎
pub use cycle_aggregator::{round_one_decimal, CycleAggregator};
pub use page_window::{page_count, page_slice, PageWindowPlanner, DEFAULT_MAX_VISIBLE_PAGES};
pub use section::SectionSelector;
pub use time_window::{TimeWindowFilter, WEEK_WINDOW_DAYS};
