// ==========================================
// 产线监控驾驶舱 - 领域层
// ==========================================
// 职责: 定义遥测记录、时间窗、统计结果与分页方案
// 红线: 领域层不做 IO,不持有外部状态
// ==========================================

pub mod line_data;
pub mod pagination;
pub mod stats;
pub mod types;

// 重导出核心类型
pub use line_data::{parse_instant, resolve_local, LineData, LinesSnapshot};
pub use pagination::{PageItem, PageNavigation, PagePlan};
pub use stats::LineStats;
pub use types::{FilterKind, PageTail, SectionSelection, TimeWindow};
