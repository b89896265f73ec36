// ==========================================
// 产线监控驾驶舱 - 驾驶舱 API
// ==========================================
// 职责: 封装数据源与引擎,提供驾驶舱查询
// 架构: API 层 → LineDataSource（拉取）/ Engine 层（计算）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::api::data_source::LineDataSource;
use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::domain::line_data::{LineData, LinesSnapshot};
use crate::domain::pagination::PagePlan;
use crate::domain::stats::LineStats;
use crate::domain::types::{SectionSelection, TimeWindow};
use crate::engine::{
    page_count, page_slice, CycleAggregator, PageWindowPlanner, SectionSelector,
    TimeWindowFilter,
};
use crate::perf::PerfGuard;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 从数据源拉取产线列表及各产线遥测
/// 2. 区段 → 时间窗 → 聚合 的统计流水线
/// 3. 按配置规划分页控件
pub struct DashboardApi {
    source: Arc<dyn LineDataSource>,
    config: DashboardConfig,
    selector: SectionSelector,
    window_filter: TimeWindowFilter,
    aggregator: CycleAggregator,
    planner: PageWindowPlanner,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - source: 设备数据源
    /// - config: 已校验的驾驶舱配置
    pub fn new(source: Arc<dyn LineDataSource>, config: DashboardConfig) -> Self {
        Self {
            source,
            config,
            selector: SectionSelector::new(),
            window_filter: TimeWindowFilter::new(),
            aggregator: CycleAggregator::new(),
            planner: PageWindowPlanner::new(config.max_visible_pages),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ==========================================
    // 数据拉取
    // ==========================================

    /// 拉取设备全部产线数据
    ///
    /// 先取产线ID列表,再并发拉取各产线记录;任一产线失败则整体失败
    ///
    /// # 返回
    /// - Ok(LinesSnapshot): 保持产线ID顺序的快照
    /// - Err(ApiError::InvalidInput): 设备ID为空
    /// - Err(ApiError::DataSourceError): 数据源请求失败
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self, device_id: &str) -> ApiResult<LinesSnapshot> {
        let device_id = device_id.trim();
        if device_id.is_empty() {
            return Err(ApiError::InvalidInput("设备ID不能为空".to_string()));
        }

        let line_ids = self
            .source
            .get_line_ids(device_id)
            .await
            .map_err(|e| ApiError::data_source(format!("device_id={}", device_id), e))?;

        let tasks = line_ids.into_iter().map(|line_id| async move {
            let records = self
                .source
                .get_lines_data(device_id, &line_id)
                .await
                .map_err(|e| ApiError::data_source(format!("line_id={}", line_id), e))?;
            Ok::<_, ApiError>((line_id, records))
        });
        let lines = try_join_all(tasks).await?;

        let snapshot = LinesSnapshot::from_lines(lines);
        info!(
            lines = snapshot.line_count(),
            records = snapshot.total_records(),
            "产线数据拉取完成"
        );
        Ok(snapshot)
    }

    // ==========================================
    // 统计
    // ==========================================

    /// 计算区段统计
    ///
    /// 每次调用从头计算: 区段选择 → 时间窗过滤 → 聚合
    pub fn line_stats<Tz: TimeZone>(
        &self,
        snapshot: &LinesSnapshot,
        selection: &SectionSelection,
        window: &TimeWindow,
        now: &DateTime<Tz>,
    ) -> LineStats {
        let _perf = PerfGuard::new("line_stats");

        let records = self.filtered_records(snapshot, selection, window, now);
        let active_lines = self.selector.active_line_count(snapshot, selection);
        self.aggregator.aggregate(records, active_lines)
    }

    /// 区段内落在时间窗中的记录
    pub fn filtered_records<'a, Tz: TimeZone>(
        &self,
        snapshot: &'a LinesSnapshot,
        selection: &SectionSelection,
        window: &TimeWindow,
        now: &DateTime<Tz>,
    ) -> Vec<&'a LineData> {
        let section = self.selector.records(snapshot, selection);
        self.window_filter.filter(section, window, now)
    }

    // ==========================================
    // 分页
    // ==========================================

    /// 规划分页控件（总页数已知或由服务端提供）
    pub fn plan_pages(&self, active_page: usize, total_pages: usize, can_load_more: bool) -> PagePlan {
        self.planner.plan(active_page, total_pages, can_load_more)
    }

    /// 按配置的每页条数规划已加载结果集的分页控件
    pub fn plan_table_pages(
        &self,
        total_items: usize,
        active_page: usize,
        can_load_more: bool,
    ) -> PagePlan {
        let total_pages = page_count(total_items, self.config.page_size);
        self.planner.plan(active_page, total_pages, can_load_more)
    }

    /// 取当前页的数据行
    pub fn page_rows<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        page_slice(items, self.config.page_size, page)
    }
}
