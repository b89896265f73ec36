// ==========================================
// 产线监控驾驶舱 - 驾驶舱状态
// ==========================================
// 职责: 保存用户选择（区段、过滤类型、日期范围、当前页）与最近一次数据快照
// 说明: 只保存输入,统计结果一律由输入从头计算,不缓存
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::line_data::LinesSnapshot;
use crate::domain::types::{FilterKind, SectionSelection, TimeWindow};

/// 驾驶舱状态
#[derive(Debug, Clone)]
pub struct DashboardState {
    snapshot: LinesSnapshot,
    selection: SectionSelection,
    filter: FilterKind,
    default_filter: FilterKind,
    /// 日期范围: 起始为本地墙钟时间,结束为自然日（含当天）
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDate>,
    active_page: usize,
}

impl DashboardState {
    /// 创建初始状态
    ///
    /// 日期范围初始为 [now, 无],过滤类型取配置默认值
    pub fn new(default_filter: FilterKind, now: NaiveDateTime) -> Self {
        Self {
            snapshot: LinesSnapshot::new(),
            selection: SectionSelection::AllLines,
            filter: default_filter,
            default_filter,
            start_date: Some(now),
            end_date: None,
            active_page: 0,
        }
    }

    // ==========================================
    // 数据快照
    // ==========================================

    pub fn snapshot(&self) -> &LinesSnapshot {
        &self.snapshot
    }

    /// 替换数据快照（保留区段与过滤选择）
    pub fn set_snapshot(&mut self, snapshot: LinesSnapshot) {
        self.snapshot = snapshot;
    }

    // ==========================================
    // 区段选择
    // ==========================================

    pub fn selection(&self) -> &SectionSelection {
        &self.selection
    }

    /// 切换区段;回到第一页
    pub fn select_section(&mut self, selection: SectionSelection) {
        if self.selection != selection {
            self.active_page = 0;
        }
        self.selection = selection;
    }

    // ==========================================
    // 过滤类型与日期范围
    // ==========================================

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
    }

    pub fn date_range(&self) -> (Option<NaiveDateTime>, Option<NaiveDate>) {
        (self.start_date, self.end_date)
    }

    /// 更新日期范围;起始日期非空时自动切换为自定义过滤
    pub fn set_date_range(&mut self, start: Option<NaiveDateTime>, end: Option<NaiveDate>) {
        self.start_date = start;
        self.end_date = end;
        if start.is_some() {
            self.filter = FilterKind::Custom;
        }
    }

    /// 重置过滤条件: 默认过滤类型 + 日期范围 [now, 无]
    pub fn reset_filters(&mut self, now: NaiveDateTime) {
        self.filter = self.default_filter;
        self.start_date = Some(now);
        self.end_date = None;
        self.active_page = 0;
    }

    /// 当前时间窗
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::from_filter(self.filter, self.start_date, self.end_date)
    }

    // ==========================================
    // 分页
    // ==========================================

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn set_active_page(&mut self, page: usize) {
        self.active_page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new(FilterKind::Day, now());
        assert_eq!(state.filter(), FilterKind::Day);
        assert_eq!(state.date_range(), (Some(now()), None));
        assert_eq!(state.time_window(), TimeWindow::Day);
        assert_eq!(state.selection(), &SectionSelection::AllLines);
    }

    #[test]
    fn test_date_range_switches_to_custom() {
        let mut state = DashboardState::new(FilterKind::Week, now());
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        state.set_date_range(Some(start), None);
        assert_eq!(state.filter(), FilterKind::Custom);
        assert_eq!(state.time_window(), TimeWindow::custom_day(start));

        state.set_date_range(Some(start), Some(end));
        assert_eq!(state.time_window(), TimeWindow::custom_range(start, end));

        // 清空起始日期不改变过滤类型,窗口退化为放行
        state.set_date_range(None, None);
        assert_eq!(state.filter(), FilterKind::Custom);
        assert_eq!(state.time_window(), TimeWindow::Custom { start: None, end: None });
    }

    #[test]
    fn test_reset_filters() {
        let mut state = DashboardState::new(FilterKind::Month, now());
        state.set_filter(FilterKind::Year);
        state.set_active_page(4);
        let later = now() + chrono::Duration::hours(1);

        state.reset_filters(later);
        assert_eq!(state.filter(), FilterKind::Month);
        assert_eq!(state.date_range(), (Some(later), None));
        assert_eq!(state.active_page(), 0);
    }

    #[test]
    fn test_select_section_resets_page() {
        let mut state = DashboardState::new(FilterKind::Day, now());
        state.set_active_page(3);
        state.select_section(SectionSelection::AllLines);
        assert_eq!(state.active_page(), 3);

        state.select_section(SectionSelection::Line("L1".to_string()));
        assert_eq!(state.active_page(), 0);
    }
}
