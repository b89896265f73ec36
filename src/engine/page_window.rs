// ==========================================
// 产线监控驾驶舱 - 分页窗口规划引擎
// ==========================================
// 职责: 计算分页控件中可见的页码窗口,以及首页/末页/加载更多控件
// 输入: 当前页（0 起）+ 总页数 + 可见页数上限 + 是否可加载更多
// 输出: PagePlan
// ==========================================
// 算法: 以当前页为中心的定长滑动窗口,向有效范围收敛
// 1) 总页数 < 2 → 空方案
// 2) end = active + ⌊max/2⌋,不小于 max-1,不大于 total-1
// 3) start = max(end - (max-1), 0)
// 4) 可见页 = [start..=end]
// 5) start > 0 → 显示首页快捷键
// 6) end 为最后一页: 可加载更多 → loadMore,否则不显示;其余 → last
// ==========================================
// 前置条件越界（active >= total）时钳制到最后一页并告警,不 panic
// ==========================================

use crate::domain::pagination::PagePlan;
use crate::domain::types::PageTail;
use tracing::warn;

/// 默认可见页数
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

// ==========================================
// PageWindowPlanner - 分页窗口规划引擎
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindowPlanner {
    max_visible: usize,
}

impl Default for PageWindowPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE_PAGES)
    }
}

impl PageWindowPlanner {
    /// 创建规划引擎
    ///
    /// `max_visible` 为 0 时按 1 处理
    pub fn new(max_visible: usize) -> Self {
        Self {
            max_visible: max_visible.max(1),
        }
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// 规划分页窗口
    pub fn plan(&self, active_page: usize, total_pages: usize, can_load_more: bool) -> PagePlan {
        if total_pages < 2 {
            return PagePlan::empty(active_page, total_pages);
        }

        let last_page = total_pages - 1;
        let active_page = if active_page > last_page {
            warn!(active_page, total_pages, "当前页超出范围,钳制到最后一页");
            last_page
        } else {
            active_page
        };

        let span = self.max_visible - 1;
        let end_page = active_page
            .saturating_add(self.max_visible / 2)
            .max(span)
            .min(last_page);
        let start_page = end_page.saturating_sub(span);

        let show_last_or_load_more = match (end_page == last_page, can_load_more) {
            (true, false) => PageTail::None,
            (true, true) => PageTail::LoadMore,
            (false, _) => PageTail::Last,
        };

        PagePlan {
            active_page,
            total_pages,
            visible_pages: (start_page..=end_page).collect(),
            show_first_shortcut: start_page > 0,
            show_last_or_load_more,
        }
    }
}

// ==========================================
// 已加载结果集的分页切片
// ==========================================

/// 总页数（向上取整）;每页条数为 0 时为 0
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// 取第 `page` 页的数据;越界时返回空切片
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_treated_as_one() {
        let planner = PageWindowPlanner::new(0);
        let plan = planner.plan(3, 10, false);
        assert_eq!(plan.visible_pages, vec![3]);
        assert!(plan.show_first_shortcut);
        assert_eq!(plan.show_last_or_load_more, PageTail::Last);
    }

    #[test]
    fn test_out_of_range_active_is_clamped() {
        let plan = PageWindowPlanner::default().plan(42, 7, false);
        assert_eq!(plan.active_page, 6);
        assert_eq!(plan.visible_pages, vec![2, 3, 4, 5, 6]);
        assert_eq!(plan.show_last_or_load_more, PageTail::None);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(page_slice(&items, 10, 0).len(), 10);
        assert_eq!(page_slice(&items, 10, 2), &[20, 21, 22]);
        assert!(page_slice(&items, 10, 3).is_empty());
        assert!(page_slice(&items, 0, 0).is_empty());
        assert!(page_slice(&items, 10, usize::MAX).is_empty());
    }
}
