// ==========================================
// 产线监控驾驶舱 - 分页方案
// ==========================================
// 职责: 描述一次渲染所需的分页控件（页码窗口 + 首页/末页/加载更多）
// 说明: 页码从 0 开始;展示文本为 index + 1
// ==========================================

use crate::domain::types::PageTail;
use serde::{Deserialize, Serialize};

/// 分页方案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePlan {
    pub active_page: usize,
    pub total_pages: usize,
    pub visible_pages: Vec<usize>,
    pub show_first_shortcut: bool,
    pub show_last_or_load_more: PageTail,
}

/// 单个页码按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageItem {
    pub index: usize,
    pub label: usize,
    pub active: bool,
}

/// 分页导航动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNavigation {
    GoTo(usize),
    LoadMore,
}

impl PagePlan {
    /// 空方案: 不渲染任何分页控件
    pub fn empty(active_page: usize, total_pages: usize) -> Self {
        Self {
            active_page,
            total_pages,
            visible_pages: Vec::new(),
            show_first_shortcut: false,
            show_last_or_load_more: PageTail::None,
        }
    }

    /// 是否需要渲染分页控件
    pub fn is_rendered(&self) -> bool {
        !self.visible_pages.is_empty()
    }

    pub fn start_page(&self) -> Option<usize> {
        self.visible_pages.first().copied()
    }

    pub fn end_page(&self) -> Option<usize> {
        self.visible_pages.last().copied()
    }

    /// 页码按钮列表
    pub fn items(&self) -> impl Iterator<Item = PageItem> + '_ {
        self.visible_pages.iter().map(move |&index| PageItem {
            index,
            label: index + 1,
            active: index == self.active_page,
        })
    }

    /// "首页" 按钮动作
    pub fn first_action(&self) -> Option<PageNavigation> {
        self.show_first_shortcut.then_some(PageNavigation::GoTo(0))
    }

    /// 尾部按钮动作
    ///
    /// - 窗口已到最后一页: 加载更多
    /// - 否则: 跳到最后一页
    pub fn tail_action(&self) -> Option<PageNavigation> {
        match self.show_last_or_load_more {
            PageTail::None => None,
            PageTail::LoadMore => Some(PageNavigation::LoadMore),
            PageTail::Last => Some(PageNavigation::GoTo(self.total_pages.saturating_sub(1))),
        }
    }
}
