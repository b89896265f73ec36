// ==========================================
// 产线监控驾驶舱 - 领域类型定义
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 过滤类型 (Filter Kind)
// ==========================================
// 序列化格式: lowercase (与前端选择器一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Day,    // 当天
    Week,   // 最近 7×24 小时
    Month,  // 当月
    Year,   // 当年
    Custom, // 自定义日期范围
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Day => "day",
            FilterKind::Week => "week",
            FilterKind::Month => "month",
            FilterKind::Year => "year",
            FilterKind::Custom => "custom",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(FilterKind::Day),
            "week" => Ok(FilterKind::Week),
            "month" => Ok(FilterKind::Month),
            "year" => Ok(FilterKind::Year),
            "custom" => Ok(FilterKind::Custom),
            other => Err(format!("未知的过滤类型: {}", other)),
        }
    }
}

// ==========================================
// 时间窗 (Time Window)
// ==========================================
// 自定义范围的日期按求值时区的本地墙钟时间解释;
// end 包含到当天 23:59:59.999
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
    Month,
    Year,
    Custom {
        start: Option<NaiveDateTime>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
    /// 不限制（fail-open）: 未识别的 kind 反序列化为此项
    #[serde(other)]
    Unrestricted,
}

impl TimeWindow {
    /// 由过滤类型与日期范围组装时间窗
    pub fn from_filter(
        kind: FilterKind,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDate>,
    ) -> Self {
        match kind {
            FilterKind::Day => TimeWindow::Day,
            FilterKind::Week => TimeWindow::Week,
            FilterKind::Month => TimeWindow::Month,
            FilterKind::Year => TimeWindow::Year,
            FilterKind::Custom => TimeWindow::Custom { start, end },
        }
    }

    /// 单日自定义窗口
    pub fn custom_day(start: NaiveDateTime) -> Self {
        TimeWindow::Custom {
            start: Some(start),
            end: None,
        }
    }

    /// 自定义日期范围
    pub fn custom_range(start: NaiveDateTime, end: NaiveDate) -> Self {
        TimeWindow::Custom {
            start: Some(start),
            end: Some(end),
        }
    }
}

// ==========================================
// 区段选择 (Section Selection)
// ==========================================
// 全部产线 或 单条产线
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SectionSelection {
    #[default]
    AllLines,
    Line(String),
}

impl SectionSelection {
    /// 侧边栏中"全部产线"的区段标识
    pub const ALL_LINES_ID: &'static str = "line";

    /// 由侧边栏区段标识解析
    pub fn from_section_id(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() || id == Self::ALL_LINES_ID {
            SectionSelection::AllLines
        } else {
            SectionSelection::Line(id.to_string())
        }
    }

    pub fn section_id(&self) -> &str {
        match self {
            SectionSelection::AllLines => Self::ALL_LINES_ID,
            SectionSelection::Line(id) => id,
        }
    }
}

impl fmt::Display for SectionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section_id())
    }
}

// ==========================================
// 分页尾部控件 (Page Tail)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageTail {
    Last,     // 跳到末页
    LoadMore, // 加载更多
    None,     // 不显示
}

impl fmt::Display for PageTail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTail::Last => write!(f, "last"),
            PageTail::LoadMore => write!(f, "loadMore"),
            PageTail::None => write!(f, "none"),
        }
    }
}
