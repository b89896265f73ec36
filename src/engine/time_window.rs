// ==========================================
// 产线监控驾驶舱 - 时间窗过滤引擎
// ==========================================
// 职责: 判定每条记录是否落在所选时间窗内
// 输入: 记录序列 + 时间窗 + 当前时刻 now
// 输出: 保持原顺序的记录子序列（借用,不复制不修改）
// ==========================================
// 规则（按 timestamp 判定,不看节拍起止）:
// - day:    与 now 同一自然日
// - week:   timestamp >= now - 7×24h（滚动窗口,非自然周）
// - month:  与 now 同年同月
// - year:   与 now 同年
// - custom: 仅 start → 与 start 同一自然日
//           start + end → [start, end 23:59:59.999]
// - 其余（未识别 / custom 无 start）→ 放行
// 无效时间戳在所有比较型窗口中均被排除,从不报错
// ==========================================

use crate::domain::line_data::{resolve_local, LineData};
use crate::domain::types::TimeWindow;
use chrono::{DateTime, Datelike, Duration, TimeZone};
use tracing::{debug, instrument};

/// 滚动周窗口天数
pub const WEEK_WINDOW_DAYS: i64 = 7;

// ==========================================
// TimeWindowFilter - 时间窗过滤引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 自然日/月/年按 now 所在时区计算
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeWindowFilter;

impl TimeWindowFilter {
    /// 创建新的时间窗过滤引擎
    pub fn new() -> Self {
        Self
    }

    /// 过滤记录
    ///
    /// # 参数
    /// - `records`: 待过滤记录（保持原顺序）
    /// - `window`: 时间窗
    /// - `now`: 求值时刻,同时决定自然日历所用时区
    ///
    /// # 返回
    /// 落在窗口内的记录引用
    #[instrument(skip_all, fields(window = ?window))]
    pub fn filter<'a, I, Tz>(
        &self,
        records: I,
        window: &TimeWindow,
        now: &DateTime<Tz>,
    ) -> Vec<&'a LineData>
    where
        I: IntoIterator<Item = &'a LineData>,
        Tz: TimeZone,
    {
        let mut scanned = 0usize;
        let kept: Vec<&'a LineData> = records
            .into_iter()
            .inspect(|_| scanned += 1)
            .filter(|record| self.contains(record, window, now))
            .collect();

        debug!(scanned, kept = kept.len(), "时间窗过滤完成");
        kept
    }

    /// 判定单条记录是否在窗口内
    pub fn contains<Tz: TimeZone>(
        &self,
        record: &LineData,
        window: &TimeWindow,
        now: &DateTime<Tz>,
    ) -> bool {
        // 放行类窗口无需解析时间戳
        let start = match window {
            TimeWindow::Unrestricted => return true,
            TimeWindow::Custom { start: None, .. } => return true,
            TimeWindow::Custom { start: Some(start), .. } => Some(*start),
            _ => None,
        };

        let tz = now.timezone();
        let Some(ts) = record.timestamp_in(&tz) else {
            return false;
        };

        match window {
            TimeWindow::Day => ts.date_naive() == now.date_naive(),
            TimeWindow::Week => now
                .clone()
                .checked_sub_signed(Duration::days(WEEK_WINDOW_DAYS))
                .map_or(true, |lower| ts >= lower),
            TimeWindow::Month => ts.year() == now.year() && ts.month() == now.month(),
            TimeWindow::Year => ts.year() == now.year(),
            TimeWindow::Custom { end: None, .. } => {
                start.map_or(false, |s| ts.date_naive() == s.date())
            }
            TimeWindow::Custom { end: Some(end), .. } => {
                let lower = start.and_then(|s| resolve_local(&tz, &s));
                let upper = end.and_hms_milli_opt(23, 59, 59, 999).and_then(|e| {
                    tz.from_local_datetime(&e)
                        .latest()
                        .or_else(|| resolve_local(&tz, &e))
                });
                match (lower, upper) {
                    (Some(lower), Some(upper)) => ts >= lower && ts <= upper,
                    _ => false,
                }
            }
            TimeWindow::Unrestricted => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn record(ts: &str) -> LineData {
        LineData::new(ts, "", "", None)
    }

    fn now_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_day_uses_now_zone() {
        let engine = TimeWindowFilter::new();
        // UTC 06-14 23:30 在 +02:00 时区已是 06-15
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        assert!(engine.contains(&record("2024-06-14T23:30:00Z"), &TimeWindow::Day, &now));
        assert!(!engine.contains(&record("2024-06-14T21:30:00Z"), &TimeWindow::Day, &now));
    }

    #[test]
    fn test_week_is_rolling() {
        let engine = TimeWindowFilter::new();
        let now = now_utc();
        assert!(engine.contains(&record("2024-06-08T10:00:00Z"), &TimeWindow::Week, &now));
        assert!(!engine.contains(&record("2024-06-08T09:59:59.999Z"), &TimeWindow::Week, &now));
        // 未来时刻同样包含
        assert!(engine.contains(&record("2024-07-01T00:00:00Z"), &TimeWindow::Week, &now));
    }

    #[test]
    fn test_custom_without_start_fails_open() {
        let engine = TimeWindowFilter::new();
        let window = TimeWindow::Custom { start: None, end: None };
        assert!(engine.contains(&record("garbage"), &window, &now_utc()));
        assert!(engine.contains(&record("garbage"), &TimeWindow::Unrestricted, &now_utc()));
    }

    #[test]
    fn test_custom_range_end_inclusive() {
        let engine = TimeWindowFilter::new();
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let window = TimeWindow::custom_range(start, end);
        let now = now_utc();

        assert!(engine.contains(&record("2024-06-01T00:00:00Z"), &window, &now));
        assert!(engine.contains(&record("2024-06-03T23:59:59.999Z"), &window, &now));
        assert!(!engine.contains(&record("2024-06-04T00:00:00Z"), &window, &now));
        assert!(!engine.contains(&record("2024-05-31T23:59:59Z"), &window, &now));
    }

    #[test]
    fn test_invalid_timestamp_excluded() {
        let engine = TimeWindowFilter::new();
        let now = now_utc();
        for window in [TimeWindow::Day, TimeWindow::Week, TimeWindow::Month, TimeWindow::Year] {
            assert!(!engine.contains(&record("n/a"), &window, &now));
        }
    }
}
