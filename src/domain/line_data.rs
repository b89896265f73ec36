// ==========================================
// 产线监控驾驶舱 - 产线遥测记录
// ==========================================
// 职责: 单个生产节拍的遥测事件 + 时间戳解析
// 说明: 时间字段保留原始字符串,解析失败视为无效时刻,
//       由引擎按排除策略处理,不报错
// ==========================================

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 无时区偏移的时间戳格式（按求值时区的本地时间解释）
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// 解析时间戳
///
/// 支持:
/// - RFC 3339（带偏移或 Z）
/// - 无偏移的本地时间（按 `tz` 解释,见 [`resolve_local`]）
/// - 纯日期（按 UTC 当天零点解释,再换算到 `tz`）
///
/// # 返回
/// - None: 无效时刻（空串、格式错误）
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return resolve_local(tz, &naive);
    }

    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(tz.from_utc_datetime(&midnight))
}

/// 将本地墙钟时间换算为 `tz` 中的时刻
///
/// - 重复时刻（夏令时回拨）取较早者
/// - 不存在的时刻（夏令时跳变缺口）按跳变前的偏移换算,结果落在跳变之后
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt);
    }

    let before = naive.checked_sub_signed(Duration::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = naive.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}

// ==========================================
// LineData - 产线遥测记录
// ==========================================
// 线上格式: camelCase JSON,时间为 ISO-8601 字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineData {
    pub timestamp: String,
    pub cycle_start_time: String,
    pub cycle_end_time: String,
    /// 质检结果: true=OK, false=KO, None=未判定
    #[serde(default)]
    pub quality: Option<bool>,
}

impl LineData {
    pub fn new(
        timestamp: impl Into<String>,
        cycle_start_time: impl Into<String>,
        cycle_end_time: impl Into<String>,
        quality: Option<bool>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            cycle_start_time: cycle_start_time.into(),
            cycle_end_time: cycle_end_time.into(),
            quality,
        }
    }

    /// 记录时间戳（换算到 `tz`）
    pub fn timestamp_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_instant(&self.timestamp, tz)
    }

    /// 节拍时长（毫秒）
    ///
    /// 任一端无法解析时返回 None;结果可能为零或负数,由调用方判定有效性
    pub fn cycle_duration_ms(&self) -> Option<i64> {
        let start = parse_instant(&self.cycle_start_time, &Utc)?;
        let end = parse_instant(&self.cycle_end_time, &Utc)?;
        Some((end - start).num_milliseconds())
    }
}

// ==========================================
// LinesSnapshot - 一次拉取得到的全部产线数据
// ==========================================
// line_ids 保持数据源返回的顺序,汇总全部产线时按此顺序展开
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinesSnapshot {
    line_ids: Vec<String>,
    data: HashMap<String, Vec<LineData>>,
}

impl LinesSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 (line_id, 记录) 列表构建;重复的 line_id 合并记录
    pub fn from_lines(lines: Vec<(String, Vec<LineData>)>) -> Self {
        let mut snapshot = Self::new();
        for (line_id, records) in lines {
            snapshot.insert_line(line_id, records);
        }
        snapshot
    }

    pub fn insert_line(&mut self, line_id: String, records: Vec<LineData>) {
        match self.data.get_mut(&line_id) {
            Some(existing) => existing.extend(records),
            None => {
                self.line_ids.push(line_id.clone());
                self.data.insert(line_id, records);
            }
        }
    }

    pub fn line_ids(&self) -> &[String] {
        &self.line_ids
    }

    pub fn line_count(&self) -> usize {
        self.line_ids.len()
    }

    pub fn line(&self, line_id: &str) -> Option<&[LineData]> {
        self.data.get(line_id).map(|v| v.as_slice())
    }

    /// 按 line_ids 顺序遍历全部记录
    pub fn all_records(&self) -> impl Iterator<Item = &LineData> + '_ {
        self.line_ids
            .iter()
            .filter_map(move |id| self.data.get(id))
            .flat_map(|records| records.iter())
    }

    pub fn total_records(&self) -> usize {
        self.data.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_ids.is_empty()
    }
}
