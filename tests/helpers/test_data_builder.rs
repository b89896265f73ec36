// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use line_monitor::domain::line_data::{LineData, LinesSnapshot};

// ==========================================
// LineData 构建器
// ==========================================

pub struct RecordBuilder {
    timestamp: String,
    cycle_start_time: String,
    cycle_end_time: String,
    quality: Option<bool>,
}

impl RecordBuilder {
    /// 以 timestamp 为基准创建记录（节拍起止默认为空串,即无效节拍）
    pub fn at(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            cycle_start_time: String::new(),
            cycle_end_time: String::new(),
            quality: None,
        }
    }

    pub fn ok(mut self) -> Self {
        self.quality = Some(true);
        self
    }

    pub fn ko(mut self) -> Self {
        self.quality = Some(false);
        self
    }

    /// 节拍起止（原始字符串）
    pub fn cycle(mut self, start: &str, end: &str) -> Self {
        self.cycle_start_time = start.to_string();
        self.cycle_end_time = end.to_string();
        self
    }

    /// 节拍起止（相对 base 的秒数偏移,输出 RFC 3339）
    pub fn cycle_secs(self, base: DateTime<Utc>, start_s: i64, end_s: i64) -> Self {
        let start = (base + Duration::seconds(start_s)).to_rfc3339();
        let end = (base + Duration::seconds(end_s)).to_rfc3339();
        self.cycle(&start, &end)
    }

    pub fn build(self) -> LineData {
        LineData {
            timestamp: self.timestamp,
            cycle_start_time: self.cycle_start_time,
            cycle_end_time: self.cycle_end_time,
            quality: self.quality,
        }
    }
}

// ==========================================
// 时间辅助
// ==========================================

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn zoned(offset_hours: i32, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

// ==========================================
// 快照构建
// ==========================================

pub fn snapshot(lines: Vec<(&str, Vec<LineData>)>) -> LinesSnapshot {
    LinesSnapshot::from_lines(
        lines
            .into_iter()
            .map(|(id, records)| (id.to_string(), records))
            .collect(),
    )
}
