// ==========================================
// 产线监控驾驶舱 - 节拍聚合引擎
// ==========================================
// 职责: 将过滤后的记录归约为质量与节拍统计
// 输入: 记录序列 + 活跃产线数（调用方提供,原样透传）
// 输出: LineStats
// ==========================================
// 口径:
// - 件数 = OK + KO,质检未判定的记录不计件
// - 合格率 = OK / 件数 × 100,件数为 0 时为 0.0
// - 节拍仅统计起止均可解析且时长 > 0 的记录
// - 合格率与平均节拍均保留 1 位小数
// ==========================================

use crate::domain::line_data::LineData;
use crate::domain::stats::LineStats;
use crate::perf;
use tracing::{debug, instrument};

/// 保留 1 位小数
///
/// 按浮点数的精确十进制值舍入（0.15 实际为 0.1499…,结果为 0.1）;
/// 恰好居中的值（仅 j/4 形式,如 0.25）远离零进位
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }

    format!("{:.1}", value).parse().unwrap_or(value)
}

// ==========================================
// CycleAggregator - 节拍聚合引擎
// ==========================================
// 红线: 无状态引擎,单次遍历
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleAggregator;

impl CycleAggregator {
    /// 创建新的节拍聚合引擎
    pub fn new() -> Self {
        Self
    }

    /// 聚合统计
    ///
    /// # 参数
    /// - `records`: 已过滤的记录
    /// - `active_lines`: 活跃产线数（单条产线为 1,全部产线为产线总数）
    #[instrument(skip(self, records))]
    pub fn aggregate<'a, I>(&self, records: I, active_lines: usize) -> LineStats
    where
        I: IntoIterator<Item = &'a LineData>,
    {
        let mut ok: u64 = 0;
        let mut ko: u64 = 0;
        let mut total_ms: i64 = 0;
        let mut valid_cycles: u64 = 0;
        let mut scanned: usize = 0;

        for record in records {
            scanned += 1;

            match record.quality {
                Some(true) => ok += 1,
                Some(false) => ko += 1,
                None => {}
            }

            // 零或负时长（起止颠倒、数据异常）直接忽略
            if let Some(ms) = record.cycle_duration_ms().filter(|ms| *ms > 0) {
                total_ms = total_ms.saturating_add(ms);
                valid_cycles += 1;
            }
        }

        perf::add_records(scanned);

        let total = ok + ko;
        let quality_rate_percent = if total > 0 {
            round_one_decimal(ok as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        let avg_cycle_time_seconds = if valid_cycles > 0 {
            round_one_decimal(total_ms as f64 / valid_cycles as f64 / 1000.0)
        } else {
            0.0
        };

        debug!(
            scanned,
            total_pieces = total,
            valid_cycles,
            "节拍聚合完成"
        );

        LineStats {
            total_pieces: total,
            quality_ok: ok,
            quality_ko: ko,
            quality_rate_percent,
            avg_cycle_time_seconds,
            active_lines,
        }
    }
}
