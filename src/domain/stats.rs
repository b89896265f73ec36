// ==========================================
// 产线监控驾驶舱 - 统计结果
// ==========================================

use serde::{Deserialize, Serialize};

/// 产线统计（驾驶舱汇总卡片）
///
/// 每次输入变化时完整重算,不保留增量状态
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStats {
    /// 件数 = OK + KO（未判定不计）
    pub total_pieces: u64,
    pub quality_ok: u64,
    pub quality_ko: u64,
    /// 合格率（%，1 位小数）
    pub quality_rate_percent: f64,
    /// 平均节拍（秒，1 位小数）
    pub avg_cycle_time_seconds: f64,
    pub active_lines: usize,
}

impl LineStats {
    /// 无数据时的统计
    pub fn empty(active_lines: usize) -> Self {
        Self {
            active_lines,
            ..Self::default()
        }
    }

    /// 展示用合格率文本，如 "98.5%"
    pub fn quality_rate_label(&self) -> String {
        format!("{:.1}%", self.quality_rate_percent)
    }

    /// 展示用节拍文本，如 "16.0s"
    pub fn avg_cycle_time_label(&self) -> String {
        format!("{:.1}s", self.avg_cycle_time_seconds)
    }
}
