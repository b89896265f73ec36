// ==========================================
// 产线监控驾驶舱 - 区段选择
// ==========================================
// 职责: 按侧边栏选择取出参与统计的记录,并给出活跃产线数
// - 全部产线: 按 line_ids 顺序展开所有产线记录,活跃数 = 产线总数
// - 单条产线: 仅取该产线记录（未知产线为空）,活跃数 = 1
// ==========================================

use crate::domain::line_data::{LineData, LinesSnapshot};
use crate::domain::types::SectionSelection;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy)]
pub struct SectionSelector;

impl SectionSelector {
    pub fn new() -> Self {
        Self
    }

    /// 取出区段内的记录（借用快照,不复制）
    pub fn records<'a>(
        &self,
        snapshot: &'a LinesSnapshot,
        selection: &SectionSelection,
    ) -> Vec<&'a LineData> {
        match selection {
            SectionSelection::AllLines => snapshot.all_records().collect(),
            SectionSelection::Line(line_id) => match snapshot.line(line_id) {
                Some(records) => records.iter().collect(),
                None => {
                    warn!(line_id = %line_id, "未知产线,按空数据处理");
                    Vec::new()
                }
            },
        }
    }

    /// 活跃产线数
    pub fn active_line_count(&self, snapshot: &LinesSnapshot, selection: &SectionSelection) -> usize {
        match selection {
            SectionSelection::AllLines => snapshot.line_count(),
            SectionSelection::Line(_) => 1,
        }
    }
}
