// ==========================================
// 产线监控驾驶舱 - 设备数据源 Trait
// ==========================================
// 职责: 定义驾驶舱所需的遥测读取接口（不包含传输实现）
// 实现者: 远程设备数据 API 客户端（由嵌入方提供）、InMemoryLineDataSource
// ==========================================

use crate::domain::line_data::{LineData, LinesSnapshot};
use async_trait::async_trait;
use std::collections::HashMap;

// ==========================================
// LineDataSource Trait
// ==========================================
#[async_trait]
pub trait LineDataSource: Send + Sync {
    /// 获取设备下的产线ID列表（顺序即侧边栏顺序）
    async fn get_line_ids(&self, device_id: &str) -> anyhow::Result<Vec<String>>;

    /// 获取单条产线的遥测记录
    async fn get_lines_data(&self, device_id: &str, line_id: &str)
        -> anyhow::Result<Vec<LineData>>;
}

// ==========================================
// InMemoryLineDataSource - 内存数据源
// ==========================================
// 用途: 离线演示、嵌入方联调、测试
#[derive(Debug, Clone, Default)]
pub struct InMemoryLineDataSource {
    devices: HashMap<String, LinesSnapshot>,
}

impl InMemoryLineDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device_id: &str, snapshot: LinesSnapshot) -> Self {
        self.devices.insert(device_id.to_string(), snapshot);
        self
    }

    fn device(&self, device_id: &str) -> anyhow::Result<&LinesSnapshot> {
        self.devices
            .get(device_id)
            .ok_or_else(|| anyhow::anyhow!("设备不存在: {}", device_id))
    }
}

#[async_trait]
impl LineDataSource for InMemoryLineDataSource {
    async fn get_line_ids(&self, device_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.device(device_id)?.line_ids().to_vec())
    }

    async fn get_lines_data(
        &self,
        device_id: &str,
        line_id: &str,
    ) -> anyhow::Result<Vec<LineData>> {
        let snapshot = self.device(device_id)?;
        snapshot
            .line(line_id)
            .map(|records| records.to_vec())
            .ok_or_else(|| anyhow::anyhow!("产线不存在: {}", line_id))
    }
}
