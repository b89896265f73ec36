// ==========================================
// Mock 数据源实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use line_monitor::api::LineDataSource;
use line_monitor::domain::line_data::LineData;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 单次 get_line_ids 的脚本化响应
#[derive(Debug, Clone)]
pub struct ScriptedIds {
    pub delay_ms: u64,
    pub line_ids: Vec<String>,
}

/// Mock 数据源
///
/// - get_line_ids 优先按脚本依次返回（可带延迟）,脚本用完后返回默认产线列表
/// - get_lines_data 返回固定数据;fail_lines 中的产线返回错误
#[derive(Default)]
pub struct MockLineSource {
    default_ids: Vec<String>,
    data: HashMap<String, Vec<LineData>>,
    scripted: Mutex<VecDeque<ScriptedIds>>,
    fail_lines: Mutex<HashSet<String>>,
    fail_ids: Mutex<bool>,
    pub id_calls: AtomicUsize,
    pub data_calls: AtomicUsize,
}

impl MockLineSource {
    pub fn new(lines: Vec<(&str, Vec<LineData>)>) -> Self {
        let default_ids = lines.iter().map(|(id, _)| id.to_string()).collect();
        let data = lines
            .into_iter()
            .map(|(id, records)| (id.to_string(), records))
            .collect();
        Self {
            default_ids,
            data,
            ..Self::default()
        }
    }

    pub fn script(&self, delay_ms: u64, line_ids: &[&str]) {
        self.scripted.lock().unwrap().push_back(ScriptedIds {
            delay_ms,
            line_ids: line_ids.iter().map(|s| s.to_string()).collect(),
        });
    }

    pub fn fail_line(&self, line_id: &str) {
        self.fail_lines.lock().unwrap().insert(line_id.to_string());
    }

    pub fn heal(&self) {
        self.fail_lines.lock().unwrap().clear();
        *self.fail_ids.lock().unwrap() = false;
    }

    pub fn fail_line_ids(&self) {
        *self.fail_ids.lock().unwrap() = true;
    }
}

#[async_trait]
impl LineDataSource for MockLineSource {
    async fn get_line_ids(&self, device_id: &str) -> anyhow::Result<Vec<String>> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);

        if *self.fail_ids.lock().unwrap() {
            anyhow::bail!("device {} unreachable", device_id);
        }

        let scripted = self.scripted.lock().unwrap().pop_front();
        match scripted {
            Some(script) => {
                if script.delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(script.delay_ms)).await;
                }
                Ok(script.line_ids)
            }
            None => Ok(self.default_ids.clone()),
        }
    }

    async fn get_lines_data(
        &self,
        _device_id: &str,
        line_id: &str,
    ) -> anyhow::Result<Vec<LineData>> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_lines.lock().unwrap().contains(line_id) {
            anyhow::bail!("timeout while reading line {}", line_id);
        }
        Ok(self.data.get(line_id).cloned().unwrap_or_default())
    }
}
