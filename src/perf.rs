use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));
static SLOW_PASS_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static RECORD_COUNT: Cell<u64> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 从环境变量加载性能统计开关（`logging::init` / `init_json` 时调用）
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `LINE_MONITOR_PERF=1` 强制开启
/// - `LINE_MONITOR_SLOW_PASS_MS=20` 配置慢计算阈值（毫秒）
pub fn configure_from_env() {
    let enabled = match std::env::var("LINE_MONITOR_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };
    set_enabled(enabled);

    let threshold = std::env::var("LINE_MONITOR_SLOW_PASS_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    SLOW_PASS_THRESHOLD_MS.store(threshold, Ordering::Relaxed);
}

/// 运行时开关
pub fn set_enabled(enabled: bool) {
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 累计当前计算轮次处理的记录数（仅在 PerfGuard 作用域内生效）
pub fn add_records(count: usize) {
    if !is_enabled() {
        return;
    }
    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if !active {
        return;
    }
    RECORD_COUNT.with(|c| c.set(c.get().saturating_add(count as u64)));
}

/// 性能统计 Guard：记录 elapsed_ms + 处理记录数
///
/// 使用方式：
/// ```ignore
/// let _perf = line_monitor::perf::PerfGuard::new("line_stats");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    record_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        let record_start = RECORD_COUNT.with(|c| c.get());
        Self {
            op,
            start: Instant::now(),
            record_start,
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
        if !is_enabled() {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let record_end = RECORD_COUNT.with(|c| c.get());
        let record_count = record_end.saturating_sub(self.record_start);

        let threshold = SLOW_PASS_THRESHOLD_MS.load(Ordering::Relaxed);
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                record_count,
                "slow pass"
            );
            return;
        }

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            record_count,
            "done"
        );
    }
}
