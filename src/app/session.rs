// ==========================================
// 产线监控驾驶舱 - 驾驶舱会话
// ==========================================
// 职责: 串联数据拉取、用户选择与统计计算
// - 拉取期间维护 fetching 标志（前端显示加载中）
// - 每次拉取分配递增代号;只应用比已应用代号更新的结果,
//   较早发起但较晚完成的拉取结果直接丢弃
// - 拉取失败仅记录日志,保留上一份数据
// ==========================================

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeZone};
use tracing::{error, info, warn};

use crate::api::dashboard_api::DashboardApi;
use crate::api::error::{ApiError, ApiResult};
use crate::app::state::DashboardState;
use crate::domain::pagination::{PageNavigation, PagePlan};
use crate::domain::stats::LineStats;
use crate::domain::types::{FilterKind, SectionSelection};

/// 一次刷新的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 已应用到会话
    Applied {
        generation: u64,
        lines: usize,
        records: usize,
    },
    /// 已有更新的结果,本次丢弃
    Stale { generation: u64, current: u64 },
}

/// 在途拉取计数守卫（拉取被取消时同样归还计数）
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct SessionInner {
    state: DashboardState,
    applied_generation: u64,
}

/// 驾驶舱会话
pub struct DashboardSession {
    api: Arc<DashboardApi>,
    device_id: String,
    inner: Mutex<SessionInner>,
    next_generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl DashboardSession {
    /// 创建会话（尚未拉取数据）
    ///
    /// # 参数
    /// - api: 驾驶舱API
    /// - device_id: 设备ID
    /// - now: 当前时刻,用作初始日期范围起点
    pub fn new<Tz: TimeZone>(api: Arc<DashboardApi>, device_id: &str, now: &DateTime<Tz>) -> Self {
        let state = DashboardState::new(api.config().default_filter, now.naive_local());
        Self {
            api,
            device_id: device_id.to_string(),
            inner: Mutex::new(SessionInner {
                state,
                applied_generation: 0,
            }),
            next_generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, SessionInner>> {
        self.inner
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// 是否有拉取进行中
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// 读取当前状态
    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> ApiResult<R> {
        Ok(f(&self.lock()?.state))
    }

    fn update_state(&self, f: impl FnOnce(&mut DashboardState)) -> ApiResult<()> {
        f(&mut self.lock()?.state);
        Ok(())
    }

    // ==========================================
    // 数据拉取
    // ==========================================

    /// 重新拉取设备数据
    ///
    /// # 返回
    /// - Ok(Applied): 数据已替换
    /// - Ok(Stale): 期间已有更新的拉取结果被应用,本次结果丢弃
    /// - Err: 拉取失败,原数据保留
    pub async fn refresh(&self) -> ApiResult<RefreshOutcome> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _in_flight = InFlightGuard::enter(&self.in_flight);
            self.api.fetch_snapshot(&self.device_id).await
        };

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(device_id = %self.device_id, generation, error = %e, "产线数据拉取失败");
                return Err(e);
            }
        };

        let mut inner = self.lock()?;
        if generation <= inner.applied_generation {
            warn!(
                generation,
                current = inner.applied_generation,
                "拉取结果已过期,丢弃"
            );
            return Ok(RefreshOutcome::Stale {
                generation,
                current: inner.applied_generation,
            });
        }

        let lines = snapshot.line_count();
        let records = snapshot.total_records();
        inner.state.set_snapshot(snapshot);
        inner.applied_generation = generation;

        info!(generation, lines, records, "驾驶舱数据已刷新");
        Ok(RefreshOutcome::Applied {
            generation,
            lines,
            records,
        })
    }

    /// 重置过滤条件并重新拉取
    pub async fn reset_all<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ApiResult<RefreshOutcome> {
        let now_local = now.naive_local();
        self.update_state(|state| state.reset_filters(now_local))?;
        self.refresh().await
    }

    // ==========================================
    // 用户选择
    // ==========================================

    pub fn select_section(&self, selection: SectionSelection) -> ApiResult<()> {
        self.update_state(|state| state.select_section(selection))
    }

    pub fn set_filter(&self, filter: FilterKind) -> ApiResult<()> {
        self.update_state(|state| state.set_filter(filter))
    }

    pub fn set_date_range(
        &self,
        start: Option<chrono::NaiveDateTime>,
        end: Option<chrono::NaiveDate>,
    ) -> ApiResult<()> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start.date() {
                return Err(ApiError::InvalidInput(format!(
                    "结束日期 {} 早于起始日期 {}",
                    end,
                    start.date()
                )));
            }
        }
        self.update_state(|state| state.set_date_range(start, end))
    }

    // ==========================================
    // 统计与分页
    // ==========================================

    /// 当前选择下的统计（每次从头计算）
    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ApiResult<LineStats> {
        let inner = self.lock()?;
        let state = &inner.state;
        Ok(self.api.line_stats(
            state.snapshot(),
            state.selection(),
            &state.time_window(),
            now,
        ))
    }

    /// 当前页的分页方案
    pub fn page_plan(&self, total_pages: usize, can_load_more: bool) -> ApiResult<PagePlan> {
        let active_page = self.with_state(|state| state.active_page())?;
        Ok(self.api.plan_pages(active_page, total_pages, can_load_more))
    }

    /// 处理分页导航
    ///
    /// # 返回
    /// - true: 需要调用方加载更多数据
    pub fn navigate(&self, action: PageNavigation) -> ApiResult<bool> {
        match action {
            PageNavigation::GoTo(page) => {
                self.update_state(|state| state.set_active_page(page))?;
                Ok(false)
            }
            PageNavigation::LoadMore => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::data_source::LineDataSource;
    use crate::config::DashboardConfig;
    use crate::domain::line_data::LineData;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use futures::task::noop_waker;
    use std::future::Future;
    use std::task::{Context, Poll};

    /// 永不返回的数据源
    struct HangingSource;

    #[async_trait]
    impl LineDataSource for HangingSource {
        async fn get_line_ids(&self, _device_id: &str) -> anyhow::Result<Vec<String>> {
            futures::future::pending().await
        }

        async fn get_lines_data(
            &self,
            _device_id: &str,
            _line_id: &str,
        ) -> anyhow::Result<Vec<LineData>> {
            Ok(Vec::new())
        }
    }

    fn session() -> DashboardSession {
        let api = Arc::new(DashboardApi::new(
            Arc::new(HangingSource),
            DashboardConfig::default(),
        ));
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        DashboardSession::new(api, "device-1", &now)
    }

    #[test]
    fn test_in_flight_guard_counts() {
        let counter = AtomicUsize::new(0);
        {
            let _a = InFlightGuard::enter(&counter);
            let _b = InFlightGuard::enter(&counter);
            assert_eq!(counter.load(Ordering::SeqCst), 2);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancelled_refresh_clears_fetching() {
        let session = session();
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let mut refresh = Box::pin(session.refresh());
        assert!(matches!(refresh.as_mut().poll(&mut cx), Poll::Pending));
        assert!(session.is_fetching());

        // 调用方放弃等待
        drop(refresh);
        assert!(!session.is_fetching());

        // 代号已分配,但未应用任何结果
        let generation = session.next_generation.load(Ordering::SeqCst);
        assert_eq!(generation, 1);
        assert_eq!(session.lock().unwrap().applied_generation, 0);
    }
}
