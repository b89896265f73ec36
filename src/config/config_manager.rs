// ==========================================
// 产线监控驾驶舱 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 进程内 key-value（不落盘）
// ==========================================

use crate::domain::types::FilterKind;
use crate::engine::page_window::DEFAULT_MAX_VISIBLE_PAGES;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("未知配置项: {0}")]
    UnknownKey(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置快照解析失败: {0}")]
    SnapshotError(#[from] serde_json::Error),

    #[error("锁获取失败: {0}")]
    LockPoisoned(String),
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 分页
    pub const MAX_VISIBLE_PAGES: &str = "max_visible_pages";
    pub const PAGE_SIZE: &str = "page_size";

    // 过滤
    pub const DEFAULT_FILTER: &str = "default_filter";

    pub const ALL: [&str; 3] = [MAX_VISIBLE_PAGES, PAGE_SIZE, DEFAULT_FILTER];
}

// ==========================================
// DashboardConfig - 驾驶舱配置（已校验）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 分页控件可见页数（>= 1）
    pub max_visible_pages: usize,
    /// 表格每页条数（>= 1）
    pub page_size: usize,
    /// 初始/重置后的过滤类型
    pub default_filter: FilterKind,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            default_filter: FilterKind::Day,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    kv: Arc<Mutex<HashMap<String, String>>>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 由键值对创建;未知键直接拒绝
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let manager = Self::new();
        for (key, value) in pairs {
            let key: String = key.into();
            let value: String = value.into();
            manager.set_config_value(&key, &value)?;
        }
        Ok(manager)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, ConfigError> {
        self.kv
            .lock()
            .map_err(|e| ConfigError::LockPoisoned(e.to_string()))
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值
    ///
    /// 写入前按键校验格式,格式错误不落入存储
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        if !config_keys::ALL.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        validate_value(key, value)?;

        let mut kv = self.lock()?;
        kv.insert(key.to_string(), value.trim().to_string());
        tracing::debug!(config_key = key, value = %value, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式,键有序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let kv = self.lock()?;
        let ordered: BTreeMap<&String, &String> = kv.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 覆盖现有配置;任一项校验失败则整体不生效
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, ConfigError> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        for (key, value) in &config_map {
            if !config_keys::ALL.contains(&key.as_str()) {
                return Err(ConfigError::UnknownKey(key.clone()));
            }
            validate_value(key, value)?;
        }

        let count = config_map.len();
        let mut kv = self.lock()?;
        *kv = config_map
            .into_iter()
            .map(|(k, v)| (k, v.trim().to_string()))
            .collect();

        tracing::info!(count, "配置快照已恢复");
        Ok(count)
    }

    /// 加载驾驶舱配置
    pub fn load_dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let defaults = DashboardConfig::default();

        let max_visible_pages = parse_positive(
            config_keys::MAX_VISIBLE_PAGES,
            &self.get_config_or_default(
                config_keys::MAX_VISIBLE_PAGES,
                &defaults.max_visible_pages.to_string(),
            )?,
        )?;
        let page_size = parse_positive(
            config_keys::PAGE_SIZE,
            &self.get_config_or_default(config_keys::PAGE_SIZE, &defaults.page_size.to_string())?,
        )?;
        let default_filter = parse_filter(&self.get_config_or_default(
            config_keys::DEFAULT_FILTER,
            defaults.default_filter.as_str(),
        )?)?;

        Ok(DashboardConfig {
            max_visible_pages,
            page_size,
            default_filter,
        })
    }
}

// ==========================================
// 配置值校验
// ==========================================

fn validate_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        config_keys::MAX_VISIBLE_PAGES | config_keys::PAGE_SIZE => {
            parse_positive(key, value).map(|_| ())
        }
        config_keys::DEFAULT_FILTER => parse_filter(value).map(|_| ()),
        other => Err(ConfigError::UnknownKey(other.to_string())),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    };

    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid("必须大于 0")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

fn parse_filter(value: &str) -> Result<FilterKind, ConfigError> {
    value
        .parse::<FilterKind>()
        .map_err(|message| ConfigError::InvalidValue {
            key: config_keys::DEFAULT_FILTER.to_string(),
            value: value.to_string(),
            message,
        })
}
