// ==========================================
// 产线监控驾驶舱 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换配置/数据源错误为用户友好的错误消息
// 说明: 过滤、聚合、分页引擎本身不报错,此处只覆盖外围调用
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 数据源错误
    // ==========================================
    #[error("数据源请求失败: {0}")]
    DataSourceError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 数据源错误（保留完整错误链）
    pub fn data_source(context: impl std::fmt::Display, err: anyhow::Error) -> Self {
        ApiError::DataSourceError(format!("{}: {:#}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_data_source_keeps_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("connection reset"));
        let err = err.context("GET /lines").unwrap_err();
        let api_err = ApiError::data_source("line_id=L1", err);
        let msg = api_err.to_string();
        assert!(msg.contains("line_id=L1"));
        assert!(msg.contains("GET /lines"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_config_error_conversion() {
        let api_err: ApiError = ConfigError::UnknownKey("theme".to_string()).into();
        assert!(matches!(api_err, ApiError::ConfigError(_)));
        assert!(api_err.to_string().contains("theme"));
    }
}
