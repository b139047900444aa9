// ==========================================
// 设备 OEE 计算系统 - 报表配置
// ==========================================
// 加载顺序: 默认值 → JSON 配置文件 → 环境变量 → 命令行参数
// ==========================================

use crate::engine::interval_merger::DEFAULT_AUTOMATED_REASON;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ==========================================
// 配置键（环境变量）
// ==========================================
pub mod config_keys {
    /// 数据目录
    pub const DATA_DIR: &str = "OEE_DATA_DIR";
    /// 日志级别过滤器
    pub const LOG_LEVEL: &str = "OEE_LOG_LEVEL";
    /// 自动区间原因
    pub const AUTOMATED_REASON: &str = "OEE_AUTOMATED_REASON";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ReportConfig - 报表配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub status_file: String,     // 自动采集状态日志
    pub manual_file: String,     // 人工录入记录
    pub production_file: String, // 生产记录
    pub automated_reason: String,
    pub log_level: Option<String>, // 为空时使用 RUST_LOG, 再缺省为 info
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            status_file: "status.json".to_string(),
            manual_file: "manual_status.json".to_string(),
            production_file: "production.json".to_string(),
            automated_reason: DEFAULT_AUTOMATED_REASON.to_string(),
            log_level: None,
        }
    }
}

impl ReportConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 可选的 JSON 配置文件; 缺省字段取默认值
    ///
    /// 读取文件后再应用环境变量覆写并校验。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（空值忽略）
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// 按给定来源覆写
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(config_keys::DATA_DIR) {
            self.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(level) = non_empty(config_keys::LOG_LEVEL) {
            self.log_level = Some(level.trim().to_string());
        }
        if let Some(reason) = non_empty(config_keys::AUTOMATED_REASON) {
            self.automated_reason = reason;
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let files = [
            ("status_file", &self.status_file),
            ("manual_file", &self.manual_file),
            ("production_file", &self.production_file),
        ];
        for (key, value) in files {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "文件名不能为空".to_string(),
                });
            }
        }
        if let Some(level) = &self.log_level {
            if level.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "log_level".to_string(),
                    message: "日志级别不能为空".to_string(),
                });
            }
            EnvFilter::try_new(level).map_err(|e| ConfigError::InvalidValue {
                key: "log_level".to_string(),
                message: format!("无效的日志过滤器 {}: {}", level, e),
            })?;
        }
        Ok(())
    }

    pub fn status_path(&self) -> PathBuf {
        self.data_dir.join(&self.status_file)
    }

    pub fn manual_path(&self) -> PathBuf {
        self.data_dir.join(&self.manual_file)
    }

    pub fn production_path(&self) -> PathBuf {
        self.data_dir.join(&self.production_file)
    }
}
