// ==========================================
// 设备 OEE 计算系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/配置/时间格式错误, 面向调用方
// ==========================================

use crate::config::ConfigError;
use crate::domain::time::TimeFormatError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("数据导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("时间格式错误: {0}")]
    TimeFormat(#[from] TimeFormatError),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
