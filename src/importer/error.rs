// ==========================================
// 设备 OEE 计算系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 任一行解析失败即中止本批次
// ==========================================

use crate::domain::time::TimeFormatError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("时间格式错误 (行 {row}, 字段 {field}): {value}")]
    TimestampFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("未知设备状态 (行 {row}): {value}（仅支持 RUNNING/IDLE/DOWN）")]
    UnknownStatus { row: usize, value: String },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

impl ImportError {
    /// 由时间解析错误构造（补充行号与字段）
    pub fn timestamp(row: usize, field: &str, err: TimeFormatError) -> Self {
        let TimeFormatError::InvalidTimestamp(value) = err;
        ImportError::TimestampFormatError {
            row,
            field: field.to_string(),
            value,
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
