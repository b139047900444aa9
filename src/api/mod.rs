// ==========================================
// 设备 OEE 计算系统 - API 层
// ==========================================
// 职责: 提供报表 API 接口, 供命令行调用
// ==========================================

pub mod dto;
pub mod error;
pub mod report_api;

// 重导出核心类型
pub use dto::{AverageDto, DowntimeDto, MergedIntervalDto, MetricDto, ReportDto, SummaryDto};
pub use error::{ApiError, ApiResult};
pub use report_api::ReportApi;
