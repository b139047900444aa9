// ==========================================
// 设备 OEE 计算系统 - 核心库
// ==========================================
// 职责: 自动/人工状态区间合并、日界切分、停机聚合、OEE 计算
// 分层: domain → engine → importer → api → 命令行
// 系统定位: 批处理报表 (每次请求处理一批封闭数据)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 区间与指标计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 报表接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DataSource, Displacement, EquipmentStatus, OeeCategory};

// 领域实体
pub use domain::{
    DailyMetrics, DateRange, DowntimeOccurrence, EquipmentMetrics, MergedInterval, MetricAverage,
    MetricResult, ProductionRecord, StatusInterval,
};

// 引擎
pub use engine::{
    IntervalMerger, OeeCalculator, ReportInputs, ReportOutput, ReportPipeline, ReportStage,
};

// 配置
pub use config::ReportConfig;

// API
pub use api::{ApiError, ReportApi, ReportDto};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设备 OEE 计算系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
