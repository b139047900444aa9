// ==========================================
// 设备 OEE 计算系统 - 领域模型层
// ==========================================
// 职责: 定义区间、生产记录、指标等领域实体与类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod interval;
pub mod metrics;
pub mod production;
pub mod time;
pub mod types;

// 重导出核心类型
pub use interval::{
    compare_equipment_ids, MergedInterval, StatusInterval, StatusLabeled, TimeSpan,
};
pub use metrics::{
    AggregationKey, DailyMetrics, DowntimeOccurrence, EquipmentMetrics, MetricAverage,
    MetricResult,
};
pub use production::ProductionRecord;
pub use time::{DateRange, TimeFormatError};
pub use types::{DataSource, Displacement, EquipmentStatus, OeeCategory};
