// ==========================================
// 设备 OEE 计算系统 - 引擎层
// ==========================================
// 职责: 区间合并、日界切分、停机聚合、OEE 计算
// 红线: 引擎不读文件, 全部为输入快照上的纯计算
// ==========================================

pub mod day_splitter;
pub mod downtime_aggregator;
pub mod interval_merger;
pub mod oee_calculator;
pub mod pipeline;

// 重导出核心引擎
pub use day_splitter::{split_all, split_at_midnight};
pub use downtime_aggregator::aggregate_downtime;
pub use interval_merger::{IntervalMerger, DEFAULT_AUTOMATED_REASON};
pub use oee_calculator::OeeCalculator;
pub use pipeline::{FleetSummary, ReportInputs, ReportOutput, ReportPipeline, ReportStage};
