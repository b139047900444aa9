// ==========================================
// 设备 OEE 计算系统 - 报表流水线
// ==========================================
// 职责: 合并 → 日切分 → {停机聚合 | 指标计算}
// 说明: 唯一的计算入口, 按请求的终点阶段输出
// ==========================================

use crate::domain::interval::{MergedInterval, StatusInterval};
use crate::domain::metrics::{
    DailyMetrics, DowntimeOccurrence, EquipmentMetrics, MetricAverage,
};
use crate::domain::production::ProductionRecord;
use crate::domain::time::DateRange;
use crate::engine::day_splitter::split_all;
use crate::engine::downtime_aggregator::aggregate_downtime;
use crate::engine::interval_merger::IntervalMerger;
use crate::engine::oee_calculator::OeeCalculator;
use tracing::{debug, info};

// ==========================================
// ReportInputs - 一次请求的输入快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub status: Vec<StatusInterval>,
    pub manual: Vec<StatusInterval>,
    pub production: Vec<ProductionRecord>,
}

// ==========================================
// ReportStage - 终点阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStage {
    Merged,                 // 合并区间
    Split,                  // 合并并按日切分
    Downtime,               // 停机次数聚合
    EquipmentOee,           // 按设备 OEE
    DailyOee(DateRange),    // 按设备按日 OEE
    Summary,                // 设备 OEE + 全厂平均 + 各设备日均
}

// ==========================================
// ReportOutput - 流水线输出
// ==========================================
#[derive(Debug, Clone)]
pub enum ReportOutput {
    Intervals(Vec<MergedInterval>),
    Downtime(Vec<DowntimeOccurrence>),
    EquipmentOee(Vec<EquipmentMetrics>),
    DailyOee(Vec<DailyMetrics>),
    Summary(FleetSummary),
}

/// 全厂汇总
#[derive(Debug, Clone)]
pub struct FleetSummary {
    pub equipment: Vec<EquipmentMetrics>,
    pub fleet_average: MetricAverage,
    pub daily_averages: Vec<(String, MetricAverage)>, // (设备ID, 日均)
}

// ==========================================
// ReportPipeline
// ==========================================
pub struct ReportPipeline {
    merger: IntervalMerger,
    calculator: OeeCalculator,
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::new(IntervalMerger::default())
    }
}

impl ReportPipeline {
    pub fn new(merger: IntervalMerger) -> Self {
        Self {
            merger,
            calculator: OeeCalculator::new(),
        }
    }

    /// 执行流水线
    ///
    /// 输入快照被完整消费, 各阶段产生新的序列。
    pub fn run(&self, inputs: ReportInputs, stage: ReportStage) -> ReportOutput {
        info!(
            ?stage,
            status = inputs.status.len(),
            manual = inputs.manual.len(),
            production = inputs.production.len(),
            "开始执行报表流水线"
        );

        let output = match stage {
            ReportStage::Merged => ReportOutput::Intervals(self.merged(inputs)),
            ReportStage::Split => ReportOutput::Intervals(self.split(inputs)),
            ReportStage::Downtime => ReportOutput::Downtime(self.downtime(inputs)),
            ReportStage::EquipmentOee => ReportOutput::EquipmentOee(self.equipment_oee(inputs)),
            ReportStage::DailyOee(range) => ReportOutput::DailyOee(self.daily_oee(inputs, range)),
            ReportStage::Summary => ReportOutput::Summary(self.summary(inputs)),
        };

        info!(?stage, "报表流水线执行完成");
        output
    }

    // ==========================================
    // 分阶段入口
    // ==========================================

    /// 合并区间（未切分）
    pub fn merged(&self, inputs: ReportInputs) -> Vec<MergedInterval> {
        self.merge(inputs).0
    }

    /// 合并并按日切分
    pub fn split(&self, inputs: ReportInputs) -> Vec<MergedInterval> {
        split_all(self.merge(inputs).0)
    }

    /// 停机次数聚合（基于切分后的区间）
    pub fn downtime(&self, inputs: ReportInputs) -> Vec<DowntimeOccurrence> {
        aggregate_downtime(&self.split(inputs))
    }

    /// 按设备指标
    pub fn equipment_oee(&self, inputs: ReportInputs) -> Vec<EquipmentMetrics> {
        let (merged, production) = self.merge(inputs);
        self.calculator.equipment_metrics(&merged, &production)
    }

    /// 按设备按日指标
    pub fn daily_oee(&self, inputs: ReportInputs, range: DateRange) -> Vec<DailyMetrics> {
        let (merged, production) = self.merge(inputs);
        let split = split_all(merged);
        self.calculator.daily_metrics(&split, &production, range)
    }

    /// 汇总: 设备指标 + 全厂平均 + 每台设备的多日平均
    pub fn summary(&self, inputs: ReportInputs) -> FleetSummary {
        let (merged, production) = self.merge(inputs);

        let equipment = self.calculator.equipment_metrics(&merged, &production);
        let fleet_average = self.calculator.average(equipment.iter().map(|e| &e.metrics));

        let split = split_all(merged);
        let daily = self
            .calculator
            .daily_metrics(&split, &production, DateRange::unbounded());

        let daily_averages = equipment
            .iter()
            .map(|e| {
                let avg = self.calculator.average(
                    daily
                        .iter()
                        .filter(|d| d.equipment_id == e.equipment_id)
                        .map(|d| &d.metrics),
                );
                (e.equipment_id.clone(), avg)
            })
            .collect();

        FleetSummary {
            equipment,
            fleet_average,
            daily_averages,
        }
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 合并全部设备区间, 返回合并结果与生产记录
    fn merge(&self, inputs: ReportInputs) -> (Vec<MergedInterval>, Vec<ProductionRecord>) {
        let ReportInputs {
            status,
            manual,
            production,
        } = inputs;

        let merged = self.merger.merge_all(status, manual);
        debug!(merged = merged.len(), "区间合并完成");
        (merged, production)
    }
}
