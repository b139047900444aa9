// ==========================================
// 设备 OEE 计算系统 - OEE 计算引擎
// ==========================================
// 职责: 可用率 / 性能率 / 合格率 / OEE 及等级
// 输入: 状态区间 + 生产记录
// 输出: MetricResult
// 红线: 所有除零情形返回 0, 不产生 NaN
// ==========================================

use crate::domain::interval::{compare_equipment_ids, StatusLabeled, TimeSpan};
use crate::domain::metrics::{DailyMetrics, EquipmentMetrics, MetricAverage, MetricResult};
use crate::domain::production::ProductionRecord;
use crate::domain::time::{overlap_secs, DateRange};
use crate::domain::types::OeeCategory;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

// ==========================================
// OeeCalculator - OEE 计算引擎
// ==========================================
pub struct OeeCalculator {
    // 无状态引擎
}

impl Default for OeeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl OeeCalculator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 可用率
    ///
    /// 只统计状态区间与生产窗口 [start_production, finish_production]
    /// 的重叠时长: (RUNNING + IDLE) / (RUNNING + IDLE + DOWN)。
    /// 无生产记录或重叠总时长为 0 时返回 0。
    pub fn availability<T>(&self, intervals: &[T], production: &[ProductionRecord]) -> f64
    where
        T: TimeSpan + StatusLabeled,
    {
        if production.is_empty() {
            return 0.0;
        }

        let mut available_secs = 0.0;
        let mut down_secs = 0.0;

        for interval in intervals {
            for record in production {
                let overlap = overlap_secs(
                    interval.start_time(),
                    interval.end_time(),
                    record.start_production,
                    record.finish_production,
                );
                if interval.status().is_available() {
                    available_secs += overlap;
                } else {
                    down_secs += overlap;
                }
            }
        }

        let total_secs = available_secs + down_secs;
        if total_secs <= 0.0 {
            return 0.0;
        }
        available_secs / total_secs
    }

    /// 性能率
    ///
    /// 理想节拍 = Σ计划时长 / Σ计划数量
    /// 实际节拍 = Σ(结束 - 开始) / Σ实际数量
    /// 性能率 = 理想节拍 / 实际节拍, 上限 1
    pub fn performance(&self, production: &[ProductionRecord]) -> f64 {
        if production.is_empty() {
            return 0.0;
        }

        let planned_duration: f64 = production.iter().map(|p| p.planned_duration_seconds).sum();
        let planned_quantity: f64 = production.iter().map(|p| p.planned_quantity).sum();
        let actual_duration: f64 = production.iter().map(|p| p.actual_duration_secs()).sum();
        let actual_quantity: f64 = production.iter().map(|p| p.actual_quantity).sum();

        if planned_quantity == 0.0 || actual_quantity == 0.0 {
            return 0.0;
        }

        let ideal_cycle_time = planned_duration / planned_quantity;
        let actual_cycle_time = actual_duration / actual_quantity;
        if actual_cycle_time <= 0.0 {
            return 0.0;
        }

        (ideal_cycle_time / actual_cycle_time).min(1.0)
    }

    /// 合格率
    ///
    /// (Σ实际 - Σ不良) / Σ实际; 不良数大于产量时结果为负, 不截断。
    pub fn quality(&self, production: &[ProductionRecord]) -> f64 {
        let actual_quantity: f64 = production.iter().map(|p| p.actual_quantity).sum();
        let defect_quantity: f64 = production.iter().map(|p| p.defect_quantity).sum();

        if actual_quantity == 0.0 {
            return 0.0;
        }
        (actual_quantity - defect_quantity) / actual_quantity
    }

    /// 计算完整指标（含等级）
    pub fn calculate<T>(&self, intervals: &[T], production: &[ProductionRecord]) -> MetricResult
    where
        T: TimeSpan + StatusLabeled,
    {
        let availability = self.availability(intervals, production);
        let performance = self.performance(production);
        let quality = self.quality(production);
        let oee = (availability * performance * quality).min(1.0);

        MetricResult {
            availability,
            performance,
            quality,
            oee,
            category: OeeCategory::from_oee(oee),
        }
    }

    // ==========================================
    // 分组计算
    // ==========================================

    /// 按设备计算指标
    ///
    /// 设备集合为区间与生产记录中出现的全部设备, 按设备ID排序;
    /// 无生产记录的设备得到全零指标。
    pub fn equipment_metrics<T>(
        &self,
        intervals: &[T],
        production: &[ProductionRecord],
    ) -> Vec<EquipmentMetrics>
    where
        T: TimeSpan + StatusLabeled + Clone,
    {
        collect_equipment_ids(intervals, production)
            .into_iter()
            .map(|equipment_id| {
                let own_intervals: Vec<T> = intervals
                    .iter()
                    .filter(|i| i.equipment_id() == equipment_id)
                    .cloned()
                    .collect();
                let own_production: Vec<ProductionRecord> = production
                    .iter()
                    .filter(|p| p.equipment_id == equipment_id)
                    .cloned()
                    .collect();

                let metrics = self.calculate(&own_intervals, &own_production);
                debug!(
                    equipment_id = %equipment_id,
                    intervals = own_intervals.len(),
                    production = own_production.len(),
                    oee = metrics.oee,
                    "设备指标计算完成"
                );
                EquipmentMetrics {
                    equipment_id,
                    metrics,
                }
            })
            .collect()
    }

    /// 按设备、日期计算指标
    ///
    /// 区间须已按日界切分; 区间按开始日期归属, 生产记录按开始生产日期归属。
    pub fn daily_metrics<T>(
        &self,
        split_intervals: &[T],
        production: &[ProductionRecord],
        range: DateRange,
    ) -> Vec<DailyMetrics>
    where
        T: TimeSpan + StatusLabeled + Clone,
    {
        let mut results = Vec::new();

        for equipment_id in collect_equipment_ids(split_intervals, production) {
            let own_intervals: Vec<&T> = split_intervals
                .iter()
                .filter(|i| i.equipment_id() == equipment_id)
                .collect();
            let own_production: Vec<&ProductionRecord> = production
                .iter()
                .filter(|p| p.equipment_id == equipment_id)
                .collect();

            let dates: BTreeSet<NaiveDate> = own_intervals
                .iter()
                .map(|i| i.start_date())
                .chain(own_production.iter().map(|p| p.production_date()))
                .filter(|d| range.contains(*d))
                .collect();

            for date in dates {
                let day_intervals: Vec<T> = own_intervals
                    .iter()
                    .filter(|i| i.start_date() == date)
                    .map(|i| (*i).clone())
                    .collect();
                let day_production: Vec<ProductionRecord> = own_production
                    .iter()
                    .filter(|p| p.production_date() == date)
                    .map(|p| (*p).clone())
                    .collect();

                results.push(DailyMetrics {
                    equipment_id: equipment_id.clone(),
                    date,
                    metrics: self.calculate(&day_intervals, &day_production),
                });
            }
        }

        results
    }

    // ==========================================
    // 平均值
    // ==========================================

    /// 多设备或多日平均
    ///
    /// 只统计活跃项（可用率/性能率/合格率任一非零）; 无生产的项
    /// 被排除而不是按 0 计入。无活跃项时返回全零指标。
    pub fn average<'a, I>(&self, results: I) -> MetricAverage
    where
        I: IntoIterator<Item = &'a MetricResult>,
    {
        let active: Vec<&MetricResult> = results.into_iter().filter(|m| m.is_active()).collect();
        if active.is_empty() {
            return MetricAverage {
                metrics: MetricResult::zero(),
                active_count: 0,
            };
        }

        let n = active.len() as f64;
        let mean = |f: fn(&MetricResult) -> f64| active.iter().map(|m| f(m)).sum::<f64>() / n;

        let oee = mean(|m| m.oee);
        MetricAverage {
            metrics: MetricResult {
                availability: mean(|m| m.availability),
                performance: mean(|m| m.performance),
                quality: mean(|m| m.quality),
                oee,
                category: OeeCategory::from_oee(oee),
            },
            active_count: active.len(),
        }
    }
}

/// 区间与生产记录中出现的全部设备ID, 按设备ID排序
fn collect_equipment_ids<T: TimeSpan>(intervals: &[T], production: &[ProductionRecord]) -> Vec<String> {
    let mut ids: Vec<String> = intervals
        .iter()
        .map(|i| i.equipment_id().to_string())
        .chain(production.iter().map(|p| p.equipment_id.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    ids.sort_by(|a, b| compare_equipment_ids(a, b));
    ids
}
