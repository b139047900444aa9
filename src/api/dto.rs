// ==========================================
// 设备 OEE 计算系统 - 输出 DTO
// ==========================================
// 字段名与原始报表接口保持一致 (Equipment / Start_Time / ...)
// 时间字段统一渲染为 YYYY/MM/DD HH:MM:SS
// ==========================================

use crate::domain::interval::MergedInterval;
use crate::domain::metrics::{
    DailyMetrics, DowntimeOccurrence, EquipmentMetrics, MetricAverage, MetricResult,
};
use crate::domain::time::{format_date, format_timestamp};
use crate::engine::pipeline::FleetSummary;
use serde::{Deserialize, Serialize};

// ==========================================
// 合并区间
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedIntervalDto {
    #[serde(rename = "Equipment")]
    pub equipment: String,
    #[serde(rename = "Start_Time")]
    pub start_time: String,
    #[serde(rename = "End_Time")]
    pub end_time: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Reason")]
    pub reason: Option<String>,
    #[serde(rename = "Provenance")]
    pub provenance: String,
}

impl From<&MergedInterval> for MergedIntervalDto {
    fn from(interval: &MergedInterval) -> Self {
        Self {
            equipment: interval.equipment_id.clone(),
            start_time: format_timestamp(&interval.start_time),
            end_time: format_timestamp(&interval.end_time),
            source: interval.source.to_string(),
            status: interval.status.to_string(),
            reason: interval.reason.clone(),
            provenance: interval.displacement.to_string(),
        }
    }
}

// ==========================================
// 停机聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeDto {
    pub equipment_id: String,
    pub date: String,
    pub reason: Option<String>,
    pub total_occurrence: usize,
}

impl From<&DowntimeOccurrence> for DowntimeDto {
    fn from(occurrence: &DowntimeOccurrence) -> Self {
        Self {
            equipment_id: occurrence.equipment_id.clone(),
            date: format_date(&occurrence.date),
            reason: occurrence.reason.clone(),
            total_occurrence: occurrence.total_occurrence,
        }
    }
}

// ==========================================
// 指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDto {
    pub equipment: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub category: String, // 超出 [0, 1] 时为空串
}

impl MetricDto {
    fn new(equipment: &str, date: Option<String>, m: &MetricResult) -> Self {
        Self {
            equipment: equipment.to_string(),
            date,
            availability: m.availability,
            performance: m.performance,
            quality: m.quality,
            oee: m.oee,
            category: category_label(m),
        }
    }
}

impl From<&EquipmentMetrics> for MetricDto {
    fn from(e: &EquipmentMetrics) -> Self {
        Self::new(&e.equipment_id, None, &e.metrics)
    }
}

impl From<&DailyMetrics> for MetricDto {
    fn from(d: &DailyMetrics) -> Self {
        Self::new(&d.equipment_id, Some(format_date(&d.date)), &d.metrics)
    }
}

fn category_label(m: &MetricResult) -> String {
    m.category.map(|c| c.to_string()).unwrap_or_default()
}

// ==========================================
// 平均值与汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageDto {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub equipment: Option<String>,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub category: String,
    pub active_count: usize,
}

impl AverageDto {
    fn new(equipment: Option<String>, avg: &MetricAverage) -> Self {
        Self {
            equipment,
            availability: avg.metrics.availability,
            performance: avg.metrics.performance,
            quality: avg.metrics.quality,
            oee: avg.metrics.oee,
            category: category_label(&avg.metrics),
            active_count: avg.active_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub equipment: Vec<MetricDto>,
    pub fleet_average: AverageDto,
    pub daily_averages: Vec<AverageDto>,
}

impl From<&FleetSummary> for SummaryDto {
    fn from(summary: &FleetSummary) -> Self {
        Self {
            equipment: summary.equipment.iter().map(MetricDto::from).collect(),
            fleet_average: AverageDto::new(None, &summary.fleet_average),
            daily_averages: summary
                .daily_averages
                .iter()
                .map(|(id, avg)| AverageDto::new(Some(id.clone()), avg))
                .collect(),
        }
    }
}

// ==========================================
// ReportDto - 任一阶段的输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportDto {
    Intervals(Vec<MergedIntervalDto>),
    Downtime(Vec<DowntimeDto>),
    Metrics(Vec<MetricDto>),
    Summary(SummaryDto),
}
