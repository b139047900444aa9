// ==========================================
// 设备 OEE 计算系统 - 指标与聚合结果
// ==========================================

use crate::domain::types::OeeCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MetricResult - OEE 指标
// ==========================================
// performance / oee 上限 1; quality 允许为负（不良数 > 产量时）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub category: Option<OeeCategory>,
}

impl MetricResult {
    /// 全零指标（无生产）
    pub fn zero() -> Self {
        Self {
            availability: 0.0,
            performance: 0.0,
            quality: 0.0,
            oee: 0.0,
            category: OeeCategory::from_oee(0.0),
        }
    }

    /// 是否有生产活动
    ///
    /// 三项指标任一非零即视为活跃；平均值只统计活跃项。
    pub fn is_active(&self) -> bool {
        self.availability != 0.0 || self.performance != 0.0 || self.quality != 0.0
    }
}

// ==========================================
// EquipmentMetrics - 单设备指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentMetrics {
    pub equipment_id: String,
    pub metrics: MetricResult,
}

// ==========================================
// DailyMetrics - 单设备单日指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub equipment_id: String,
    pub date: NaiveDate,
    pub metrics: MetricResult,
}

// ==========================================
// MetricAverage - 平均指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricAverage {
    pub metrics: MetricResult,
    pub active_count: usize, // 参与平均的活跃项数
}

// ==========================================
// 停机聚合
// ==========================================

/// 聚合键: (设备, 日期, 原因)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub equipment_id: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// 停机次数统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeOccurrence {
    pub equipment_id: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub total_occurrence: usize,
}

impl DowntimeOccurrence {
    pub fn key(&self) -> AggregationKey {
        AggregationKey {
            equipment_id: self.equipment_id.clone(),
            date: self.date,
            reason: self.reason.clone(),
        }
    }
}
