// ==========================================
// 设备 OEE 计算系统 - 生产记录领域模型
// ==========================================
// 约定: actual_quantity >= defect_quantity 由调用方保证，此处不校验
// ==========================================

use crate::domain::time::duration_secs;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub equipment_id: String,

    // ===== 计划 =====
    pub planned_duration_seconds: f64, // 计划时长 (秒)
    pub planned_quantity: f64,         // 计划数量

    // ===== 实际 =====
    pub start_production: NaiveDateTime,
    pub finish_production: NaiveDateTime,
    pub actual_quantity: f64, // 实际产量
    pub defect_quantity: f64, // 不良数量
}

impl ProductionRecord {
    /// 实际生产时长（秒）
    pub fn actual_duration_secs(&self) -> f64 {
        duration_secs(self.start_production, self.finish_production)
    }

    /// 开始生产的本地日期（日报归属日）
    pub fn production_date(&self) -> NaiveDate {
        self.start_production.date()
    }
}
