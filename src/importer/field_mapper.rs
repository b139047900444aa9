// ==========================================
// 设备 OEE 计算系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 领域记录映射 + 类型转换
// 说明: 列名支持别名（原始日志字段名 / 展示字段名）
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::production::ProductionRecord;
use crate::domain::time::parse_timestamp;
use crate::domain::types::EquipmentStatus;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_importer_trait::{RawRow, RecordMapper};
use chrono::NaiveDateTime;

pub struct FieldMapper;

impl RecordMapper for FieldMapper {
    fn map_status(&self, row: &RawRow, row_number: usize) -> ImportResult<StatusInterval> {
        Ok(StatusInterval::automated(
            self.require_string(row, "equipment_id", row_number)?,
            self.parse_datetime(row, "start_time", row_number)?,
            self.parse_datetime(row, "end_time", row_number)?,
            self.parse_status(row, row_number)?,
        ))
    }

    fn map_manual(&self, row: &RawRow, row_number: usize) -> ImportResult<StatusInterval> {
        Ok(StatusInterval::manual(
            self.require_string(row, "equipment_id", row_number)?,
            self.parse_datetime(row, "start_time", row_number)?,
            self.parse_datetime(row, "end_time", row_number)?,
            self.parse_status(row, row_number)?,
            self.get_string(row, "reason"),
        ))
    }

    fn map_production(&self, row: &RawRow, row_number: usize) -> ImportResult<ProductionRecord> {
        Ok(ProductionRecord {
            equipment_id: self.require_string(row, "equipment_id", row_number)?,

            // 计划
            planned_duration_seconds: self.parse_f64(row, "planned_duration_seconds", row_number)?,
            planned_quantity: self.parse_f64(row, "planned_quantity", row_number)?,

            // 实际
            start_production: self.parse_datetime(row, "start_production", row_number)?,
            finish_production: self.parse_datetime(row, "finish_production", row_number)?,
            actual_quantity: self.parse_f64(row, "actual_quantity", row_number)?,
            defect_quantity: self.parse_f64(row, "defect_quantity", row_number)?,
        })
    }
}

impl FieldMapper {
    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "equipment_id" => &["equipment_id", "Equipment", "equipment"],
            "start_time" => &["start_time", "Start_Time"],
            "end_time" => &["end_time", "End_Time"],
            "status" => &["status", "Status"],
            "reason" => &["reason", "Reason"],
            "planned_duration_seconds" => &[
                "planned_duration_seconds",
                "planned_duration_in_second",
                "planned_duration",
            ],
            "planned_quantity" => &["planned_quantity"],
            "start_production" => &["start_production"],
            "finish_production" => &["finish_production"],
            "actual_quantity" => &["actual_quantity"],
            "defect_quantity" => &["defect_quantity"],
            _ => &[],
        }
    }

    /// 提取字符串字段（空值视为缺失）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        Self::aliases(key).iter().find_map(|alias| {
            row.get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    /// 提取必填字符串字段
    fn require_string(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    /// 解析浮点数（必填）
    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<f64> {
        let value = self.require_string(row, key, row_number)?;
        value
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为数值: {}", value),
            })
    }

    /// 解析日期时间（必填）
    fn parse_datetime(
        &self,
        row: &RawRow,
        key: &str,
        row_number: usize,
    ) -> ImportResult<NaiveDateTime> {
        let value = self.require_string(row, key, row_number)?;
        parse_timestamp(&value).map_err(|e| ImportError::timestamp(row_number, key, e))
    }

    /// 解析设备状态
    fn parse_status(&self, row: &RawRow, row_number: usize) -> ImportResult<EquipmentStatus> {
        let value = self.require_string(row, "status", row_number)?;
        EquipmentStatus::parse(&value).ok_or(ImportError::UnknownStatus {
            row: row_number,
            value,
        })
    }
}
