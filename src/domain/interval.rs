// ==========================================
// 设备 OEE 计算系统 - 状态区间领域模型
// ==========================================
// 职责: 定义半开时间区间 [start, end) 及其标签
// 红线: 区间创建后不原地修改，切分/合并一律产生新区间
// ==========================================

use crate::domain::time::duration_secs;
use crate::domain::types::{DataSource, Displacement, EquipmentStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// Trait: TimeSpan
// ==========================================
// 用途: 合并器/日切分器/聚合器共用的区间接口
pub trait TimeSpan: Sized {
    fn equipment_id(&self) -> &str;

    fn start_time(&self) -> NaiveDateTime;

    fn end_time(&self) -> NaiveDateTime;

    /// 复制其余字段，替换起止时间
    fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self;

    /// 区间时长（秒）
    fn duration_secs(&self) -> f64 {
        duration_secs(self.start_time(), self.end_time())
    }

    /// 起始时刻的本地日期
    fn start_date(&self) -> NaiveDate {
        self.start_time().date()
    }

    /// 非空区间 (start < end)
    fn is_proper(&self) -> bool {
        self.start_time() < self.end_time()
    }
}

/// 携带设备状态的区间
pub trait StatusLabeled {
    fn status(&self) -> EquipmentStatus;
}

// ==========================================
// StatusInterval - 状态区间
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInterval {
    pub equipment_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: EquipmentStatus,
    pub reason: Option<String>,
    pub source: DataSource,
}

impl StatusInterval {
    /// 创建自动采集区间（无原因）
    pub fn automated(
        equipment_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        status: EquipmentStatus,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            start_time,
            end_time,
            status,
            reason: None,
            source: DataSource::Automated,
        }
    }

    /// 创建人工录入区间
    pub fn manual(
        equipment_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        status: EquipmentStatus,
        reason: Option<String>,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            start_time,
            end_time,
            status,
            reason,
            source: DataSource::Manual,
        }
    }
}

impl TimeSpan for StatusInterval {
    fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_time: start,
            end_time: end,
            ..self.clone()
        }
    }
}

impl StatusLabeled for StatusInterval {
    fn status(&self) -> EquipmentStatus {
        self.status
    }
}

// ==========================================
// MergedInterval - 合并后区间
// ==========================================
// 与 StatusInterval 同形，附加覆盖程度标记
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedInterval {
    pub equipment_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: EquipmentStatus,
    pub reason: Option<String>,
    pub source: DataSource,
    pub displacement: Displacement,
}

impl MergedInterval {
    /// 由状态区间构造
    pub fn from_status(interval: StatusInterval, displacement: Displacement) -> Self {
        Self {
            equipment_id: interval.equipment_id,
            start_time: interval.start_time,
            end_time: interval.end_time,
            status: interval.status,
            reason: interval.reason,
            source: interval.source,
            displacement,
        }
    }

    pub fn is_down(&self) -> bool {
        self.status == EquipmentStatus::Down
    }
}

impl TimeSpan for MergedInterval {
    fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_time: start,
            end_time: end,
            ..self.clone()
        }
    }
}

impl StatusLabeled for MergedInterval {
    fn status(&self) -> EquipmentStatus {
        self.status
    }
}

/// 设备ID排序
///
/// 整数ID在前并按数值排序，其余ID在后按字典序；
/// 数值相同的ID（如 "7" 与 " 7"）再按原字符串区分，保证全序。
pub fn compare_equipment_ids(a: &str, b: &str) -> Ordering {
    equipment_sort_key(a).cmp(&equipment_sort_key(b))
}

fn equipment_sort_key(id: &str) -> (bool, i64, &str) {
    match id.trim().parse::<i64>() {
        Ok(n) => (false, n, id),
        Err(_) => (true, 0, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_with_bounds_keeps_labels() {
        let interval = StatusInterval::manual(
            "7",
            dt("2024-01-01 08:00:00"),
            dt("2024-01-01 12:00:00"),
            EquipmentStatus::Down,
            Some("Maintenance".to_string()),
        );

        let trimmed = interval.with_bounds(dt("2024-01-01 09:00:00"), dt("2024-01-01 10:00:00"));
        assert_eq!(trimmed.equipment_id, "7");
        assert_eq!(trimmed.status, EquipmentStatus::Down);
        assert_eq!(trimmed.reason.as_deref(), Some("Maintenance"));
        assert_eq!(trimmed.source, DataSource::Manual);
        assert_eq!(trimmed.duration_secs(), 3600.0);
        // 原区间不受影响
        assert_eq!(interval.start_time, dt("2024-01-01 08:00:00"));
    }

    #[test]
    fn test_compare_equipment_ids() {
        assert_eq!(compare_equipment_ids("2", "10"), Ordering::Less);
        assert_eq!(compare_equipment_ids("10", "10"), Ordering::Equal);
        assert_eq!(compare_equipment_ids("EQ-B", "EQ-A"), Ordering::Greater);
        // 整数ID排在非整数ID之前
        assert_eq!(compare_equipment_ids("100", "1a"), Ordering::Less);
        assert_eq!(compare_equipment_ids("1a", "9"), Ordering::Greater);
    }

    #[test]
    fn test_mixed_equipment_ids_sort_totally() {
        let mut ids: Vec<String> = (0..60)
            .rev()
            .flat_map(|n| [n.to_string(), format!("{}x", n), format!("EQ-{}", n % 7)])
            .collect();
        ids.sort_by(|a, b| compare_equipment_ids(a, b));

        let split = ids.iter().position(|id| id.parse::<i64>().is_err()).unwrap();
        let numeric: Vec<i64> = ids[..split].iter().map(|id| id.parse().unwrap()).collect();
        assert_eq!(numeric, (0..60).collect::<Vec<i64>>());

        // 非整数部分按字典序, 且其后不再出现整数ID
        let rest = &ids[split..];
        assert!(rest.iter().all(|id| id.parse::<i64>().is_err()));
        assert!(rest.windows(2).all(|w| w[0] <= w[1]));

        // 与相邻比较结果一致 (全序)
        for w in ids.windows(2) {
            assert_ne!(compare_equipment_ids(&w[0], &w[1]), Ordering::Greater);
        }
    }
}
