// ==========================================
// 设备 OEE 计算系统 - 停机次数聚合
// ==========================================
// 输入: 已按日界切分的合并区间
// 输出: (设备, 日期, 原因) → 停机次数, 按键首次出现顺序
// 前置: 跨零点区间必须先切分, 否则整段计入起始日
// ==========================================

use crate::domain::interval::{MergedInterval, TimeSpan};
use crate::domain::metrics::{AggregationKey, DowntimeOccurrence};
use std::collections::HashMap;

/// 统计停机次数
pub fn aggregate_downtime(intervals: &[MergedInterval]) -> Vec<DowntimeOccurrence> {
    let mut index: HashMap<AggregationKey, usize> = HashMap::new();
    let mut results: Vec<DowntimeOccurrence> = Vec::new();

    for interval in intervals.iter().filter(|i| i.is_down()) {
        let key = AggregationKey {
            equipment_id: interval.equipment_id.clone(),
            date: interval.start_date(),
            reason: interval.reason.clone(),
        };

        match index.get(&key) {
            Some(&pos) => results[pos].total_occurrence += 1,
            None => {
                index.insert(key, results.len());
                results.push(DowntimeOccurrence {
                    equipment_id: interval.equipment_id.clone(),
                    date: interval.start_date(),
                    reason: interval.reason.clone(),
                    total_occurrence: 1,
                });
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interval::StatusInterval;
    use crate::domain::types::{Displacement, EquipmentStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn merged(
        eq: &str,
        start: &str,
        end: &str,
        status: EquipmentStatus,
        reason: Option<&str>,
    ) -> MergedInterval {
        MergedInterval::from_status(
            StatusInterval::manual(eq, dt(start), dt(end), status, reason.map(str::to_string)),
            Displacement::Full,
        )
    }

    fn count_of(results: &[DowntimeOccurrence], eq: &str, date: &str, reason: Option<&str>) -> usize {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        results
            .iter()
            .find(|r| r.equipment_id == eq && r.date == date && r.reason.as_deref() == reason)
            .map(|r| r.total_occurrence)
            .unwrap_or(0)
    }

    fn sample() -> Vec<MergedInterval> {
        vec![
            merged("1", "2024-01-01 08:00:00", "2024-01-01 09:00:00", EquipmentStatus::Down, Some("Jam")),
            merged("1", "2024-01-01 09:00:00", "2024-01-01 10:00:00", EquipmentStatus::Running, None),
            merged("1", "2024-01-01 10:00:00", "2024-01-01 11:00:00", EquipmentStatus::Down, Some("Jam")),
            merged("1", "2024-01-01 12:00:00", "2024-01-01 13:00:00", EquipmentStatus::Down, Some("Setup")),
            merged("2", "2024-01-01 08:00:00", "2024-01-01 09:00:00", EquipmentStatus::Down, Some("Jam")),
            merged("1", "2024-01-02 00:00:00", "2024-01-02 01:00:00", EquipmentStatus::Down, Some("Jam")),
            merged("1", "2024-01-02 03:00:00", "2024-01-02 04:00:00", EquipmentStatus::Down, None),
        ]
    }

    #[test]
    fn test_counts_per_key() {
        let results = aggregate_downtime(&sample());

        assert_eq!(results.len(), 5);
        assert_eq!(count_of(&results, "1", "2024-01-01", Some("Jam")), 2);
        assert_eq!(count_of(&results, "1", "2024-01-01", Some("Setup")), 1);
        assert_eq!(count_of(&results, "2", "2024-01-01", Some("Jam")), 1);
        assert_eq!(count_of(&results, "1", "2024-01-02", Some("Jam")), 1);
        assert_eq!(count_of(&results, "1", "2024-01-02", None), 1);
    }

    #[test]
    fn test_insertion_order_of_first_occurrence() {
        let results = aggregate_downtime(&sample());
        let keys: Vec<_> = results
            .iter()
            .map(|r| (r.equipment_id.as_str(), r.reason.as_deref()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("1", Some("Jam")),
                ("1", Some("Setup")),
                ("2", Some("Jam")),
                ("1", Some("Jam")),
                ("1", None),
            ]
        );
    }

    #[test]
    fn test_counts_independent_of_input_order() {
        let mut reversed = sample();
        reversed.reverse();

        let forward = aggregate_downtime(&sample());
        let backward = aggregate_downtime(&reversed);

        for occurrence in &forward {
            let other = backward
                .iter()
                .find(|r| r.key() == occurrence.key())
                .expect("缺少聚合键");
            assert_eq!(other.total_occurrence, occurrence.total_occurrence);
        }
        assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn test_no_down_intervals() {
        let intervals = vec![merged(
            "1",
            "2024-01-01 08:00:00",
            "2024-01-01 09:00:00",
            EquipmentStatus::Idle,
            None,
        )];
        assert!(aggregate_downtime(&intervals).is_empty());
    }
}
