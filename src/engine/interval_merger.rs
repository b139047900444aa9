// ==========================================
// 设备 OEE 计算系统 - 区间合并引擎
// ==========================================
// 职责: 合并自动采集区间与人工录入区间
// 输入: 单设备自动区间序列 A + 人工区间序列 M
// 输出: 无重叠、按开始时间排序的合并序列
// 红线: 人工区间优先; 每条人工区间生成新的工作集, 不原地修改
// ==========================================

use crate::domain::interval::{compare_equipment_ids, MergedInterval, StatusInterval, TimeSpan};
use crate::domain::types::{DataSource, Displacement};
use std::collections::HashMap;
use tracing::debug;

/// 自动区间默认原因
pub const DEFAULT_AUTOMATED_REASON: &str = "Status Down";

// ==========================================
// IntervalMerger - 区间合并引擎
// ==========================================
pub struct IntervalMerger {
    automated_reason: String,
}

impl Default for IntervalMerger {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOMATED_REASON)
    }
}

impl IntervalMerger {
    /// 构造函数
    ///
    /// # 参数
    /// - `automated_reason`: 自动区间统一标记的原因
    pub fn new(automated_reason: impl Into<String>) -> Self {
        Self {
            automated_reason: automated_reason.into(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 合并单台设备的自动区间与人工区间
    ///
    /// 人工区间按输入顺序逐条应用: 与之重叠的工作集区间只保留
    /// 人工区间之前/之后的部分, 然后追加人工区间本身。后一条人工
    /// 区间会作用在前一条已修改过的工作集上（含前一条人工区间）,
    /// 因此结果依赖人工输入顺序。
    ///
    /// 端点相接 (m.end == s.start 或 m.start == s.end) 不算重叠。
    /// 零时长人工区间仍可切开包含它的区间, 但自身不进入结果。
    ///
    /// # 参数
    /// - `automated`: 自动采集区间（零/负时长的会被丢弃）
    /// - `manual`: 人工录入区间（负时长的会被丢弃）
    ///
    /// # 返回
    /// 按开始时间排序的合并区间
    pub fn merge_equipment(
        &self,
        automated: Vec<StatusInterval>,
        manual: Vec<StatusInterval>,
    ) -> Vec<MergedInterval> {
        let mut working: Vec<MergedInterval> = automated
            .into_iter()
            .filter(|s| s.is_proper())
            .map(|s| {
                let tagged = StatusInterval {
                    reason: Some(self.automated_reason.clone()),
                    source: DataSource::Automated,
                    ..s
                };
                MergedInterval::from_status(tagged, Displacement::None)
            })
            .collect();

        for m in manual {
            if m.end_time < m.start_time {
                debug!(
                    equipment_id = %m.equipment_id,
                    start = %m.start_time,
                    end = %m.end_time,
                    "丢弃负时长人工区间"
                );
                continue;
            }
            working = Self::apply_override(working, m);
        }

        working.sort_by_key(|s| s.start_time);
        working
    }

    /// 合并全部设备
    ///
    /// 按设备分组（先自动后人工的首次出现顺序）, 分别合并,
    /// 结果按 (设备ID, 开始时间) 排序。
    pub fn merge_all(
        &self,
        automated: Vec<StatusInterval>,
        manual: Vec<StatusInterval>,
    ) -> Vec<MergedInterval> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, (Vec<StatusInterval>, Vec<StatusInterval>)> =
            HashMap::new();

        for s in automated {
            if !groups.contains_key(&s.equipment_id) {
                order.push(s.equipment_id.clone());
            }
            groups.entry(s.equipment_id.clone()).or_default().0.push(s);
        }
        for m in manual {
            if !groups.contains_key(&m.equipment_id) {
                order.push(m.equipment_id.clone());
            }
            groups.entry(m.equipment_id.clone()).or_default().1.push(m);
        }

        let mut merged = Vec::new();
        for equipment_id in order {
            let Some((auto_group, manual_group)) = groups.remove(&equipment_id) else {
                continue;
            };
            let (auto_len, manual_len) = (auto_group.len(), manual_group.len());
            let result = self.merge_equipment(auto_group, manual_group);
            debug!(
                equipment_id = %equipment_id,
                automated = auto_len,
                manual = manual_len,
                merged = result.len(),
                "设备区间合并完成"
            );
            merged.extend(result);
        }

        merged.sort_by(|a, b| {
            compare_equipment_ids(&a.equipment_id, &b.equipment_id)
                .then(a.start_time.cmp(&b.start_time))
        });
        merged
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 将一条人工区间作用于工作集, 返回新的工作集
    fn apply_override(working: Vec<MergedInterval>, m: StatusInterval) -> Vec<MergedInterval> {
        let mut next = Vec::with_capacity(working.len() + 2);

        for s in working {
            let disjoint = m.end_time <= s.start_time || m.start_time >= s.end_time;
            if disjoint {
                next.push(s);
                continue;
            }

            // 被切后的自动区间标记为部分覆盖; 人工区间保持原标记
            let displacement = match s.source {
                DataSource::Automated => Displacement::Partial,
                DataSource::Manual => s.displacement,
            };

            if s.start_time < m.start_time {
                let mut prefix = s.with_bounds(s.start_time, m.start_time);
                prefix.displacement = displacement;
                next.push(prefix);
            }
            if s.end_time > m.end_time {
                let mut suffix = s.with_bounds(m.end_time, s.end_time);
                suffix.displacement = displacement;
                next.push(suffix);
            }
        }

        if m.is_proper() {
            next.push(MergedInterval::from_status(
                StatusInterval {
                    source: DataSource::Manual,
                    ..m
                },
                Displacement::Full,
            ));
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EquipmentStatus;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2024-01-01 {}", s), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn auto(eq: &str, start: &str, end: &str, status: EquipmentStatus) -> StatusInterval {
        StatusInterval::automated(eq, dt(start), dt(end), status)
    }

    fn manual(eq: &str, start: &str, end: &str, reason: &str) -> StatusInterval {
        StatusInterval::manual(
            eq,
            dt(start),
            dt(end),
            EquipmentStatus::Down,
            Some(reason.to_string()),
        )
    }

    fn total_secs(intervals: &[MergedInterval]) -> f64 {
        intervals.iter().map(|i| i.duration_secs()).sum()
    }

    fn assert_no_overlap(intervals: &[MergedInterval]) {
        for (i, a) in intervals.iter().enumerate() {
            for b in intervals.iter().skip(i + 1) {
                if a.equipment_id != b.equipment_id {
                    continue;
                }
                assert!(
                    a.end_time <= b.start_time || b.end_time <= a.start_time,
                    "区间重叠: {:?} / {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_manual_inside_automated_splits_into_three() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "12:00:00", EquipmentStatus::Running)],
            vec![manual("1", "10:00:00", "10:30:00", "Jam")],
        );

        assert_eq!(merged.len(), 3);

        assert_eq!(merged[0].status, EquipmentStatus::Running);
        assert_eq!((merged[0].start_time, merged[0].end_time), (dt("08:00:00"), dt("10:00:00")));
        assert_eq!(merged[0].displacement, Displacement::Partial);
        assert_eq!(merged[0].reason.as_deref(), Some(DEFAULT_AUTOMATED_REASON));

        assert_eq!(merged[1].status, EquipmentStatus::Down);
        assert_eq!(merged[1].source, DataSource::Manual);
        assert_eq!(merged[1].reason.as_deref(), Some("Jam"));
        assert_eq!((merged[1].start_time, merged[1].end_time), (dt("10:00:00"), dt("10:30:00")));
        assert_eq!(merged[1].displacement, Displacement::Full);

        assert_eq!(merged[2].status, EquipmentStatus::Running);
        assert_eq!((merged[2].start_time, merged[2].end_time), (dt("10:30:00"), dt("12:00:00")));

        assert_eq!(total_secs(&merged), 4.0 * 3600.0);
    }

    #[test]
    fn test_untouched_automated_keeps_displacement_none() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![
                auto("1", "08:00:00", "09:00:00", EquipmentStatus::Running),
                auto("1", "09:00:00", "10:00:00", EquipmentStatus::Idle),
            ],
            vec![],
        );
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|m| m.displacement == Displacement::None));
        assert!(merged.iter().all(|m| m.source == DataSource::Automated));
    }

    #[test]
    fn test_boundary_touch_is_not_overlap() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "10:00:00", EquipmentStatus::Running)],
            vec![manual("1", "10:00:00", "11:00:00", "After")],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].displacement, Displacement::None);
        assert_eq!(merged[0].end_time, dt("10:00:00"));
        // 人工区间超出自动覆盖, 总时长增加超出部分
        assert_eq!(total_secs(&merged), 3.0 * 3600.0);
    }

    #[test]
    fn test_manual_spanning_multiple_automated() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![
                auto("1", "08:00:00", "09:00:00", EquipmentStatus::Running),
                auto("1", "09:00:00", "10:00:00", EquipmentStatus::Idle),
                auto("1", "10:00:00", "11:00:00", EquipmentStatus::Running),
            ],
            vec![manual("1", "08:30:00", "10:30:00", "Changeover")],
        );

        let spans: Vec<_> = merged.iter().map(|m| (m.start_time, m.end_time)).collect();
        assert_eq!(
            spans,
            vec![
                (dt("08:00:00"), dt("08:30:00")),
                (dt("08:30:00"), dt("10:30:00")),
                (dt("10:30:00"), dt("11:00:00")),
            ]
        );
        assert_eq!(total_secs(&merged), 3.0 * 3600.0);
        assert_no_overlap(&merged);
    }

    #[test]
    fn test_manual_extending_outside_coverage_adds_excess() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "10:00:00", EquipmentStatus::Running)],
            vec![manual("1", "09:00:00", "11:30:00", "Breakdown")],
        );

        assert_eq!(merged.len(), 2);
        // 自动 2h + 超出 1.5h
        assert_eq!(total_secs(&merged), 3.5 * 3600.0);
        assert_no_overlap(&merged);
    }

    #[test]
    fn test_overlapping_manuals_compound_in_input_order() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "12:00:00", EquipmentStatus::Running)],
            vec![
                manual("1", "09:00:00", "11:00:00", "First"),
                manual("1", "10:00:00", "10:30:00", "Second"),
            ],
        );

        let labels: Vec<_> = merged
            .iter()
            .map(|m| (m.start_time, m.end_time, m.reason.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (dt("08:00:00"), dt("09:00:00"), DEFAULT_AUTOMATED_REASON.to_string()),
                (dt("09:00:00"), dt("10:00:00"), "First".to_string()),
                (dt("10:00:00"), dt("10:30:00"), "Second".to_string()),
                (dt("10:30:00"), dt("11:00:00"), "First".to_string()),
                (dt("11:00:00"), dt("12:00:00"), DEFAULT_AUTOMATED_REASON.to_string()),
            ]
        );
        // 被后一条人工切开的人工片段仍是 Full
        assert_eq!(merged[1].displacement, Displacement::Full);
        assert_no_overlap(&merged);
    }

    #[test]
    fn test_reversed_manual_order_changes_result() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "12:00:00", EquipmentStatus::Running)],
            vec![
                manual("1", "10:00:00", "10:30:00", "Second"),
                manual("1", "09:00:00", "11:00:00", "First"),
            ],
        );

        // 后应用的大区间完全吞掉先前的小区间
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].reason.as_deref(), Some("First"));
        assert_eq!((merged[1].start_time, merged[1].end_time), (dt("09:00:00"), dt("11:00:00")));
    }

    #[test]
    fn test_zero_duration_manual_splits_without_being_emitted() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![auto("1", "08:00:00", "12:00:00", EquipmentStatus::Running)],
            vec![manual("1", "10:00:00", "10:00:00", "Blip")],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].end_time, dt("10:00:00"));
        assert_eq!(merged[1].start_time, dt("10:00:00"));
        assert!(merged.iter().all(|m| m.source == DataSource::Automated));
        assert_eq!(total_secs(&merged), 4.0 * 3600.0);
    }

    #[test]
    fn test_zero_duration_automated_is_dropped() {
        let merger = IntervalMerger::default();
        let merged = merger.merge_equipment(
            vec![
                auto("1", "08:00:00", "08:00:00", EquipmentStatus::Running),
                auto("1", "09:00:00", "10:00:00", EquipmentStatus::Running),
            ],
            vec![],
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_all_groups_by_equipment() {
        let merger = IntervalMerger::new("Auto");
        let merged = merger.merge_all(
            vec![
                auto("10", "08:00:00", "12:00:00", EquipmentStatus::Running),
                auto("2", "08:00:00", "12:00:00", EquipmentStatus::Running),
            ],
            vec![
                // 设备 2 的人工区间不影响设备 10
                manual("2", "09:00:00", "10:00:00", "Jam"),
                // 仅有人工记录的设备
                manual("3", "09:00:00", "10:00:00", "Setup"),
            ],
        );

        let ids: Vec<_> = merged.iter().map(|m| m.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "2", "2", "3", "10"]);
        assert_eq!(merged[4].displacement, Displacement::None);
        assert_eq!(merged[4].reason.as_deref(), Some("Auto"));
        assert_no_overlap(&merged);
    }

    #[test]
    fn test_merge_all_with_mixed_numeric_and_text_ids() {
        let ids = ["9", "1a", "100", "2", "10", "1b", "11", "EQ-7", "3x", "0"];
        // 每台设备多段区间, 乱序输入
        let automated: Vec<StatusInterval> = ["08:00:00", "10:00:00", "09:00:00"]
            .iter()
            .flat_map(|start| {
                let end = format!("{}:30:00", &start[..2]);
                ids.iter().map(move |id| {
                    StatusInterval::automated(*id, dt(start), dt(&end), EquipmentStatus::Running)
                })
            })
            .collect();

        let merged = IntervalMerger::default().merge_all(automated, vec![]);
        assert_eq!(merged.len(), ids.len() * 3);

        let mut order: Vec<&str> = merged.iter().map(|m| m.equipment_id.as_str()).collect();
        order.dedup();
        assert_eq!(order, vec!["0", "2", "9", "10", "11", "100", "1a", "1b", "3x", "EQ-7"]);

        // 同一设备内按开始时间排序
        for pair in merged.windows(2) {
            if pair[0].equipment_id == pair[1].equipment_id {
                assert!(pair[0].start_time < pair[1].start_time);
            }
        }
    }
}
