// ==========================================
// 设备 OEE 计算系统 - 日界切分器
// ==========================================
// 职责: 将跨越本地零点的区间在第一个零点处切成两段
// 限制: 跨多个零点 (>24h) 的区间只切一次, 第二段仍可能跨日
// ==========================================

use crate::domain::interval::TimeSpan;
use crate::domain::time::next_midnight;

/// 按日界切分单个区间
///
/// 起止落在同一本地日期时原样返回; 否则在起始日之后的
/// 00:00:00 切为 [start, midnight) 与 [midnight, end]。
/// 恰好结束于次日零点的区间属于起始日, 不切分。
pub fn split_at_midnight<T: TimeSpan>(interval: T) -> impl Iterator<Item = T> {
    let start = interval.start_time();
    let end = interval.end_time();
    let midnight = next_midnight(start);

    let (first, second) = if start.date() != end.date() && end > midnight {
        let head = interval.with_bounds(start, midnight);
        let tail = interval.with_bounds(midnight, end);
        (head, Some(tail))
    } else {
        (interval, None)
    };

    std::iter::once(first).chain(second)
}

/// 对整个序列逐个切分并展平
pub fn split_all<T: TimeSpan>(intervals: Vec<T>) -> Vec<T> {
    intervals.into_iter().flat_map(split_at_midnight).collect()
}
