// ==========================================
// 设备 OEE 计算系统 - 时间工具
// ==========================================
// 职责: 时间戳解析、展示格式化、区间重叠计算、本地日界
// 约定: 内部统一使用本地时间 NaiveDateTime
// ==========================================

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// 展示格式: YYYY/MM/DD HH:MM:SS
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// 日期格式: YYYY-MM-DD（停机聚合键）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// 可接受的本地时间格式（不含时区）
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 时间格式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("无效的时间格式: {0}")]
    InvalidTimestamp(String),
}

/// 解析时间戳为本地时间
///
/// 带时区的 RFC 3339 字符串会换算为本地时间；
/// 其余格式按本地墙钟时间直接解析。
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimeFormatError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimeFormatError::InvalidTimestamp(value.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimeFormatError::InvalidTimestamp(value.to_string()))
}

/// 格式化为展示字符串
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// 将原始时间字符串格式化为展示字符串
///
/// 无法解析时返回错误，不输出残缺字符串。
pub fn format_display_time(raw: &str) -> Result<String, TimeFormatError> {
    parse_timestamp(raw).map(|ts| format_timestamp(&ts))
}

/// 格式化日期 (YYYY-MM-DD)
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 区间时长（秒，保留毫秒精度）
pub fn duration_secs(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// 两个区间的重叠时长（秒）
///
/// overlap = max(0, min(ends) - max(starts))
pub fn overlap_secs(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> f64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end <= start {
        return 0.0;
    }
    duration_secs(start, end)
}

// ==========================================
// DateRange - 日期范围（闭区间, 两端可缺省）
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// 不限日期
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// 给定时刻之后的第一个本地零点
pub fn next_midnight(ts: NaiveDateTime) -> NaiveDateTime {
    let next_day = ts.date() + Duration::days(1);
    next_day.and_time(chrono::NaiveTime::MIN)
}
