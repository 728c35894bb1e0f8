// ==========================================
// 船舶航次排期系统 - 时间键归一化
// ==========================================
// 职责: 时间戳 → 日期桶 / 当日分钟; 时间段标签 → 分钟区间
// 红线: 时间戳一律按本地民用时间 (naive) 解释, 不做时区换算
// ==========================================

use crate::domain::matrix::{DayBucket, LabelParseError, MinuteRange, TimeRangeLabel};
use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// 线上时间戳格式 (前 16 个字符)
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 时间键错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeKeyError {
    #[error("时间戳格式错误: '{0}'（期望 YYYY-MM-DD HH:MM）")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Label(#[from] LabelParseError),
}

/// 解析线上时间戳
///
/// 接受 `YYYY-MM-DD HH:MM` 与 `YYYY-MM-DDTHH:MM`，之后的秒与时区后缀被忽略，
/// 与上游存储的"墙上时间"语义一致。
pub fn parse_wire_timestamp(raw: &str) -> Result<NaiveDateTime, TimeKeyError> {
    let invalid = || TimeKeyError::InvalidTimestamp(raw.to_string());
    let trimmed = raw.trim();

    let head = trimmed.get(..16).ok_or_else(invalid)?;
    let date_part = head.get(..10).ok_or_else(invalid)?;
    let rest = head.get(10..).ok_or_else(invalid)?;
    let time_part = rest
        .strip_prefix('T')
        .or_else(|| rest.strip_prefix(' '))
        .ok_or_else(invalid)?;

    NaiveDateTime::parse_from_str(&format!("{} {}", date_part, time_part), WIRE_TIMESTAMP_FORMAT)
        .map_err(|_| invalid())
}

/// 时间戳截断为日期桶
pub fn day_key(ts: NaiveDateTime) -> DayBucket {
    ts.date()
}

/// 当日分钟数 [0, 1439]
pub fn minute_of_day(ts: NaiveDateTime) -> u16 {
    (ts.hour() * 60 + ts.minute()) as u16
}

/// 解析时间段标签为分钟区间
pub fn parse_time_range_label(label: &str) -> Result<MinuteRange, LabelParseError> {
    label.parse::<TimeRangeLabel>().map(|l| l.minute_range())
}
