// ==========================================
// 船舶航次排期系统 - 占用矩阵领域模型
// ==========================================
// 用途: 船舶 × 日期 占用矩阵, 时间段标签, 冲突簇
// 红线: 全部为派生数据, 每次请求重新计算, 不持久化
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 一天的最后一分钟 (开放区间的默认终点)
pub const LAST_MINUTE_OF_DAY: u16 = 24 * 60 - 1;

/// 日期桶: 无时间分量的公历日期
pub type DayBucket = NaiveDate;

// ==========================================
// MinuteRange - 分钟区间 [start, end)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinuteRange {
    pub start: u16, // 起始分钟 (含)
    pub end: u16,   // 结束分钟 (不含)
}

impl MinuteRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// 半开区间重叠判定
    ///
    /// 仅端点相接（一方结束即另一方开始）不算重叠。
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ==========================================
// TimeRangeLabel - 时间段标签
// ==========================================
// 文本格式:
// - "HH:MM-HH:MM" 同日靠港
// - "HH:MM-"      跨夜靠港的到港日半段
// - "-HH:MM"      跨夜靠港的离港日半段
// - "HH:MM"       仅到港 (航次终点)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TimeRangeLabel {
    Closed { start: u16, end: u16 },
    OpenEnded { start: u16 },
    OpenStarted { end: u16 },
    Point { at: u16 },
}

impl TimeRangeLabel {
    /// 转换为分钟区间
    ///
    /// 单点标签视为 1 分钟区间 [m, m+1)，保证仅到港事件也能参与重叠检测。
    pub fn minute_range(&self) -> MinuteRange {
        match *self {
            TimeRangeLabel::Closed { start, end } => MinuteRange::new(start, end),
            TimeRangeLabel::OpenEnded { start } => MinuteRange::new(start, LAST_MINUTE_OF_DAY),
            TimeRangeLabel::OpenStarted { end } => MinuteRange::new(0, end),
            TimeRangeLabel::Point { at } => MinuteRange::new(at, at + 1),
        }
    }
}

fn write_hhmm(f: &mut fmt::Formatter<'_>, minute: u16) -> fmt::Result {
    write!(f, "{:02}:{:02}", minute / 60, minute % 60)
}

impl fmt::Display for TimeRangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeRangeLabel::Closed { start, end } => {
                write_hhmm(f, start)?;
                f.write_str("-")?;
                write_hhmm(f, end)
            }
            TimeRangeLabel::OpenEnded { start } => {
                write_hhmm(f, start)?;
                f.write_str("-")
            }
            TimeRangeLabel::OpenStarted { end } => {
                f.write_str("-")?;
                write_hhmm(f, end)
            }
            TimeRangeLabel::Point { at } => write_hhmm(f, at),
        }
    }
}

/// 时间段标签解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelParseError {
    #[error("时间格式错误: '{0}'（期望 HH:MM）")]
    InvalidClock(String),

    #[error("时间段标签为空区间: '{0}'")]
    EmptyRange(String),
}

/// 解析 "HH:MM" 为当日分钟数
fn parse_hhmm(raw: &str) -> Result<u16, LabelParseError> {
    let invalid = || LabelParseError::InvalidClock(raw.to_string());
    let (h, m) = raw.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hour: u16 = h.parse().map_err(|_| invalid())?;
    let minute: u16 = m.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

impl FromStr for TimeRangeLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((start, end)) = s.split_once('-') else {
            return Ok(TimeRangeLabel::Point { at: parse_hhmm(s)? });
        };

        match (start.trim().is_empty(), end.trim().is_empty()) {
            (true, true) => Err(LabelParseError::EmptyRange(s.to_string())),
            (true, false) => Ok(TimeRangeLabel::OpenStarted { end: parse_hhmm(end)? }),
            (false, true) => Ok(TimeRangeLabel::OpenEnded { start: parse_hhmm(start)? }),
            (false, false) => Ok(TimeRangeLabel::Closed {
                start: parse_hhmm(start)?,
                end: parse_hhmm(end)?,
            }),
        }
    }
}

impl From<TimeRangeLabel> for String {
    fn from(label: TimeRangeLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for TimeRangeLabel {
    type Error = LabelParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ==========================================
// OccupancyEntry - 占用条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub port: String,               // 港口
    pub time_range: TimeRangeLabel, // 时间段标签
}

/// 占用矩阵: 船名 → 日期 → 占用条目列表（插入顺序）
pub type OccupancyMatrix = BTreeMap<String, BTreeMap<DayBucket, Vec<OccupancyEntry>>>;

// ==========================================
// MatrixBuildResult - 矩阵构建结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixBuildResult {
    pub matrix: OccupancyMatrix,      // 占用矩阵
    pub day_headers: Vec<DayBucket>,  // 连续日期表头 (含首尾, 无间断)
}

// ==========================================
// ConflictCluster - 冲突簇
// ==========================================
// 同一港口同一天内时间段直接或传递重叠的最大集合
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictCluster {
    pub date: DayBucket,                   // 日期
    pub port: String,                      // 港口
    pub ships: Vec<String>,                // 船名 (字典序)
    pub time_ranges: Vec<TimeRangeLabel>,  // 与 ships 平行的时间段
}
