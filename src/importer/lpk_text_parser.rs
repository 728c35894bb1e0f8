// ==========================================
// 船舶航次排期系统 - 实际航行报告解析 (LPK)
// ==========================================
// 输入: 从表格复制的 TAB 分隔文本, 每行一段航行, 至少 14 列
// 列定义 (下标从 0 开始):
//   0 起运港 | 1 目的港 | 2-3 离港日期/时间 | 4-5 到港日期/时间
//   6-9 锚泊开始日期/时间、结束日期/时间 (四列同时非空才有效)
//   11 天数指示 | 12 时长 HH:MM | 13 航程
// 锚泊总分钟 = HH*60 + MM, 天数指示 > 30 时追加 (天数 - 30) * 1440
// ==========================================

use crate::domain::passage::NewActualPassage;
use crate::importer::datetime_parser::parse_date_and_time;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 每行最少列数
pub const LPK_MIN_COLUMNS: usize = 14;

const MINUTES_PER_DAY: i64 = 1440;
const DAY_INDICATOR_BASE: i64 = 30;

// ==========================================
// LpkParseOutcome - 批量解析结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LpkParseOutcome {
    pub passages: Vec<NewActualPassage>, // 成功解析的航行记录
    pub bad_lines: Vec<usize>,           // 解析失败的行号 (从 1 开始)
}

/// 解析整段 LPK 文本
///
/// 单行失败只记录行号, 不中断整批
pub fn parse_lpk_text(text: &str) -> LpkParseOutcome {
    let mut outcome = LpkParseOutcome::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
        match parse_columns(&columns) {
            Some(passage) => outcome.passages.push(passage),
            None => {
                warn!(line_no = idx + 1, columns = columns.len(), "LPK 行解析失败");
                outcome.bad_lines.push(idx + 1);
            }
        }
    }

    outcome
}

fn parse_columns(columns: &[&str]) -> Option<NewActualPassage> {
    if columns.len() < LPK_MIN_COLUMNS {
        return None;
    }

    let from_port = columns[0];
    let to_port = columns[1];
    if from_port.is_empty() || to_port.is_empty() {
        return None;
    }

    let departed_at = parse_date_and_time(columns[2], columns[3])?;
    let arrived_at = parse_date_and_time(columns[4], columns[5])?;

    let (anchorage_start, anchorage_end) = if columns[6..10].iter().all(|c| !c.is_empty()) {
        (
            Some(parse_date_and_time(columns[6], columns[7])?),
            Some(parse_date_and_time(columns[8], columns[9])?),
        )
    } else {
        (None, None)
    };

    Some(NewActualPassage {
        from_port: from_port.to_string(),
        to_port: to_port.to_string(),
        departed_at,
        arrived_at,
        anchorage_start,
        anchorage_end,
        anchorage_minutes: anchorage_total_minutes(columns[11], columns[12]),
        distance_nm: lenient_int(columns[13]),
    })
}

/// 锚泊总分钟数
pub fn anchorage_total_minutes(day_indicator: &str, time: &str) -> i64 {
    let time_minutes = time
        .split_once(':')
        .map(|(h, m)| lenient_int(h).saturating_mul(60).saturating_add(lenient_int(m)))
        .unwrap_or(0);

    let day_value = lenient_int(day_indicator);
    let day_offset = if day_value > DAY_INDICATOR_BASE {
        (day_value - DAY_INDICATOR_BASE).saturating_mul(MINUTES_PER_DAY)
    } else {
        0
    };

    // 异常大的粘贴值饱和到 i64 上限, 不溢出
    day_offset.saturating_add(time_minutes)
}

/// 宽松整数解析: 取前导数字, 忽略千分位逗号, 无数字时为 0
fn lenient_int(raw: &str) -> i64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, cleaned.as_str()),
    };
    let leading: String = digits.chars().take_while(char::is_ascii_digit).collect();
    leading.parse::<i64>().map(|v| sign * v).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cols: &[&str]) -> String {
        cols.join("\t")
    }

    #[test]
    fn test_parse_full_row_with_anchorage() {
        let line = row(&[
            "TANJUNG PRIOK", "SURABAYA", "30-Dec-24", "14:00", "31-Dec-24", "11:30",
            "31-Dec-24", "09:00", "31-Dec-24", "10:30", "", "31", "01:30", "398", "x",
        ]);
        let outcome = parse_lpk_text(&line);

        assert!(outcome.bad_lines.is_empty());
        assert_eq!(outcome.passages.len(), 1);
        let p = &outcome.passages[0];
        assert_eq!(p.from_port, "TANJUNG PRIOK");
        assert_eq!(p.to_port, "SURABAYA");
        assert_eq!(
            p.departed_at,
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap().and_hms_opt(14, 0, 0).unwrap()
        );
        assert!(p.anchorage_start.is_some());
        assert_eq!(p.anchorage_minutes, 1440 + 90);
        assert_eq!(p.distance_nm, 398);
    }

    #[test]
    fn test_parse_row_without_anchorage() {
        let line = row(&[
            "SURABAYA", "MAKASSAR", "31-Dec-24", "17:00", "2-Jan-25", "03:00",
            "", "", "", "", "", "0", "00:00", "1,120",
        ]);
        let outcome = parse_lpk_text(&line);

        assert_eq!(outcome.passages.len(), 1);
        assert_eq!(outcome.passages[0].anchorage_start, None);
        assert_eq!(outcome.passages[0].anchorage_minutes, 0);
        assert_eq!(outcome.passages[0].distance_nm, 1120);
    }

    #[test]
    fn test_bad_lines_are_collected_not_fatal() {
        let good = row(&[
            "A", "B", "1-Jan-25", "08:00", "1-Jan-25", "12:00",
            "", "", "", "", "", "", "", "10",
        ]);
        let short = "A\tB\t1-Jan-25";
        let bad_date = good.replace("1-Jan-25\t08:00", "99-Jan-25\t08:00");
        let text = format!("{}\n{}\n\n{}", short, good, bad_date);

        let outcome = parse_lpk_text(&text);
        assert_eq!(outcome.passages.len(), 1);
        assert_eq!(outcome.bad_lines, vec![1, 4]);
    }

    #[test]
    fn test_anchorage_total_minutes() {
        assert_eq!(anchorage_total_minutes("0", "02:15"), 135);
        assert_eq!(anchorage_total_minutes("30", "02:15"), 135);
        assert_eq!(anchorage_total_minutes("32", "00:00"), 2 * 1440);
        assert_eq!(anchorage_total_minutes("", ""), 0);
    }

    #[test]
    fn test_anchorage_total_minutes_saturates_on_huge_values() {
        assert_eq!(anchorage_total_minutes("9000000000000000000", "00:00"), i64::MAX);
        assert_eq!(anchorage_total_minutes("40", "9000000000000000000:59"), i64::MAX);
    }
}
