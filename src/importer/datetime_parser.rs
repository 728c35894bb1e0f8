// ==========================================
// 船舶航次排期系统 - 表格日期时间解析
// ==========================================
// 格式: d-Mon-yy HH:MM (例: 29-Dec-24 00:00)
// 兼容: YYYY-MM-DD HH:MM (文件导入)
// 约定: "N/A" 或空串表示缺失 (航次终点无离港时间)
// ==========================================

use crate::engine::time_key::parse_wire_timestamp;
use chrono::NaiveDateTime;

/// 表格粘贴的日期时间格式
pub const SCHEDULE_DATETIME_FORMAT: &str = "%d-%b-%y %H:%M";

/// 缺失占位符
pub const MISSING_MARKER: &str = "N/A";

/// 解析日期时间, 失败返回 None
pub fn parse_schedule_datetime(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(&normalized, SCHEDULE_DATETIME_FORMAT)
        .ok()
        .or_else(|| parse_wire_timestamp(&normalized).ok())
}

/// 解析日期 + 时间两列
pub fn parse_date_and_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    parse_schedule_datetime(&format!("{} {}", date.trim(), time.trim()))
}

/// 是否为缺失标记 ("N/A"、"N/A N/A"、空串)
pub fn is_missing(raw: &str) -> bool {
    raw.split_whitespace().all(|part| part.eq_ignore_ascii_case(MISSING_MARKER))
}

/// 解析可缺失的日期时间
///
/// # 返回
/// - Ok(None): 缺失标记
/// - Ok(Some(ts)): 解析成功
/// - Err(raw): 非缺失标记且无法解析
pub fn parse_optional_schedule_datetime(raw: &str) -> Result<Option<NaiveDateTime>, String> {
    if is_missing(raw) {
        return Ok(None);
    }
    parse_schedule_datetime(raw)
        .map(Some)
        .ok_or_else(|| raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_schedule_datetime_sheet_format() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_schedule_datetime("29-Dec-24 00:00"), Some(expected));
        assert_eq!(parse_schedule_datetime("  29-Dec-24   00:00 "), Some(expected));
        assert_eq!(parse_date_and_time("29-Dec-24", "00:00"), Some(expected));
    }

    #[test]
    fn test_parse_schedule_datetime_single_digit_day() {
        let parsed = parse_schedule_datetime("3-Jan-25 7:30").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_schedule_datetime_wire_fallback() {
        let parsed = parse_schedule_datetime("2025-01-03 07:30").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_schedule_datetime_rejects_garbage() {
        assert_eq!(parse_schedule_datetime(""), None);
        assert_eq!(parse_schedule_datetime("32-Dec-24 00:00"), None);
        assert_eq!(parse_schedule_datetime("SENIN"), None);
    }

    #[test]
    fn test_optional_missing_markers() {
        assert_eq!(parse_optional_schedule_datetime("N/A"), Ok(None));
        assert_eq!(parse_optional_schedule_datetime("N/A N/A"), Ok(None));
        assert_eq!(parse_optional_schedule_datetime(""), Ok(None));
        assert!(parse_optional_schedule_datetime("29-Dec-24 06:00").unwrap().is_some());
        assert_eq!(parse_optional_schedule_datetime("bad"), Err("bad".to_string()));
    }
}
