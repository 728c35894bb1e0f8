// ==========================================
// 船舶航次排期系统 - 准点率 (OTP) 计算
// ==========================================
// 输入: 计划航段 (ETA/ETD) + 实际航行记录 (TA/TD)
// 匹配: 计划航段按到港时间排序, 依次匹配第一条未使用且目的港相同的实际记录
// 得分: 偏差小时数 (取绝对值, 截断为整数) 按分档表换算
// ==========================================

use crate::domain::otp::{OtpBands, OtpReport, OtpRow};
use crate::domain::passage::ActualPassage;
use crate::domain::voyage::VoyageLeg;
use chrono::NaiveDateTime;

/// 偏差小时数 → 准点得分
///
/// 取阈值严格小于偏差的最高档; 未超过任何阈值时为 on_time
pub fn otp_percentage(hours: i64, bands: &OtpBands) -> u8 {
    let hours = hours.abs();
    bands
        .bands
        .iter()
        .filter(|band| hours > band.over_hours)
        .max_by_key(|band| band.over_hours)
        .map(|band| band.percentage)
        .unwrap_or(bands.on_time)
}

/// 两时刻间的整小时偏差 (绝对值)
fn deviation_hours(planned: NaiveDateTime, actual: NaiveDateTime) -> i64 {
    (actual - planned).num_hours().abs()
}

fn same_port(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// 计算航次准点率
///
/// 到港分: 本段 ETA 对比实际到港。
/// 离港分: 前一计划航段的 ETD 对比本段实际出发 (不是本段 ETA), 首段不计。
///
/// # 返回
/// - 任一输入为空, 或没有任何航段匹配到实际记录时返回 None
pub fn calculate_otp(
    planned: &[VoyageLeg],
    actual: &[ActualPassage],
    bands: &OtpBands,
) -> Option<OtpReport> {
    let first = planned.first()?;
    if actual.is_empty() {
        return None;
    }

    let mut legs: Vec<&VoyageLeg> = planned.iter().collect();
    legs.sort_by_key(|leg| leg.arrival);

    let mut used = vec![false; actual.len()];
    let mut rows = Vec::new();
    let mut scores: Vec<u8> = Vec::new();

    for (idx, leg) in legs.iter().enumerate() {
        let matched = actual
            .iter()
            .enumerate()
            .find(|(i, passage)| !used[*i] && same_port(&passage.to_port, &leg.port));

        let Some((passage_idx, passage)) = matched else {
            tracing::debug!(port = leg.port.as_str(), "航段无对应实际记录, 跳过");
            continue;
        };
        used[passage_idx] = true;

        let otp_arrival = otp_percentage(deviation_hours(leg.arrival, passage.arrived_at), bands);
        scores.push(otp_arrival);

        // 实际记录的出发港即前一港
        let otp_departure = idx
            .checked_sub(1)
            .and_then(|prev| legs[prev].departure)
            .map(|prev_etd| otp_percentage(deviation_hours(prev_etd, passage.departed_at), bands));
        if let Some(score) = otp_departure {
            scores.push(score);
        }

        rows.push(OtpRow {
            port: leg.port.clone(),
            eta: leg.arrival,
            ta: passage.arrived_at,
            etd: leg.departure,
            td: passage.departed_at,
            otp_arrival,
            otp_departure,
        });
    }

    if rows.is_empty() {
        return None;
    }

    let total: f64 = scores.iter().map(|s| f64::from(*s)).sum();
    let average = total / scores.len() as f64;

    Some(OtpReport {
        ship_name: first.ship_name.clone(),
        voyage_id: first.voyage_id.clone(),
        rows,
        average_otp: (average * 100.0).round() / 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn passage(from: &str, to: &str, dep: NaiveDateTime, arr: NaiveDateTime) -> ActualPassage {
        ActualPassage {
            passage_id: 0,
            ship_name: "KM. AWU".to_string(),
            voyage_id: "01".to_string(),
            from_port: from.to_string(),
            to_port: to.to_string(),
            departed_at: dep,
            arrived_at: arr,
            anchorage_start: None,
            anchorage_end: None,
            anchorage_minutes: 0,
            distance_nm: 0,
        }
    }

    #[test]
    fn test_otp_percentage_bands() {
        let bands = OtpBands::default();
        assert_eq!(otp_percentage(0, &bands), 100);
        assert_eq!(otp_percentage(2, &bands), 100);
        assert_eq!(otp_percentage(3, &bands), 90);
        assert_eq!(otp_percentage(6, &bands), 90);
        assert_eq!(otp_percentage(7, &bands), 80);
        assert_eq!(otp_percentage(13, &bands), 70);
        assert_eq!(otp_percentage(25, &bands), 60);
        assert_eq!(otp_percentage(49, &bands), 50);
        assert_eq!(otp_percentage(-49, &bands), 50);
    }

    #[test]
    fn test_calculate_otp_matches_by_destination() {
        let planned = vec![
            VoyageLeg::new(1, "KM. AWU", "01", "SURABAYA", ts(1, 8), Some(ts(1, 20))),
            VoyageLeg::new(2, "KM. AWU", "01", "MAKASSAR", ts(3, 8), None),
        ];
        let actual = vec![
            passage("JAKARTA", "SURABAYA", ts(1, 0), ts(1, 9)),
            // 前一港 ETD 为 1 日 20:00, 实际 1 日 23:00 出发 (偏差 3h → 90)
            passage("SURABAYA", "MAKASSAR", ts(1, 23), ts(3, 16)),
        ];

        let report = calculate_otp(&planned, &actual, &OtpBands::default()).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].otp_arrival, 100);
        assert_eq!(report.rows[0].otp_departure, None);
        assert_eq!(report.rows[1].otp_arrival, 80);
        assert_eq!(report.rows[1].otp_departure, Some(90));
        // (100 + 80 + 90) / 3 = 90.00
        assert_eq!(report.average_otp, 90.0);
    }

    #[test]
    fn test_calculate_otp_average_rounded() {
        let planned = vec![
            VoyageLeg::new(1, "KM. AWU", "01", "A", ts(1, 8), Some(ts(1, 10))),
            VoyageLeg::new(2, "KM. AWU", "01", "B", ts(2, 8), None),
        ];
        let actual = vec![
            passage("X", "A", ts(1, 0), ts(1, 8)),
            passage("A", "B", ts(1, 13), ts(2, 21)),
        ];

        let report = calculate_otp(&planned, &actual, &OtpBands::default()).unwrap();
        // (100 + 70 + 90) / 3 = 86.666..
        assert_eq!(report.average_otp, 86.67);

        let planned = vec![VoyageLeg::new(1, "KM. AWU", "01", "A", ts(1, 8), None)];
        let actual = vec![passage("X", "A", ts(1, 0), ts(1, 11))];
        let report = calculate_otp(&planned, &actual, &OtpBands::default()).unwrap();
        assert_eq!(report.average_otp, 90.0);
    }

    #[test]
    fn test_calculate_otp_empty_inputs() {
        let planned = vec![VoyageLeg::new(1, "KM. AWU", "01", "A", ts(1, 8), None)];
        let actual = vec![passage("X", "A", ts(1, 0), ts(1, 8))];

        assert!(calculate_otp(&[], &actual, &OtpBands::default()).is_none());
        assert!(calculate_otp(&planned, &[], &OtpBands::default()).is_none());
    }

    #[test]
    fn test_calculate_otp_each_passage_used_once() {
        let planned = vec![
            VoyageLeg::new(1, "KM. AWU", "01", "A", ts(1, 8), Some(ts(1, 10))),
            VoyageLeg::new(2, "KM. AWU", "01", "A", ts(5, 8), None),
        ];
        let actual = vec![passage("X", "A", ts(1, 0), ts(1, 8))];

        let report = calculate_otp(&planned, &actual, &OtpBands::default()).unwrap();
        assert_eq!(report.rows.len(), 1);
    }
}
