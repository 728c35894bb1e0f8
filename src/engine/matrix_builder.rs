// ==========================================
// 船舶航次排期系统 - 占用矩阵构建
// ==========================================
// 输入: 合并后的靠港列表 + 船队名单
// 输出: 船名 → 日期 → 占用条目, 以及连续日期表头
// 规则:
// - 同日到离港 (或无离港): 一条 "HH:MM-HH:MM" / "HH:MM"
// - 跨日靠港: 到港日 "HH:MM-" + 离港日 "-HH:MM"
// - 名单中无靠港的船舶仍保留空行
// ==========================================

use crate::domain::matrix::{
    DayBucket, MatrixBuildResult, OccupancyEntry, OccupancyMatrix, TimeRangeLabel,
};
use crate::domain::voyage::MergedVisit;
use crate::engine::time_key::{day_key, minute_of_day};
use std::collections::BTreeMap;

/// 构建占用矩阵
///
/// # 参数
/// - visits: 合并后的靠港记录
/// - roster: 船队名单 (每条船必有一行)
///
/// # 返回
/// - 无靠港时返回空矩阵与空表头 (名单船舶除外, 仍有空行)
pub fn build_occupancy_matrix(visits: &[MergedVisit], roster: &[String]) -> MatrixBuildResult {
    let mut matrix: OccupancyMatrix = roster
        .iter()
        .map(|ship| (ship.clone(), BTreeMap::new()))
        .collect();

    let day_headers = day_span(visits)
        .map(|(first, last)| day_range(first, last))
        .unwrap_or_default();

    for visit in visits {
        let row = matrix.entry(visit.ship_name.clone()).or_default();
        for (day, time_range) in split_visit(visit) {
            row.entry(day).or_default().push(OccupancyEntry {
                port: visit.port.clone(),
                time_range,
            });
        }
    }

    tracing::debug!(
        visits = visits.len(),
        ships = matrix.len(),
        days = day_headers.len(),
        "占用矩阵构建完成"
    );

    MatrixBuildResult { matrix, day_headers }
}

/// 全局日期跨度: (最早到港日, 最晚离港日或到港日)
fn day_span(visits: &[MergedVisit]) -> Option<(DayBucket, DayBucket)> {
    let first = visits
        .iter()
        .flat_map(|v| [Some(v.arrival), v.departure])
        .flatten()
        .map(day_key)
        .min()?;
    let last = visits.iter().map(|v| day_key(v.last_moment())).max()?;
    Some((first, last.max(first)))
}

/// 生成 [first, last] 的连续日期序列
pub fn day_range(first: DayBucket, last: DayBucket) -> Vec<DayBucket> {
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// 将一次靠港拆分为按日的时间段标签
pub fn split_visit(visit: &MergedVisit) -> Vec<(DayBucket, TimeRangeLabel)> {
    let arrival_day = day_key(visit.arrival);
    let arrival_minute = minute_of_day(visit.arrival);

    let Some(departure) = visit.departure else {
        return vec![(arrival_day, TimeRangeLabel::Point { at: arrival_minute })];
    };

    let departure_day = day_key(departure);
    let departure_minute = minute_of_day(departure);

    if departure_day == arrival_day {
        vec![(
            arrival_day,
            TimeRangeLabel::Closed {
                start: arrival_minute,
                end: departure_minute,
            },
        )]
    } else {
        vec![
            (arrival_day, TimeRangeLabel::OpenEnded { start: arrival_minute }),
            (departure_day, TimeRangeLabel::OpenStarted { end: departure_minute }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voyage::VoyageLeg;
    use chrono::{NaiveDate, NaiveDateTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn ts(day: u32, h: u32, m: u32) -> NaiveDateTime {
        d(day).and_hms_opt(h, m, 0).unwrap()
    }

    fn visit(ship: &str, port: &str, arr: NaiveDateTime, dep: Option<NaiveDateTime>) -> MergedVisit {
        VoyageLeg::new(0, ship, "1", port, arr, dep)
    }

    fn labels(result: &MatrixBuildResult, ship: &str, day: NaiveDate) -> Vec<String> {
        result.matrix[ship]
            .get(&day)
            .map(|entries| entries.iter().map(|e| e.time_range.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_same_day_visit_single_entry() {
        let visits = vec![visit("A", "P", ts(1, 8, 0), Some(ts(1, 10, 0)))];
        let result = build_occupancy_matrix(&visits, &[]);

        assert_eq!(labels(&result, "A", d(1)), vec!["08:00-10:00"]);
        assert_eq!(result.day_headers, vec![d(1)]);
    }

    #[test]
    fn test_overnight_visit_splits_into_two_halves() {
        let visits = vec![visit("A", "P", ts(1, 23, 30), Some(ts(2, 2, 0)))];
        let result = build_occupancy_matrix(&visits, &[]);

        assert_eq!(labels(&result, "A", d(1)), vec!["23:30-"]);
        assert_eq!(labels(&result, "A", d(2)), vec!["-02:00"]);
        assert_eq!(result.matrix["A"].values().map(Vec::len).sum::<usize>(), 2);
        assert_eq!(result.day_headers, vec![d(1), d(2)]);
    }

    #[test]
    fn test_multi_day_stay_only_marks_endpoints() {
        // 跨多日靠港: 中间日期无条目, 但表头连续
        let visits = vec![visit("A", "P", ts(1, 20, 0), Some(ts(3, 6, 0)))];
        let result = build_occupancy_matrix(&visits, &[]);

        assert_eq!(labels(&result, "A", d(1)), vec!["20:00-"]);
        assert!(labels(&result, "A", d(2)).is_empty());
        assert_eq!(labels(&result, "A", d(3)), vec!["-06:00"]);
        assert_eq!(result.day_headers.len(), 3);
    }

    #[test]
    fn test_arrival_only_visit_is_point_label() {
        let visits = vec![visit("A", "P", ts(4, 7, 15), None)];
        let result = build_occupancy_matrix(&visits, &[]);

        assert_eq!(labels(&result, "A", d(4)), vec!["07:15"]);
    }

    #[test]
    fn test_day_headers_cover_full_range_without_gaps() {
        let visits = vec![
            visit("A", "P", ts(1, 8, 0), Some(ts(1, 10, 0))),
            visit("B", "Q", ts(5, 8, 0), None),
        ];
        let result = build_occupancy_matrix(&visits, &[]);

        assert_eq!(result.day_headers, vec![d(1), d(2), d(3), d(4), d(5)]);
    }

    #[test]
    fn test_roster_ships_without_visits_keep_empty_rows() {
        let roster = vec!["A".to_string(), "IDLE".to_string()];
        let visits = vec![visit("A", "P", ts(1, 8, 0), Some(ts(1, 10, 0)))];
        let result = build_occupancy_matrix(&visits, &roster);

        assert!(result.matrix.contains_key("IDLE"));
        assert!(result.matrix["IDLE"].is_empty());
    }

    #[test]
    fn test_off_roster_ship_still_recorded() {
        let roster = vec!["A".to_string()];
        let visits = vec![visit("GUEST", "P", ts(1, 8, 0), Some(ts(1, 9, 0)))];
        let result = build_occupancy_matrix(&visits, &roster);

        assert_eq!(labels(&result, "GUEST", d(1)), vec!["08:00-09:00"]);
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = build_occupancy_matrix(&[], &[]);
        assert_eq!(result, MatrixBuildResult::default());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let visits = vec![
            visit("A", "Q", ts(1, 14, 0), Some(ts(1, 16, 0))),
            visit("A", "P", ts(1, 6, 0), Some(ts(1, 8, 0))),
        ];
        let result = build_occupancy_matrix(&visits, &[]);

        let ports: Vec<&str> = result.matrix["A"][&d(1)].iter().map(|e| e.port.as_str()).collect();
        assert_eq!(ports, vec!["Q", "P"]);
    }
}
