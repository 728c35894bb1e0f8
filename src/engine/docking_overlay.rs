// ==========================================
// 船舶航次排期系统 - 坞修覆盖判定
// ==========================================
// 职责: 回答"某船某日是否处于坞修期"
// 红线: 只判定是否适用, 不决定如何渲染
// ==========================================

use crate::domain::docking::DockingPeriod;
use crate::domain::matrix::DayBucket;

/// 查找覆盖指定船舶指定日期的坞修期
///
/// 按输入顺序返回第一条匹配记录; 无匹配返回 None
pub fn docking_info_for_cell<'a>(
    periods: &'a [DockingPeriod],
    ship_name: &str,
    day: DayBucket,
) -> Option<&'a DockingPeriod> {
    periods
        .iter()
        .find(|p| p.ship_name == ship_name && p.covers(day))
}

// ==========================================
// 行内坞修分段
// ==========================================

/// 一行中的单元格布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSegment<'a> {
    /// 普通日程格 (表头下标)
    Day(usize),
    /// 坞修覆盖段: 从 start_idx 起横跨 span 列
    Docking {
        start_idx: usize,
        span: usize,
        period: &'a DockingPeriod,
    },
}

/// 将一行日期表头划分为普通格与坞修覆盖段
///
/// 坞修段被裁剪到表头范围内; 每个表头恰好被一个分段覆盖
pub fn row_segments<'a>(
    periods: &'a [DockingPeriod],
    ship_name: &str,
    day_headers: &[DayBucket],
) -> Vec<RowSegment<'a>> {
    let mut segments = Vec::with_capacity(day_headers.len());
    let mut idx = 0;

    while idx < day_headers.len() {
        match docking_info_for_cell(periods, ship_name, day_headers[idx]) {
            Some(period) => {
                let span = day_headers[idx..]
                    .iter()
                    .take_while(|day| period.covers(**day))
                    .count();
                segments.push(RowSegment::Docking {
                    start_idx: idx,
                    span,
                    period,
                });
                idx += span;
            }
            None => {
                segments.push(RowSegment::Day(idx));
                idx += 1;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn period(id: i64, ship: &str, start: u32, end: u32) -> DockingPeriod {
        DockingPeriod {
            docking_id: id,
            ship_name: ship.to_string(),
            start_date: d(start),
            end_date: d(end),
            label: format!("DOCKING {}", id),
        }
    }

    #[test]
    fn test_lookup_hits_inclusive_bounds() {
        let periods = vec![period(1, "KM. AWU", 3, 5)];

        assert_eq!(docking_info_for_cell(&periods, "KM. AWU", d(3)).map(|p| p.docking_id), Some(1));
        assert_eq!(docking_info_for_cell(&periods, "KM. AWU", d(5)).map(|p| p.docking_id), Some(1));
        assert!(docking_info_for_cell(&periods, "KM. AWU", d(6)).is_none());
        assert!(docking_info_for_cell(&periods, "KM. EGON", d(4)).is_none());
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let periods = vec![period(1, "KM. AWU", 1, 10), period(2, "KM. AWU", 4, 6)];
        assert_eq!(docking_info_for_cell(&periods, "KM. AWU", d(5)).map(|p| p.docking_id), Some(1));
    }

    #[test]
    fn test_lookup_empty_periods() {
        assert!(docking_info_for_cell(&[], "KM. AWU", d(1)).is_none());
    }

    #[test]
    fn test_row_segments_clip_to_headers() {
        // 坞修 2/27 ~ 3/3, 表头 3/1 ~ 3/5
        let periods = vec![DockingPeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 2, 27).unwrap(),
            ..period(1, "KM. AWU", 1, 3)
        }];
        let headers: Vec<NaiveDate> = (1..=5).map(d).collect();

        let segments = row_segments(&periods, "KM. AWU", &headers);

        assert_eq!(segments.len(), 3);
        assert!(matches!(segments[0], RowSegment::Docking { start_idx: 0, span: 3, .. }));
        assert_eq!(segments[1], RowSegment::Day(3));
        assert_eq!(segments[2], RowSegment::Day(4));
    }

    #[test]
    fn test_row_segments_cover_every_header_once() {
        let periods = vec![period(1, "KM. AWU", 2, 3), period(2, "KM. AWU", 5, 5)];
        let headers: Vec<NaiveDate> = (1..=6).map(d).collect();

        let segments = row_segments(&periods, "KM. AWU", &headers);
        let covered: usize = segments
            .iter()
            .map(|s| match s {
                RowSegment::Day(_) => 1,
                RowSegment::Docking { span, .. } => *span,
            })
            .sum();

        assert_eq!(covered, headers.len());
        assert_eq!(segments.len(), 4);
    }
}
