// ==========================================
// 船舶航次排期系统 - 航段合并
// ==========================================
// 背景: 船舶周转时, 上一航次终点 (仅到港) 与下一航次起点 (完整航段)
//       记录为同港同到港时间的两条航段, 实际是同一次靠港
// 规则: 按 (船名, 港口, 到港时间) 分组
//       - 组内恰好 2 条, 且为 1 条仅到港 + 1 条完整: 合并
//       - 其余情况 (单条 / 超过 2 条 / 无有效配对): 原样透传
// ==========================================

use crate::domain::voyage::{MergedVisit, VoyageLeg};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// 合并分组键
type MergeKey<'a> = (&'a str, &'a str, NaiveDateTime);

/// 合并被航次边界拆开的靠港记录
///
/// # 参数
/// - legs: 原始航段 (任意顺序)
///
/// # 返回
/// 合并后的靠港列表，顺序为各分组首次出现的顺序
pub fn merge_legs(legs: &[VoyageLeg]) -> Vec<MergedVisit> {
    // 分组 (保持首次出现顺序, 保证结果可复现)
    let mut group_index: HashMap<MergeKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<Vec<&VoyageLeg>> = Vec::new();

    for leg in legs {
        let key = (leg.ship_name.as_str(), leg.port.as_str(), leg.arrival);
        match group_index.get(&key) {
            Some(&idx) => groups[idx].push(leg),
            None => {
                group_index.insert(key, groups.len());
                groups.push(vec![leg]);
            }
        }
    }

    let mut merged = Vec::with_capacity(legs.len());
    let mut merged_pairs = 0usize;

    for group in groups {
        match try_merge_pair(&group) {
            Some(visit) => {
                merged_pairs += 1;
                merged.push(visit);
            }
            None => {
                if group.len() > 2 {
                    tracing::debug!(
                        ship = group[0].ship_name.as_str(),
                        port = group[0].port.as_str(),
                        size = group.len(),
                        "合并键冲突超过 2 条, 原样保留"
                    );
                }
                merged.extend(group.into_iter().cloned());
            }
        }
    }

    tracing::debug!(input = legs.len(), merged_pairs, output = merged.len(), "航段合并完成");
    merged
}

/// 尝试合并一组航段
///
/// 仅当组内恰好是 (仅到港, 完整) 一对时返回合并结果
fn try_merge_pair(group: &[&VoyageLeg]) -> Option<MergedVisit> {
    let [a, b] = group else {
        return None;
    };

    let (arrival_only, full) = match (a.departure, b.departure) {
        (None, Some(_)) => (*a, *b),
        (Some(_), None) => (*b, *a),
        _ => return None,
    };

    let mut visit = arrival_only.clone();
    visit.departure = full.departure;
    visit.voyage_id = format!("{} / {}", arrival_only.voyage_id, full.voyage_id);
    Some(visit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn leg(id: i64, ship: &str, voyage: &str, port: &str, arr: NaiveDateTime, dep: Option<NaiveDateTime>) -> VoyageLeg {
        VoyageLeg::new(id, ship, voyage, port, arr, dep)
    }

    #[test]
    fn test_merge_arrival_only_with_full_leg() {
        let legs = vec![
            leg(1, "KM. AWU", "1", "X", ts(5, 8, 0), None),
            leg(2, "KM. AWU", "2", "X", ts(5, 8, 0), Some(ts(5, 20, 0))),
        ];

        let merged = merge_legs(&legs);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].port, "X");
        assert_eq!(merged[0].arrival, ts(5, 8, 0));
        assert_eq!(merged[0].departure, Some(ts(5, 20, 0)));
        assert_eq!(merged[0].voyage_id, "1 / 2");
        // 保留仅到港记录的身份
        assert_eq!(merged[0].record_id, 1);
    }

    #[test]
    fn test_merge_is_order_independent_within_group() {
        let legs = vec![
            leg(2, "KM. AWU", "2", "X", ts(5, 8, 0), Some(ts(5, 20, 0))),
            leg(1, "KM. AWU", "1", "X", ts(5, 8, 0), None),
        ];

        let merged = merge_legs(&legs);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].voyage_id, "1 / 2");
    }

    #[test]
    fn test_no_merge_across_ships_or_times() {
        let legs = vec![
            leg(1, "KM. AWU", "1", "X", ts(5, 8, 0), None),
            leg(2, "KM. EGON", "2", "X", ts(5, 8, 0), Some(ts(5, 20, 0))),
            leg(3, "KM. AWU", "2", "X", ts(5, 9, 0), Some(ts(5, 20, 0))),
        ];

        let merged = merge_legs(&legs);
        assert_eq!(merged, legs);
    }

    #[test]
    fn test_two_full_legs_pass_through() {
        let legs = vec![
            leg(1, "KM. AWU", "1", "X", ts(5, 8, 0), Some(ts(5, 10, 0))),
            leg(2, "KM. AWU", "2", "X", ts(5, 8, 0), Some(ts(5, 12, 0))),
        ];

        assert_eq!(merge_legs(&legs), legs);
    }

    #[test]
    fn test_three_way_collision_passes_through_unmerged() {
        let legs = vec![
            leg(1, "KM. AWU", "1", "X", ts(5, 8, 0), None),
            leg(2, "KM. AWU", "2", "X", ts(5, 8, 0), Some(ts(5, 20, 0))),
            leg(3, "KM. AWU", "3", "X", ts(5, 8, 0), Some(ts(5, 22, 0))),
        ];

        let merged = merge_legs(&legs);
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|v| !v.voyage_id.contains('/')));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_legs(&[]).is_empty());
    }
}
