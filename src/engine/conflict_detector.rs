// ==========================================
// 船舶航次排期系统 - 港口冲突检测
// ==========================================
// 按 (日期, 港口) 独立处理:
// 1. 收集该港该日全部 (船名, 时间段)
// 2. 两两做半开区间重叠检测, 建立邻接表
// 3. 迭代 DFS 求连通分量
// 4. 每个 >= 2 条目的分量输出一个冲突簇 (船名字典序)
// ==========================================

use crate::domain::matrix::{ConflictCluster, DayBucket, MinuteRange, OccupancyMatrix, TimeRangeLabel};
use std::collections::BTreeMap;

/// 同一 (日期, 港口) 下的一个占用条目
#[derive(Debug, Clone)]
struct PortSlot<'a> {
    ship_name: &'a str,
    label: TimeRangeLabel,
    range: MinuteRange,
}

/// 检测全部冲突簇
///
/// 返回顺序按 (日期, 港口) 的自然序, 调用方可按需重排
pub fn find_conflicts(matrix: &OccupancyMatrix) -> Vec<ConflictCluster> {
    // (日期, 港口) → 条目
    let mut by_day_port: BTreeMap<(DayBucket, &str), Vec<PortSlot<'_>>> = BTreeMap::new();

    for (ship_name, days) in matrix {
        for (day, entries) in days {
            for entry in entries {
                by_day_port
                    .entry((*day, entry.port.as_str()))
                    .or_default()
                    .push(PortSlot {
                        ship_name: ship_name.as_str(),
                        label: entry.time_range,
                        range: entry.time_range.minute_range(),
                    });
            }
        }
    }

    let mut clusters = Vec::new();
    for ((day, port), slots) in by_day_port {
        if slots.len() < 2 {
            continue;
        }
        for component in connected_components(&slots) {
            if component.len() < 2 {
                continue;
            }
            clusters.push(to_cluster(day, port, &slots, component));
        }
    }

    tracing::debug!(clusters = clusters.len(), "冲突检测完成");
    clusters
}

/// 构建邻接表并以迭代 DFS 求连通分量
fn connected_components(slots: &[PortSlot<'_>]) -> Vec<Vec<usize>> {
    let n = slots.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if slots[i].range.overlaps(&slots[j].range) {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![root];
        let mut component = Vec::new();

        while let Some(node) = stack.pop() {
            component.push(node);
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        components.push(component);
    }

    components
}

fn to_cluster(day: DayBucket, port: &str, slots: &[PortSlot<'_>], component: Vec<usize>) -> ConflictCluster {
    let mut members: Vec<&PortSlot<'_>> = component.into_iter().map(|idx| &slots[idx]).collect();
    // 船名字典序; 同船多条目时按起始分钟稳定排序
    members.sort_by(|a, b| {
        a.ship_name
            .cmp(b.ship_name)
            .then(a.range.start.cmp(&b.range.start))
            .then(a.range.end.cmp(&b.range.end))
    });

    ConflictCluster {
        date: day,
        port: port.to_string(),
        ships: members.iter().map(|m| m.ship_name.to_string()).collect(),
        time_ranges: members.iter().map(|m| m.label).collect(),
    }
}
