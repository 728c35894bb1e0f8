// ==========================================
// 船舶航次排期系统 - 计划视图构建
// ==========================================
// 流程: 航段合并 → 占用矩阵 → 冲突检测 → 坞修覆盖 → 行单元格
// 用途: Plan Preview (草稿计划) / Plan Public (公开计划) 共用
// ==========================================

use crate::domain::docking::DockingPeriod;
use crate::domain::matrix::{ConflictCluster, DayBucket, MatrixBuildResult};
use crate::domain::plan_view::{PlanView, RosterRow, RowCell};
use crate::domain::types::PlanSource;
use crate::domain::voyage::VoyageLeg;
use crate::engine::conflict_detector::find_conflicts;
use crate::engine::docking_overlay::{row_segments, RowSegment};
use crate::engine::leg_merger::merge_legs;
use crate::engine::matrix_builder::build_occupancy_matrix;
use std::collections::HashSet;
use tracing::info;

// ==========================================
// PlanViewBuilder - 计划视图构建器
// ==========================================
pub struct PlanViewBuilder {
    roster: Vec<String>,
}

impl PlanViewBuilder {
    /// 创建构建器
    ///
    /// # 参数
    /// - roster: 船队名单 (内部按船名排序去重)
    pub fn new(mut roster: Vec<String>) -> Self {
        roster.sort();
        roster.dedup();
        Self { roster }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// 构建计划视图
    ///
    /// # 参数
    /// - source: 计划来源
    /// - legs: 原始航段
    /// - dockings: 全部坞修期
    pub fn build(&self, source: PlanSource, legs: &[VoyageLeg], dockings: &[DockingPeriod]) -> PlanView {
        let visits = merge_legs(legs);
        let MatrixBuildResult { matrix, day_headers } = build_occupancy_matrix(&visits, &self.roster);

        let mut conflicts = find_conflicts(&matrix);
        conflicts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.port.cmp(&b.port)));

        let flagged = conflict_index(&conflicts);

        // 矩阵键已包含全部名单船舶 (BTreeMap 保证按船名有序)
        let rows: Vec<RosterRow> = matrix
            .iter()
            .enumerate()
            .map(|(idx, (ship_name, days))| {
                let cells = row_segments(dockings, ship_name, &day_headers)
                    .into_iter()
                    .map(|segment| match segment {
                        RowSegment::Day(day_idx) => {
                            let day = day_headers[day_idx];
                            let entries = days.get(&day).cloned().unwrap_or_default();
                            let in_conflict = entries.iter().any(|e| {
                                flagged.contains(&(day, e.port.as_str(), ship_name.as_str()))
                            });
                            RowCell::Visits {
                                day,
                                entries,
                                in_conflict,
                            }
                        }
                        RowSegment::Docking {
                            start_idx,
                            span,
                            period,
                        } => RowCell::Docking {
                            start: day_headers[start_idx],
                            span_days: span,
                            label: period.label.clone(),
                        },
                    })
                    .collect();

                RosterRow {
                    row_no: idx + 1,
                    ship_name: ship_name.clone(),
                    cells,
                }
            })
            .collect();

        info!(
            source = %source,
            legs = legs.len(),
            visits = visits.len(),
            days = day_headers.len(),
            conflicts = conflicts.len(),
            "计划视图构建完成"
        );

        PlanView {
            source,
            roster: self.roster.clone(),
            day_headers,
            matrix,
            conflicts,
            rows,
        }
    }
}

/// 冲突索引: (日期, 港口, 船名)
fn conflict_index(conflicts: &[ConflictCluster]) -> HashSet<(DayBucket, &str, &str)> {
    conflicts
        .iter()
        .flat_map(|c| {
            c.ships
                .iter()
                .map(move |ship| (c.date, c.port.as_str(), ship.as_str()))
        })
        .collect()
}
