// ==========================================
// 船舶航次排期系统 - 计划视图数据契约
// ==========================================
// 用途: 渲染层所需的完整数据 (每船一行, 每日一格)
// 红线: 只描述"显示什么", 不涉及"怎么显示"
// ==========================================

use crate::domain::matrix::{ConflictCluster, DayBucket, OccupancyEntry, OccupancyMatrix};
use crate::domain::types::PlanSource;
use serde::{Deserialize, Serialize};

// ==========================================
// RowCell - 行内单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowCell {
    /// 普通日程格 (可能为空)
    Visits {
        day: DayBucket,
        entries: Vec<OccupancyEntry>,
        in_conflict: bool,
    },
    /// 坞修覆盖格 (横跨 span_days 列)
    Docking {
        start: DayBucket,
        span_days: usize,
        label: String,
    },
}

impl RowCell {
    /// 该单元格占据的列数
    pub fn column_span(&self) -> usize {
        match self {
            RowCell::Visits { .. } => 1,
            RowCell::Docking { span_days, .. } => *span_days,
        }
    }
}

// ==========================================
// RosterRow - 船队名单中的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub row_no: usize,      // 序号 (从 1 开始)
    pub ship_name: String,  // 船名
    pub cells: Vec<RowCell>,
}

// ==========================================
// PlanView - 计划视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanView {
    pub source: PlanSource,             // 草稿/公开
    pub roster: Vec<String>,            // 船队名单 (按船名排序)
    pub day_headers: Vec<DayBucket>,    // 连续日期表头
    pub matrix: OccupancyMatrix,        // 原始占用矩阵
    pub conflicts: Vec<ConflictCluster>, // 冲突簇 (按日期、港口排序)
    pub rows: Vec<RosterRow>,           // 按船名排序的行
}
