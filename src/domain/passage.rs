// ==========================================
// 船舶航次排期系统 - 实际航行记录领域模型
// ==========================================
// 对应: actual_passage 表 (LPK 实际航行报告)
// 用途: 与计划航段比对计算 OTP
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ActualPassage - 一段实际航行 (起运港 → 目的港)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualPassage {
    pub passage_id: i64,               // 记录ID
    pub ship_name: String,             // 船名
    pub voyage_id: String,             // 航次号
    pub from_port: String,             // 起运港
    pub to_port: String,               // 目的港
    pub departed_at: NaiveDateTime,    // 实际离港 (TD)
    pub arrived_at: NaiveDateTime,     // 实际到港 (TA)

    // ===== 锚泊因素 (港外等待) =====
    pub anchorage_start: Option<NaiveDateTime>, // 锚泊开始
    pub anchorage_end: Option<NaiveDateTime>,   // 锚泊结束
    pub anchorage_minutes: i64,                 // 锚泊总分钟数

    pub distance_nm: i64,              // 航程 (海里)
}

// ==========================================
// NewActualPassage - 待写入航行记录
// ==========================================
// 解析器输出, 尚未关联船名/航次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActualPassage {
    pub from_port: String,
    pub to_port: String,
    pub departed_at: NaiveDateTime,
    pub arrived_at: NaiveDateTime,
    pub anchorage_start: Option<NaiveDateTime>,
    pub anchorage_end: Option<NaiveDateTime>,
    pub anchorage_minutes: i64,
    pub distance_nm: i64,
}
