// ==========================================
// 船舶航次排期系统 - 航次计划领域模型
// ==========================================
// 对应: voyage_leg 表 (草稿计划) / public_plan_leg 表 (公开计划)
// 约束: 同一航次内按到港时间有序, 无离港时间的航段为航次终点
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// VoyageLeg - 航段 (一次靠港)
// ==========================================
// 外部输入: 从存储中读取后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageLeg {
    pub record_id: i64,                  // 记录ID (仅用于合并记账)
    pub ship_name: String,               // 船名
    pub voyage_id: String,               // 航次号 (合并后可能为 "A / B")
    pub route_tag: Option<String>,       // 航线标记 (单字符)
    pub port: String,                    // 港口
    pub arrival: NaiveDateTime,          // 到港时间 (ETA)
    pub departure: Option<NaiveDateTime>, // 离港时间 (ETD), 缺失表示航次终点

    // ===== 录入附带的航行参数 (不参与冲突计算) =====
    pub speed_knots: Option<f64>,        // 航速
    pub distance_nm: Option<f64>,        // 航程
    pub tide_factor: Option<f64>,        // 潮汐因子
    pub berth_hours: Option<f64>,        // 靠泊时长
}

impl VoyageLeg {
    /// 构造只含核心字段的航段
    pub fn new(
        record_id: i64,
        ship_name: impl Into<String>,
        voyage_id: impl Into<String>,
        port: impl Into<String>,
        arrival: NaiveDateTime,
        departure: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            record_id,
            ship_name: ship_name.into(),
            voyage_id: voyage_id.into(),
            route_tag: None,
            port: port.into(),
            arrival,
            departure,
            speed_knots: None,
            distance_nm: None,
            tide_factor: None,
            berth_hours: None,
        }
    }

    /// 航段最后时刻（离港时间，缺失时取到港时间）
    pub fn last_moment(&self) -> NaiveDateTime {
        self.departure.unwrap_or(self.arrival)
    }
}

/// 合并后的靠港记录
///
/// 与 VoyageLeg 同构；每次计算时重新生成，从不持久化。
pub type MergedVisit = VoyageLeg;

// ==========================================
// NewVoyageLeg - 待写入航段
// ==========================================
// 用途: 录入/导入时尚无 record_id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVoyageLeg {
    pub ship_name: String,
    pub voyage_id: String,
    pub route_tag: Option<String>,
    pub port: String,
    pub arrival: NaiveDateTime,
    pub departure: Option<NaiveDateTime>,
    pub speed_knots: Option<f64>,
    pub distance_nm: Option<f64>,
    pub tide_factor: Option<f64>,
    pub berth_hours: Option<f64>,
}

// ==========================================
// LegFilter - 航段查询条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegFilter {
    pub ship_name: Option<String>,
    pub voyage_id: Option<String>,
}

impl LegFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn voyage(ship_name: &str, voyage_id: &str) -> Self {
        Self {
            ship_name: Some(ship_name.to_string()),
            voyage_id: Some(voyage_id.to_string()),
        }
    }
}

// ==========================================
// VoyageSummary - 航次摘要
// ==========================================
// 用途: 发布/OTP 页面选择航次 (首末港到港时间)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageSummary {
    pub ship_name: String,
    pub voyage_id: String,
    pub leg_count: usize,
    pub first_arrival: NaiveDateTime,
    pub last_arrival: NaiveDateTime,
}
