// ==========================================
// 船舶航次排期系统 - 准点率 (OTP) 领域模型
// ==========================================
// 用途: 计划 (ETA/ETD) 与实际 (TA/TD) 比对结果
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// OtpBand - 偏差分档
// ==========================================
// 偏差小时数严格大于 over_hours 时取 percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OtpBand {
    pub over_hours: i64, // 偏差阈值 (小时)
    pub percentage: u8,  // 得分 (%)
}

// ==========================================
// OtpBands - 分档表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpBands {
    pub bands: Vec<OtpBand>, // 按阈值降序
    pub on_time: u8,         // 未超过任何阈值时的得分
}

impl Default for OtpBands {
    fn default() -> Self {
        Self {
            bands: vec![
                OtpBand { over_hours: 48, percentage: 50 },
                OtpBand { over_hours: 24, percentage: 60 },
                OtpBand { over_hours: 12, percentage: 70 },
                OtpBand { over_hours: 6, percentage: 80 },
                OtpBand { over_hours: 2, percentage: 90 },
            ],
            on_time: 100,
        }
    }
}

// ==========================================
// OtpRow - 单港比对明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpRow {
    pub port: String,                       // 港口
    pub eta: NaiveDateTime,                 // 计划到港
    pub ta: NaiveDateTime,                  // 实际到港
    pub etd: Option<NaiveDateTime>,         // 计划离港
    pub td: NaiveDateTime,                  // 实际离港 (前一港出发)
    pub otp_arrival: u8,                    // 到港准点得分
    pub otp_departure: Option<u8>,          // 离港准点得分 (首港无)
}

// ==========================================
// OtpReport - 航次准点率报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpReport {
    pub ship_name: String,
    pub voyage_id: String,
    pub rows: Vec<OtpRow>,
    pub average_otp: f64, // 平均得分 (两位小数)
}
