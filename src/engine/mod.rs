// ==========================================
// 船舶航次排期系统 - 引擎层
// ==========================================
// 职责: 纯计算 (合并/矩阵/冲突/坞修/OTP), 不访问数据库
// 红线: 引擎不拼 SQL, 派生数据每次重新计算
// ==========================================

pub mod conflict_detector;
pub mod docking_overlay;
pub mod leg_merger;
pub mod matrix_builder;
pub mod otp;
pub mod plan_preview;
pub mod time_key;

// 重导出核心引擎
pub use conflict_detector::find_conflicts;
pub use docking_overlay::{docking_info_for_cell, row_segments, RowSegment};
pub use leg_merger::merge_legs;
pub use matrix_builder::build_occupancy_matrix;
pub use otp::{calculate_otp, otp_percentage};
pub use plan_preview::PlanViewBuilder;
pub use time_key::{
    day_key, minute_of_day, parse_time_range_label, parse_wire_timestamp, TimeKeyError,
};
