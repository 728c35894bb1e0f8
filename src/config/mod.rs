// ==========================================
// 船舶航次排期系统 - 配置层
// ==========================================
// 职责: 系统配置管理 (船队名单, OTP 分档)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod planner_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_fleet_roster, ConfigManager, DEFAULT_FLEET_ROSTER};
pub use planner_config_trait::PlannerConfigReader;
