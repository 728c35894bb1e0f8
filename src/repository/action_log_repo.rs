// ==========================================
// 船舶航次排期系统 - 操作日志数据仓储
// ==========================================
// 对应: action_log 表
// 红线: 所有写入必须记录
// ==========================================

mod core;
mod queries;


pub use self::core::ActionLogRepository;
