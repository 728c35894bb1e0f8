// ==========================================
// 船舶航次排期系统 - 应用层
// ==========================================
// 职责: 组装仓储与API, 供命令行 / 外层传输调用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
