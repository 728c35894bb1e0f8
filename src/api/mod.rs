// ==========================================
// 船舶航次排期系统 - API层
// ==========================================
// 职责: 输入校验 + 调用仓储/引擎 + 记录 ActionLog
// 红线: 所有写操作必须记录 ActionLog
// ==========================================

pub mod activity_api;
pub mod docking_api;
pub mod error;
pub mod jadwal_api;
pub mod lpk_api;
pub mod otp_api;
pub mod plan_api;

// 重导出
pub use activity_api::{ActivityApi, DEFAULT_ACTIVITY_LIMIT};
pub use docking_api::DockingApi;
pub use error::{ApiError, ApiResult};
pub use jadwal_api::JadwalApi;
pub use lpk_api::{LpkApi, LpkImportSummary};
pub use otp_api::OtpApi;
pub use plan_api::PlanApi;
