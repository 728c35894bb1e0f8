// ==========================================
// 船舶航次排期系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod action_log_repo;
pub mod docking_repo;
pub mod error;
pub mod passage_repo;
pub mod public_plan_repo;
pub mod voyage_leg_repo;

// 重导出核心仓储
pub use action_log_repo::ActionLogRepository;
pub use docking_repo::DockingRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use passage_repo::PassageRepository;
pub use public_plan_repo::PublicPlanRepository;
pub use voyage_leg_repo::VoyageLegRepository;
