// ==========================================
// 船舶航次排期系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型、视图数据契约
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod docking;
pub mod matrix;
pub mod otp;
pub mod passage;
pub mod plan_view;
pub mod types;
pub mod voyage;

// 重导出核心类型
pub use action_log::ActionLog;
pub use docking::DockingPeriod;
pub use matrix::{
    ConflictCluster, DayBucket, LabelParseError, MatrixBuildResult, MinuteRange, OccupancyEntry,
    OccupancyMatrix, TimeRangeLabel,
};
pub use otp::{OtpBand, OtpBands, OtpReport, OtpRow};
pub use passage::{ActualPassage, NewActualPassage};
pub use plan_view::{PlanView, RosterRow, RowCell};
pub use types::{ActionType, PlanSource};
pub use voyage::{LegFilter, MergedVisit, NewVoyageLeg, VoyageLeg, VoyageSummary};
