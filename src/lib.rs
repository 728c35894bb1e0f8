// ==========================================
// 船舶航次排期系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 航次计划录入、港口冲突检测、计划视图与准点率
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 纯计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ActionLog, ActionType, ConflictCluster, DockingPeriod, OccupancyEntry, OccupancyMatrix,
    OtpReport, PlanSource, PlanView, TimeRangeLabel, VoyageLeg,
};

// 引擎
pub use engine::{
    build_occupancy_matrix, docking_info_for_cell, find_conflicts, merge_legs, PlanViewBuilder,
};

// API
pub use api::{ActivityApi, ApiError, DockingApi, JadwalApi, LpkApi, OtpApi, PlanApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "PELNI 船舶航次排期系统";
