// ==========================================
// 船舶航次排期系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ActivityApi, DockingApi, JadwalApi, LpkApi, OtpApi, PlanApi};
use crate::config::{ConfigManager, PlannerConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{
    ActionLogRepository, DockingRepository, PassageRepository, PublicPlanRepository,
    VoyageLegRepository,
};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "VOYAGE_PLANNER_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源, 由外层 (命令行 / 服务) 持有
pub struct AppState {
    /// 数据库路径
    pub db_path: String,
    /// 航次计划API
    pub jadwal_api: Arc<JadwalApi>,
    /// 坞修期API
    pub docking_api: Arc<DockingApi>,
    /// LPK API
    pub lpk_api: Arc<LpkApi>,
    /// 准点率API
    pub otp_api: Arc<OtpApi>,
    /// 计划视图 / 发布API
    pub plan_api: Arc<PlanApi>,
    /// 最近动态API
    pub activity_api: Arc<ActivityApi>,
    /// 配置管理器（用于覆写船队名单 / OTP 分档）
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并初始化表结构
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let leg_repo = Arc::new(VoyageLegRepository::new(conn.clone()));
        let public_repo = Arc::new(PublicPlanRepository::new(conn.clone()));
        let docking_repo = Arc::new(DockingRepository::new(conn.clone()));
        let passage_repo = Arc::new(PassageRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn PlannerConfigReader> = config_manager.clone();

        // ==========================================
        // 初始化API层
        // ==========================================
        let jadwal_api = Arc::new(JadwalApi::new(leg_repo.clone(), action_log_repo.clone()));
        let docking_api = Arc::new(DockingApi::new(docking_repo.clone(), action_log_repo.clone()));
        let lpk_api = Arc::new(LpkApi::new(passage_repo.clone(), action_log_repo.clone()));
        let otp_api = Arc::new(OtpApi::new(
            leg_repo.clone(),
            passage_repo,
            config_reader.clone(),
        ));
        let plan_api = Arc::new(PlanApi::new(
            leg_repo,
            public_repo,
            docking_repo,
            action_log_repo.clone(),
            config_reader,
        ));
        let activity_api = Arc::new(ActivityApi::new(action_log_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            jadwal_api,
            docking_api,
            lpk_api,
            otp_api,
            plan_api,
            activity_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 VOYAGE_PLANNER_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./voyage_planner.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("pelni-voyage-planner");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("voyage_planner.db");
        }
    }

    path.to_string_lossy().to_string()
}
