// ==========================================
// 船舶航次排期系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::planner_config_trait::PlannerConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::otp::OtpBands;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::sync::{Arc, Mutex};

type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// 内置船队名单
pub const DEFAULT_FLEET_ROSTER: [&str; 25] = [
    "KM. AWU",
    "KM. BINAIYA",
    "KM. BUKIT RAYA",
    "KM. BUKIT SIGUNTANG",
    "KM. CIREMAI",
    "KM. DOBONSOLO",
    "KM. DOROLONDA",
    "KM. EGON",
    "KFC. JET LINER",
    "KM. KELIMUTU",
    "KM. KELUD",
    "KM. LABOBAR",
    "KM. LAMBELU",
    "KM. LAWIT",
    "KM. LEUSER",
    "KM. NGGAPULU",
    "KM. PANGRANGO",
    "KM. SANGIANG",
    "KM. SIRIMAU",
    "KM. SINABUNG",
    "KM. TATAMAILAU",
    "KM. TIDAR",
    "KM. TILONGKABILA",
    "KM. GUNUNG DEMPO",
    "KM. WILIS",
];

/// 内置船队名单 (拥有所有权的副本)
pub fn default_fleet_roster() -> Vec<String> {
    DEFAULT_FLEET_ROSTER.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now', 'localtime')",
            params![key, value],
        )?;
        Ok(())
    }
}

// ==========================================
// PlannerConfigReader Trait 实现
// ==========================================
#[async_trait]
impl PlannerConfigReader for ConfigManager {
    async fn get_fleet_roster(&self) -> ConfigResult<Vec<String>> {
        let Some(raw) = self.get_global_config_value(config_keys::FLEET_ROSTER)? else {
            return Ok(default_fleet_roster());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(roster) if !roster.is_empty() => Ok(roster
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()),
            _ => {
                tracing::warn!(
                    config_key = config_keys::FLEET_ROSTER,
                    raw_value = %raw,
                    "船队名单配置格式错误，使用内置名单"
                );
                Ok(default_fleet_roster())
            }
        }
    }

    async fn get_otp_bands(&self) -> ConfigResult<OtpBands> {
        let Some(raw) = self.get_global_config_value(config_keys::OTP_BANDS)? else {
            return Ok(OtpBands::default());
        };

        Ok(serde_json::from_str::<OtpBands>(&raw).unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::OTP_BANDS,
                raw_value = %raw,
                "OTP 分档配置格式错误，使用默认分档"
            );
            OtpBands::default()
        }))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 船队名单 (JSON 数组)
    pub const FLEET_ROSTER: &str = "fleet_roster";

    // OTP 分档 (JSON: {"bands":[{"over_hours":48,"percentage":50},...],"on_time":100})
    pub const OTP_BANDS: &str = "otp_bands";
}
