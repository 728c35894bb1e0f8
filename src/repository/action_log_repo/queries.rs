use super::core::{ActionLogRepository, ACTION_TS_FORMAT};
use crate::domain::action_log::ActionLog;
use crate::domain::types::ActionType;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const SELECT_COLUMNS: &str = "SELECT action_id, action_type, action_ts, actor, ship_name, voyage_id, detail, payload_json FROM action_log";

impl ActionLogRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 action_id 查询单个日志
    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE action_id = ?1", SELECT_COLUMNS);

        let log = conn
            .query_row(&sql, params![action_id], |row| self.map_row(row))
            .optional()?;
        Ok(log)
    }

    /// 查询最近的 N 条日志 (新 → 旧)
    pub fn find_recent(&self, limit: u32) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY action_ts DESC, rowid DESC LIMIT ?1", SELECT_COLUMNS);

        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![limit], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 查询指定航次的日志 (新 → 旧)
    pub fn find_by_voyage(&self, ship_name: &str, voyage_id: &str) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE ship_name = ?1 AND voyage_id = ?2 ORDER BY action_ts DESC, rowid DESC",
            SELECT_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![ship_name, voyage_id], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 行映射
    fn map_row(&self, row: &Row) -> SqliteResult<ActionLog> {
        let action_type_raw: String = row.get(1)?;
        let action_type = ActionType::from_db_str(&action_type_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Text,
                format!("未知操作类型: {}", action_type_raw).into(),
            )
        })?;

        let ts_raw: String = row.get(2)?;
        let action_ts = NaiveDateTime::parse_from_str(&ts_raw, ACTION_TS_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        let payload_raw: Option<String> = row.get(7)?;
        let payload_json = payload_raw.and_then(|s| serde_json::from_str(&s).ok());

        Ok(ActionLog {
            action_id: row.get(0)?,
            action_type,
            action_ts,
            actor: row.get(3)?,
            ship_name: row.get(4)?,
            voyage_id: row.get(5)?,
            detail: row.get(6)?,
            payload_json,
        })
    }
}
