// ==========================================
// 船舶航次排期系统 - 坞修期数据仓储
// ==========================================
// 对应: docking_period 表
// ==========================================

use crate::domain::docking::DockingPeriod;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DockingRepository - 坞修期仓储
// ==========================================
pub struct DockingRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DockingRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增坞修期
    ///
    /// # 返回
    /// - Ok(docking_id): 新记录ID
    pub fn insert(
        &self,
        ship_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        label: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO docking_period (ship_name, start_date, end_date, label) VALUES (?1, ?2, ?3, ?4)",
            params![ship_name, start_date, end_date, label],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 删除坞修期
    ///
    /// # 返回
    /// - Ok(rows): 被删除的行数
    pub fn delete(&self, docking_id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM docking_period WHERE docking_id = ?1",
            params![docking_id],
        )?;
        Ok(rows)
    }

    pub fn find_by_id(&self, docking_id: i64) -> RepositoryResult<Option<DockingPeriod>> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT docking_id, ship_name, start_date, end_date, label FROM docking_period WHERE docking_id = ?1",
                params![docking_id],
                map_row,
            )
            .optional()?;
        Ok(found)
    }

    /// 全部坞修期 (按开始日期排序)
    pub fn find_all(&self) -> RepositoryResult<Vec<DockingPeriod>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT docking_id, ship_name, start_date, end_date, label
            FROM docking_period
            ORDER BY start_date, ship_name, docking_id
            "#,
        )?;
        let periods = stmt
            .query_map([], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(periods)
    }
}

fn map_row(row: &Row) -> SqliteResult<DockingPeriod> {
    Ok(DockingPeriod {
        docking_id: row.get(0)?,
        ship_name: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        label: row.get(4)?,
    })
}
