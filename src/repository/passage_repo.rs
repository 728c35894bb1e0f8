// ==========================================
// 船舶航次排期系统 - 实际航行记录数据仓储
// ==========================================
// 对应: actual_passage 表 (LPK)
// ==========================================

use crate::domain::passage::{ActualPassage, NewActualPassage};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// PassageRepository - 实际航行记录仓储
// ==========================================
pub struct PassageRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PassageRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入某航次的实际航行记录
    pub fn batch_insert(
        &self,
        ship_name: &str,
        voyage_id: &str,
        passages: &[NewActualPassage],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO actual_passage (
                    ship_name, voyage_id, from_port, to_port, departed_at, arrived_at,
                    anchorage_start, anchorage_end, anchorage_minutes, distance_nm
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;
            for p in passages {
                stmt.execute(params![
                    ship_name,
                    voyage_id,
                    p.from_port,
                    p.to_port,
                    p.departed_at,
                    p.arrived_at,
                    p.anchorage_start,
                    p.anchorage_end,
                    p.anchorage_minutes,
                    p.distance_nm,
                ])?;
            }
        }

        tx.commit()?;
        Ok(passages.len())
    }

    /// 查询某航次的实际航行记录 (按出发时间排序)
    pub fn find_by_voyage(&self, ship_name: &str, voyage_id: &str) -> RepositoryResult<Vec<ActualPassage>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT passage_id, ship_name, voyage_id, from_port, to_port, departed_at, arrived_at,
                   anchorage_start, anchorage_end, anchorage_minutes, distance_nm
            FROM actual_passage
            WHERE ship_name = ?1 AND voyage_id = ?2
            ORDER BY departed_at, passage_id
            "#,
        )?;

        let passages = stmt
            .query_map(params![ship_name, voyage_id], |row| {
                Ok(ActualPassage {
                    passage_id: row.get(0)?,
                    ship_name: row.get(1)?,
                    voyage_id: row.get(2)?,
                    from_port: row.get(3)?,
                    to_port: row.get(4)?,
                    departed_at: row.get(5)?,
                    arrived_at: row.get(6)?,
                    anchorage_start: row.get(7)?,
                    anchorage_end: row.get(8)?,
                    anchorage_minutes: row.get(9)?,
                    distance_nm: row.get(10)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(passages)
    }
}
