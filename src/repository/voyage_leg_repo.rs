// ==========================================
// 船舶航次排期系统 - 航段数据仓储
// ==========================================
// 对应: voyage_leg 表 (草稿计划)
// 红线: Repository 不含业务逻辑, 只做数据映射
// 约束: 一个 (船名, 航次) 的计划整体替换, 在单个事务内完成
// ==========================================

use crate::domain::voyage::{LegFilter, NewVoyageLeg, VoyageLeg, VoyageSummary};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

/// 航段表公共列 (voyage_leg / public_plan_leg 同构)
pub(crate) const LEG_COLUMNS: &str = "record_id, ship_name, voyage_id, route_tag, port, arrival, departure, \
     speed_knots, distance_nm, tide_factor, berth_hours";

/// 行 → VoyageLeg
pub(crate) fn map_leg_row(row: &Row) -> SqliteResult<VoyageLeg> {
    Ok(VoyageLeg {
        record_id: row.get(0)?,
        ship_name: row.get(1)?,
        voyage_id: row.get(2)?,
        route_tag: row.get(3)?,
        port: row.get(4)?,
        arrival: row.get(5)?,
        departure: row.get(6)?,
        speed_knots: row.get(7)?,
        distance_nm: row.get(8)?,
        tide_factor: row.get(9)?,
        berth_hours: row.get(10)?,
    })
}

/// 按条件查询航段表 (按到港时间排序)
pub(crate) fn query_legs(conn: &Connection, table: &str, filter: &LegFilter) -> RepositoryResult<Vec<VoyageLeg>> {
    let sql = format!(
        "SELECT {} FROM {} \
         WHERE (?1 IS NULL OR ship_name = ?1) AND (?2 IS NULL OR voyage_id = ?2) \
         ORDER BY arrival, record_id",
        LEG_COLUMNS, table
    );
    let mut stmt = conn.prepare(&sql)?;
    let legs = stmt
        .query_map(params![filter.ship_name, filter.voyage_id], map_leg_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(legs)
}

// ==========================================
// VoyageLegRepository - 航段仓储
// ==========================================
pub struct VoyageLegRepository {
    conn: Arc<Mutex<Connection>>,
}

impl VoyageLegRepository {
    /// 创建新的航段仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 替换整个航次的计划
    ///
    /// # 返回
    /// - Ok(count): 写入的航段数
    pub fn replace_voyage(
        &self,
        ship_name: &str,
        voyage_id: &str,
        legs: &[NewVoyageLeg],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM voyage_leg WHERE ship_name = ?1 AND voyage_id = ?2",
            params![ship_name, voyage_id],
        )?;
        let count = insert_legs(&tx, legs)?;

        tx.commit()?;
        Ok(count)
    }

    /// 删除整个航次
    ///
    /// # 返回
    /// - Ok(rows): 被删除的行数 (0 表示航次不存在)
    pub fn delete_by_voyage(&self, ship_name: &str, voyage_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM voyage_leg WHERE ship_name = ?1 AND voyage_id = ?2",
            params![ship_name, voyage_id],
        )?;
        Ok(rows)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按条件查询航段
    pub fn find(&self, filter: &LegFilter) -> RepositoryResult<Vec<VoyageLeg>> {
        let conn = self.get_conn()?;
        query_legs(&conn, "voyage_leg", filter)
    }

    /// 查询全部航段
    pub fn find_all(&self) -> RepositoryResult<Vec<VoyageLeg>> {
        self.find(&LegFilter::all())
    }

    /// 航次摘要列表 (可按船名过滤)
    pub fn list_voyages(&self, ship_name: Option<&str>) -> RepositoryResult<Vec<VoyageSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT ship_name, voyage_id, COUNT(*), MIN(arrival), MAX(arrival)
            FROM voyage_leg
            WHERE (?1 IS NULL OR ship_name = ?1)
            GROUP BY ship_name, voyage_id
            ORDER BY ship_name, MIN(arrival)
            "#,
        )?;

        let summaries = stmt
            .query_map(params![ship_name], |row| {
                Ok(VoyageSummary {
                    ship_name: row.get(0)?,
                    voyage_id: row.get(1)?,
                    leg_count: row.get::<_, i64>(2)? as usize,
                    first_arrival: row.get(3)?,
                    last_arrival: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(summaries)
    }
}

fn insert_legs(tx: &Transaction<'_>, legs: &[NewVoyageLeg]) -> RepositoryResult<usize> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO voyage_leg (
            ship_name, voyage_id, route_tag, port, arrival, departure,
            speed_knots, distance_nm, tide_factor, berth_hours
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )?;

    for leg in legs {
        stmt.execute(params![
            leg.ship_name,
            leg.voyage_id,
            leg.route_tag,
            leg.port,
            leg.arrival,
            leg.departure,
            leg.speed_knots,
            leg.distance_nm,
            leg.tide_factor,
            leg.berth_hours,
        ])?;
    }

    Ok(legs.len())
}
