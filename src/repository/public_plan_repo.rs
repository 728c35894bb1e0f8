// ==========================================
// 船舶航次排期系统 - 公开计划数据仓储
// ==========================================
// 对应: public_plan_leg 表
// 发布 = 在单个事务内将 voyage_leg 中某航次的航段整体复制到公开表
// ==========================================

use crate::domain::voyage::{LegFilter, VoyageLeg};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::voyage_leg_repo::query_legs;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// PublicPlanRepository - 公开计划仓储
// ==========================================
pub struct PublicPlanRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PublicPlanRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 发布航次 (替换此前发布的同一航次)
    ///
    /// # 返回
    /// - Ok(count): 复制的航段数, 0 表示草稿中无此航次 (此时不改动公开表)
    pub fn publish_voyage(&self, ship_name: &str, voyage_id: &str) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let draft_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM voyage_leg WHERE ship_name = ?1 AND voyage_id = ?2",
            params![ship_name, voyage_id],
            |row| row.get(0),
        )?;
        if draft_count == 0 {
            return Ok(0);
        }

        tx.execute(
            "DELETE FROM public_plan_leg WHERE ship_name = ?1 AND voyage_id = ?2",
            params![ship_name, voyage_id],
        )?;
        let copied = tx.execute(
            r#"
            INSERT INTO public_plan_leg (
                ship_name, voyage_id, route_tag, port, arrival, departure,
                speed_knots, distance_nm, tide_factor, berth_hours
            )
            SELECT ship_name, voyage_id, route_tag, port, arrival, departure,
                   speed_knots, distance_nm, tide_factor, berth_hours
            FROM voyage_leg
            WHERE ship_name = ?1 AND voyage_id = ?2
            ORDER BY arrival, record_id
            "#,
            params![ship_name, voyage_id],
        )?;

        tx.commit()?;
        Ok(copied)
    }

    /// 撤回已发布航次
    pub fn unpublish_voyage(&self, ship_name: &str, voyage_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM public_plan_leg WHERE ship_name = ?1 AND voyage_id = ?2",
            params![ship_name, voyage_id],
        )?;
        Ok(rows)
    }

    /// 按条件查询公开航段
    pub fn find(&self, filter: &LegFilter) -> RepositoryResult<Vec<VoyageLeg>> {
        let conn = self.get_conn()?;
        query_legs(&conn, "public_plan_leg", filter)
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<VoyageLeg>> {
        self.find(&LegFilter::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voyage::NewVoyageLeg;
    use crate::repository::voyage_leg_repo::VoyageLegRepository;
    use chrono::{NaiveDate, NaiveDateTime};

    fn setup_test_db() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn ts(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn leg(port: &str, arr: NaiveDateTime) -> NewVoyageLeg {
        NewVoyageLeg {
            ship_name: "KM. AWU".to_string(),
            voyage_id: "01".to_string(),
            route_tag: None,
            port: port.to_string(),
            arrival: arr,
            departure: None,
            speed_knots: None,
            distance_nm: None,
            tide_factor: None,
            berth_hours: None,
        }
    }

    #[test]
    fn test_publish_copies_and_replaces() {
        let conn = setup_test_db();
        let drafts = VoyageLegRepository::new(conn.clone());
        let public = PublicPlanRepository::new(conn);

        drafts.replace_voyage("KM. AWU", "01", &[leg("A", ts(1)), leg("B", ts(2))]).unwrap();
        assert_eq!(public.publish_voyage("KM. AWU", "01").unwrap(), 2);

        drafts.replace_voyage("KM. AWU", "01", &[leg("C", ts(3))]).unwrap();
        assert_eq!(public.publish_voyage("KM. AWU", "01").unwrap(), 1);

        let published = public.find_all().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].port, "C");
    }

    #[test]
    fn test_publish_missing_voyage_keeps_public_plan() {
        let conn = setup_test_db();
        let drafts = VoyageLegRepository::new(conn.clone());
        let public = PublicPlanRepository::new(conn);

        drafts.replace_voyage("KM. AWU", "01", &[leg("A", ts(1))]).unwrap();
        public.publish_voyage("KM. AWU", "01").unwrap();
        drafts.delete_by_voyage("KM. AWU", "01").unwrap();

        assert_eq!(public.publish_voyage("KM. AWU", "01").unwrap(), 0);
        assert_eq!(public.find_all().unwrap().len(), 1);
        assert_eq!(public.unpublish_voyage("KM. AWU", "01").unwrap(), 1);
    }
}
