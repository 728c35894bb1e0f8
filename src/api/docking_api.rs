// ==========================================
// 船舶航次排期系统 - 坞修期 API
// ==========================================
// 职责: 坞修期录入、查询、删除
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use crate::api::error::{require_non_empty, ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::domain::docking::DockingPeriod;
use crate::domain::types::ActionType;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::docking_repo::DockingRepository;

// ==========================================
// DockingApi - 坞修期 API
// ==========================================
pub struct DockingApi {
    docking_repo: Arc<DockingRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl DockingApi {
    pub fn new(
        docking_repo: Arc<DockingRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            docking_repo,
            action_log_repo,
        }
    }

    /// 新增坞修期
    ///
    /// # 返回
    /// - Ok(DockingPeriod): 新建记录
    /// - Err(InvalidInput): 字段为空或 end_date < start_date
    pub fn create(
        &self,
        ship_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        label: &str,
        actor: &str,
    ) -> ApiResult<DockingPeriod> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let label = require_non_empty(label, "坞修说明")?;
        if end_date < start_date {
            return Err(ApiError::InvalidInput(format!(
                "结束日期 {} 早于开始日期 {}",
                end_date, start_date
            )));
        }

        let docking_id = self
            .docking_repo
            .insert(ship_name, start_date, end_date, label)?;

        let log = ActionLog::new(ActionType::CreateDocking, actor)
            .with_voyage(ship_name, None)
            .with_detail(format!(
                "新增坞修期: {} {} ~ {} ({})",
                ship_name, start_date, end_date, label
            ))
            .with_payload(json!({
                "docking_id": docking_id,
                "start_date": start_date.to_string(),
                "end_date": end_date.to_string(),
                "label": label,
            }));
        self.action_log_repo.insert(&log)?;

        info!(ship = ship_name, docking_id, %start_date, %end_date, "坞修期已新增");
        Ok(DockingPeriod {
            docking_id,
            ship_name: ship_name.to_string(),
            start_date,
            end_date,
            label: label.to_string(),
        })
    }

    /// 全部坞修期 (按开始日期排序)
    pub fn list(&self) -> ApiResult<Vec<DockingPeriod>> {
        Ok(self.docking_repo.find_all()?)
    }

    /// 删除坞修期
    pub fn delete(&self, docking_id: i64, actor: &str) -> ApiResult<()> {
        let period = self
            .docking_repo
            .find_by_id(docking_id)?
            .ok_or_else(|| ApiError::NotFound(format!("坞修期(id={})不存在", docking_id)))?;

        self.docking_repo.delete(docking_id)?;

        let log = ActionLog::new(ActionType::DeleteDocking, actor)
            .with_voyage(&period.ship_name, None)
            .with_detail(format!(
                "删除坞修期: {} {} ~ {}",
                period.ship_name, period.start_date, period.end_date
            ))
            .with_payload(json!({ "docking_id": docking_id }));
        self.action_log_repo.insert(&log)?;

        info!(ship = %period.ship_name, docking_id, "坞修期已删除");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn api() -> (DockingApi, Arc<ActionLogRepository>) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        let logs = Arc::new(ActionLogRepository::new(conn.clone()));
        (
            DockingApi::new(Arc::new(DockingRepository::new(conn)), logs.clone()),
            logs,
        )
    }

    #[test]
    fn test_create_list_delete() {
        let (api, logs) = api();

        let period = api
            .create("KM. KELUD", d(3, 1), d(3, 14), "DOCKING TAHUNAN", "planner")
            .unwrap();
        assert_eq!(period.span_days(), 14);
        assert_eq!(api.list().unwrap(), vec![period.clone()]);

        api.delete(period.docking_id, "planner").unwrap();
        assert!(api.list().unwrap().is_empty());

        let types: Vec<ActionType> = logs
            .find_recent(10)
            .unwrap()
            .into_iter()
            .map(|l| l.action_type)
            .collect();
        assert_eq!(types, vec![ActionType::DeleteDocking, ActionType::CreateDocking]);
    }

    #[test]
    fn test_single_day_docking_is_allowed() {
        let (api, _) = api();
        assert!(api.create("KM. KELUD", d(3, 1), d(3, 1), "INSPEKSI", "planner").is_ok());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let (api, _) = api();

        assert!(matches!(
            api.create("KM. KELUD", d(3, 2), d(3, 1), "DOCKING", "planner"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.create(" ", d(3, 1), d(3, 2), "DOCKING", "planner"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.create("KM. KELUD", d(3, 1), d(3, 2), "", "planner"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(api.delete(42, "planner"), Err(ApiError::NotFound(_))));
    }
}
