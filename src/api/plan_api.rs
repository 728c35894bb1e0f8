// ==========================================
// 船舶航次排期系统 - 计划视图 / 发布 API
// ==========================================
// 职责:
// 1. 计划预览 (草稿计划 + 冲突 + 坞修覆盖)
// 2. 公开计划 (已发布计划)
// 3. 发布航次 (草稿 → 公开, 单事务) / 撤回发布
// ==========================================

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::api::error::{require_non_empty, ApiError, ApiResult};
use crate::config::PlannerConfigReader;
use crate::domain::action_log::ActionLog;
use crate::domain::plan_view::PlanView;
use crate::domain::types::{ActionType, PlanSource};
use crate::domain::voyage::VoyageLeg;
use crate::engine::plan_preview::PlanViewBuilder;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::docking_repo::DockingRepository;
use crate::repository::public_plan_repo::PublicPlanRepository;
use crate::repository::voyage_leg_repo::VoyageLegRepository;

// ==========================================
// PlanApi - 计划视图 API
// ==========================================
pub struct PlanApi {
    leg_repo: Arc<VoyageLegRepository>,
    public_repo: Arc<PublicPlanRepository>,
    docking_repo: Arc<DockingRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    config: Arc<dyn PlannerConfigReader>,
}

impl PlanApi {
    pub fn new(
        leg_repo: Arc<VoyageLegRepository>,
        public_repo: Arc<PublicPlanRepository>,
        docking_repo: Arc<DockingRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        config: Arc<dyn PlannerConfigReader>,
    ) -> Self {
        Self {
            leg_repo,
            public_repo,
            docking_repo,
            action_log_repo,
            config,
        }
    }

    /// 发布航次到公开计划 (替换此前发布的副本)
    ///
    /// # 返回
    /// - Ok(count): 发布的航段数
    /// - Err(NotFound): 草稿中无此航次
    pub fn publish_voyage(&self, ship_name: &str, voyage_id: &str, actor: &str) -> ApiResult<usize> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let voyage_id = require_non_empty(voyage_id, "航次号")?;

        let count = self.public_repo.publish_voyage(ship_name, voyage_id)?;
        if count == 0 {
            return Err(ApiError::NotFound(format!(
                "航次不存在: {} {}",
                ship_name, voyage_id
            )));
        }

        let log = ActionLog::new(ActionType::PublishVoyage, actor)
            .with_voyage(ship_name, Some(voyage_id))
            .with_detail(format!("发布航次: {} {} ({} 个港口)", ship_name, voyage_id, count))
            .with_payload(json!({ "published_legs": count }));
        self.action_log_repo.insert(&log)?;

        info!(ship = ship_name, voyage = voyage_id, legs = count, "航次已发布");
        Ok(count)
    }

    /// 撤回已发布航次 (草稿不受影响)
    pub fn unpublish_voyage(&self, ship_name: &str, voyage_id: &str, actor: &str) -> ApiResult<usize> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let voyage_id = require_non_empty(voyage_id, "航次号")?;

        let count = self.public_repo.unpublish_voyage(ship_name, voyage_id)?;
        if count == 0 {
            return Err(ApiError::NotFound(format!(
                "公开计划中无此航次: {} {}",
                ship_name, voyage_id
            )));
        }

        let log = ActionLog::new(ActionType::UnpublishVoyage, actor)
            .with_voyage(ship_name, Some(voyage_id))
            .with_detail(format!("撤回发布: {} {}", ship_name, voyage_id))
            .with_payload(json!({ "removed_legs": count }));
        self.action_log_repo.insert(&log)?;

        info!(ship = ship_name, voyage = voyage_id, legs = count, "航次已撤回发布");
        Ok(count)
    }

    /// 计划预览 (草稿计划)
    pub async fn plan_preview(&self) -> ApiResult<PlanView> {
        let legs = self.leg_repo.find_all()?;
        self.build_view(PlanSource::Draft, &legs).await
    }

    /// 公开计划 (已发布计划)
    pub async fn plan_public(&self) -> ApiResult<PlanView> {
        let legs = self.public_repo.find_all()?;
        self.build_view(PlanSource::Published, &legs).await
    }

    async fn build_view(&self, source: PlanSource, legs: &[VoyageLeg]) -> ApiResult<PlanView> {
        let roster = self
            .config
            .get_fleet_roster()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let dockings = self.docking_repo.find_all()?;

        Ok(PlanViewBuilder::new(roster).build(source, legs, &dockings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use rusqlite::Connection;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_publish_unknown_voyage_is_not_found() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        let api = PlanApi::new(
            Arc::new(VoyageLegRepository::new(conn.clone())),
            Arc::new(PublicPlanRepository::new(conn.clone())),
            Arc::new(DockingRepository::new(conn.clone())),
            Arc::new(ActionLogRepository::new(conn.clone())),
            Arc::new(ConfigManager::from_connection(conn).unwrap()),
        );

        assert!(matches!(
            api.publish_voyage("KM. AWU", "99", "planner"),
            Err(ApiError::NotFound(_))
        ));

        let view = api.plan_public().await.unwrap();
        assert_eq!(view.source, PlanSource::Published);
        assert_eq!(view.rows.len(), 25);
        assert!(view.day_headers.is_empty());

        assert!(matches!(
            api.unpublish_voyage("KM. AWU", "99", "planner"),
            Err(ApiError::NotFound(_))
        ));
    }
}
