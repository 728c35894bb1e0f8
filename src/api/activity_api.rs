// ==========================================
// 船舶航次排期系统 - 最近动态 API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::repository::action_log_repo::ActionLogRepository;

/// 默认返回条数
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 20;

pub struct ActivityApi {
    action_log_repo: Arc<ActionLogRepository>,
}

impl ActivityApi {
    pub fn new(action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self { action_log_repo }
    }

    /// 最近的操作日志 (新 → 旧)
    pub fn recent(&self, limit: Option<u32>) -> ApiResult<Vec<ActionLog>> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }
        Ok(self.action_log_repo.find_recent(limit)?)
    }

    /// 某航次的操作日志
    pub fn for_voyage(&self, ship_name: &str, voyage_id: &str) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.find_by_voyage(ship_name, voyage_id)?)
    }
}
