// ==========================================
// 船舶航次排期系统 - 准点率 (OTP) API
// ==========================================
// 职责: 草稿计划 (ETA/ETD) 与 LPK 实际记录比对
// ==========================================

use std::sync::Arc;

use tracing::debug;

use crate::api::error::{require_non_empty, ApiError, ApiResult};
use crate::config::PlannerConfigReader;
use crate::domain::otp::OtpReport;
use crate::domain::voyage::LegFilter;
use crate::engine::otp::calculate_otp;
use crate::repository::passage_repo::PassageRepository;
use crate::repository::voyage_leg_repo::VoyageLegRepository;

pub struct OtpApi {
    leg_repo: Arc<VoyageLegRepository>,
    passage_repo: Arc<PassageRepository>,
    config: Arc<dyn PlannerConfigReader>,
}

impl OtpApi {
    pub fn new(
        leg_repo: Arc<VoyageLegRepository>,
        passage_repo: Arc<PassageRepository>,
        config: Arc<dyn PlannerConfigReader>,
    ) -> Self {
        Self {
            leg_repo,
            passage_repo,
            config,
        }
    }

    /// 计算航次准点率
    ///
    /// # 返回
    /// - Err(NotFound): 航次无计划、无实际记录或无任何港口匹配
    pub async fn calculate(&self, ship_name: &str, voyage_id: &str) -> ApiResult<OtpReport> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let voyage_id = require_non_empty(voyage_id, "航次号")?;

        let planned = self.leg_repo.find(&LegFilter::voyage(ship_name, voyage_id))?;
        let actual = self.passage_repo.find_by_voyage(ship_name, voyage_id)?;
        let bands = self
            .config
            .get_otp_bands()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        debug!(
            ship = ship_name,
            voyage = voyage_id,
            planned = planned.len(),
            actual = actual.len(),
            "计算 OTP"
        );

        calculate_otp(&planned, &actual, &bands).ok_or_else(|| {
            ApiError::NotFound(format!("航次 {} {} 无可比对的 OTP 数据", ship_name, voyage_id))
        })
    }
}
