// ==========================================
// 船舶航次排期系统 - 航次计划 (Jadwal) API
// ==========================================
// 职责: 航次计划录入 (粘贴文本 / 表格文件)、查询、删除
// 约束: 同一 (船名, 航次) 的计划整体替换, 单事务完成
// ==========================================

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::api::error::{require_non_empty, ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::domain::types::ActionType;
use crate::domain::voyage::{LegFilter, NewVoyageLeg, VoyageLeg, VoyageSummary};
use crate::importer::file_parser::parse_jadwal_file;
use crate::importer::jadwal_text_parser::{parse_jadwal_text, ParsedJadwalRow};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::voyage_leg_repo::VoyageLegRepository;

// ==========================================
// VoyageHeader - 整批共享的航次属性 (已校验)
// ==========================================
#[derive(Debug)]
struct VoyageHeader {
    ship_name: String,
    voyage_id: String,
    route_tag: Option<String>,
    speed_knots: Option<f64>,
}

impl VoyageHeader {
    fn validate(
        ship_name: &str,
        voyage_id: &str,
        route_tag: Option<&str>,
        speed_knots: Option<f64>,
    ) -> ApiResult<Self> {
        let ship_name = require_non_empty(ship_name, "船名")?.to_string();
        let voyage_id = require_non_empty(voyage_id, "航次号")?.to_string();

        let route_tag = route_tag.map(str::trim).filter(|r| !r.is_empty());
        if let Some(route) = route_tag {
            if route.chars().count() > 1 {
                return Err(ApiError::InvalidInput(format!(
                    "航线标记最多 1 个字符: '{}'",
                    route
                )));
            }
        }

        if let Some(speed) = speed_knots {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ApiError::InvalidInput(format!("航速必须为正数: {}", speed)));
            }
        }

        Ok(Self {
            ship_name,
            voyage_id,
            route_tag: route_tag.map(str::to_string),
            speed_knots,
        })
    }
}

// ==========================================
// JadwalApi - 航次计划 API
// ==========================================
pub struct JadwalApi {
    leg_repo: Arc<VoyageLegRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl JadwalApi {
    pub fn new(
        leg_repo: Arc<VoyageLegRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            leg_repo,
            action_log_repo,
        }
    }

    /// 录入粘贴的航次计划文本 (替换该航次原有计划)
    ///
    /// # 参数
    /// - route_tag: 航线标记, 最多 1 个字符
    /// - speed_knots: 航速, 须为正数
    /// - text: 从表格复制的文本
    ///
    /// # 返回
    /// - Ok(count): 写入的航段数
    pub fn import_voyage_text(
        &self,
        ship_name: &str,
        voyage_id: &str,
        route_tag: Option<&str>,
        speed_knots: Option<f64>,
        text: &str,
        actor: &str,
    ) -> ApiResult<usize> {
        let header = VoyageHeader::validate(ship_name, voyage_id, route_tag, speed_knots)?;
        if text.trim().is_empty() {
            return Err(ApiError::InvalidInput("航次计划文本不能为空".to_string()));
        }

        let rows = parse_jadwal_text(text);
        self.store_rows(header, rows, actor, "text")
    }

    /// 从 .csv / .xlsx 文件录入航次计划
    ///
    /// 表头: Pelabuhan, ETA, ETD (可选 Jarak, Pasang Surut, Jam Labuh)
    pub fn import_voyage_file(
        &self,
        ship_name: &str,
        voyage_id: &str,
        route_tag: Option<&str>,
        speed_knots: Option<f64>,
        path: &Path,
        actor: &str,
    ) -> ApiResult<usize> {
        let header = VoyageHeader::validate(ship_name, voyage_id, route_tag, speed_knots)?;
        let rows = parse_jadwal_file(path)?;
        self.store_rows(header, rows, actor, "file")
    }

    fn store_rows(
        &self,
        header: VoyageHeader,
        rows: Vec<ParsedJadwalRow>,
        actor: &str,
        source: &str,
    ) -> ApiResult<usize> {
        if rows.is_empty() {
            warn!(ship = %header.ship_name, voyage = %header.voyage_id, source, "未解析到任何航段");
            return Err(ApiError::InvalidInput("未解析到任何航段".to_string()));
        }

        let legs = rows
            .into_iter()
            .map(|row| {
                row.into_new_leg(
                    &header.ship_name,
                    &header.voyage_id,
                    header.route_tag.as_deref(),
                    header.speed_knots,
                )
            })
            .collect::<Result<Vec<NewVoyageLeg>, _>>()?;

        let count = self
            .leg_repo
            .replace_voyage(&header.ship_name, &header.voyage_id, &legs)?;

        let log = ActionLog::new(ActionType::ImportJadwal, actor)
            .with_voyage(&header.ship_name, Some(&header.voyage_id))
            .with_detail(format!(
                "录入航次计划: {} {} ({} 个港口)",
                header.ship_name, header.voyage_id, count
            ))
            .with_payload(json!({
                "source": source,
                "route_tag": header.route_tag,
                "speed_knots": header.speed_knots,
                "leg_count": count,
            }));
        self.action_log_repo.insert(&log)?;

        info!(
            ship = %header.ship_name,
            voyage = %header.voyage_id,
            legs = count,
            source,
            "航次计划已录入"
        );
        Ok(count)
    }

    /// 查询航段 (按到港时间排序)
    pub fn list_legs(&self, filter: &LegFilter) -> ApiResult<Vec<VoyageLeg>> {
        Ok(self.leg_repo.find(filter)?)
    }

    /// 航次摘要列表
    pub fn list_voyages(&self, ship_name: Option<&str>) -> ApiResult<Vec<VoyageSummary>> {
        let ship_name = ship_name.map(str::trim).filter(|s| !s.is_empty());
        Ok(self.leg_repo.list_voyages(ship_name)?)
    }

    /// 删除整个航次
    ///
    /// # 返回
    /// - Ok(rows): 删除的航段数
    /// - Err(NotFound): 航次不存在
    pub fn delete_voyage(&self, ship_name: &str, voyage_id: &str, actor: &str) -> ApiResult<usize> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let voyage_id = require_non_empty(voyage_id, "航次号")?;

        let rows = self.leg_repo.delete_by_voyage(ship_name, voyage_id)?;
        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "航次不存在: {} {}",
                ship_name, voyage_id
            )));
        }

        let log = ActionLog::new(ActionType::DeleteVoyage, actor)
            .with_voyage(ship_name, Some(voyage_id))
            .with_detail(format!("删除航次: {} {} ({} 个港口)", ship_name, voyage_id, rows))
            .with_payload(json!({ "deleted_legs": rows }));
        self.action_log_repo.insert(&log)?;

        info!(ship = ship_name, voyage = voyage_id, rows, "航次已删除");
        Ok(rows)
    }
}
