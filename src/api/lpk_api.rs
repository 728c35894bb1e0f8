// ==========================================
// 船舶航次排期系统 - 实际航行记录 (LPK) API
// ==========================================
// 职责: 粘贴 LPK 报告文本 → actual_passage
// 约束: 单行解析失败不中断整批, 行号返回给调用方
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::api::error::{require_non_empty, ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::domain::types::ActionType;
use crate::importer::lpk_text_parser::parse_lpk_text;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::passage_repo::PassageRepository;

/// LPK 导入结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpkImportSummary {
    pub imported: usize,        // 写入的航行记录数
    pub bad_lines: Vec<usize>,  // 无法解析的行号
}

// ==========================================
// LpkApi - 实际航行记录 API
// ==========================================
pub struct LpkApi {
    passage_repo: Arc<PassageRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl LpkApi {
    pub fn new(
        passage_repo: Arc<PassageRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            passage_repo,
            action_log_repo,
        }
    }

    /// 导入 LPK 文本 (制表符分隔, 每行至少 14 列)
    ///
    /// # 返回
    /// - Ok(summary): 写入条数与失败行号
    /// - Err(InvalidInput): 没有任何一行可解析
    pub fn import_text(
        &self,
        ship_name: &str,
        voyage_id: &str,
        text: &str,
        actor: &str,
    ) -> ApiResult<LpkImportSummary> {
        let ship_name = require_non_empty(ship_name, "船名")?;
        let voyage_id = require_non_empty(voyage_id, "航次号")?;

        let outcome = parse_lpk_text(text);
        if outcome.passages.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "未解析到任何航行记录 (失败行: {:?})",
                outcome.bad_lines
            )));
        }
        if !outcome.bad_lines.is_empty() {
            warn!(
                ship = ship_name,
                voyage = voyage_id,
                bad_lines = ?outcome.bad_lines,
                "部分 LPK 行被跳过"
            );
        }

        let imported = self
            .passage_repo
            .batch_insert(ship_name, voyage_id, &outcome.passages)?;

        let log = ActionLog::new(ActionType::ImportLpk, actor)
            .with_voyage(ship_name, Some(voyage_id))
            .with_detail(format!("录入 LPK: {} {} ({} 段)", ship_name, voyage_id, imported))
            .with_payload(json!({
                "imported": imported,
                "bad_lines": outcome.bad_lines,
            }));
        self.action_log_repo.insert(&log)?;

        info!(ship = ship_name, voyage = voyage_id, imported, "LPK 已录入");
        Ok(LpkImportSummary {
            imported,
            bad_lines: outcome.bad_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> (LpkApi, Arc<PassageRepository>) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        let passages = Arc::new(PassageRepository::new(conn.clone()));
        (
            LpkApi::new(passages.clone(), Arc::new(ActionLogRepository::new(conn))),
            passages,
        )
    }

    #[test]
    fn test_import_keeps_good_rows() {
        let (api, passages) = api();
        let good = [
            "TANJUNG PRIOK", "SURABAYA", "29-Dec-24", "14:30", "30-Dec-24", "12:00",
            "", "", "", "", "", "", "", "398",
        ]
        .join("\t");
        let text = format!("{}\nrusak\t baris\n", good);

        let summary = api.import_text("KM. AWU", "01", &text, "planner").unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.bad_lines, vec![2]);

        let stored = passages.find_by_voyage("KM. AWU", "01").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].distance_nm, 398);
    }

    #[test]
    fn test_import_without_valid_rows_fails() {
        let (api, _) = api();
        assert!(matches!(
            api.import_text("KM. AWU", "01", "a\tb\tc", "planner"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.import_text("", "01", "a", "planner"),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
