// ==========================================
// 船舶航次排期系统 - 操作日志领域模型
// ==========================================
// 红线: 所有写入操作必须记录
// 用途: 审计追踪, 首页最近动态
// 对齐: action_log 表
// ==========================================

use crate::domain::types::ActionType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,             // 日志ID (uuid)
    pub action_type: ActionType,       // 操作类型
    pub action_ts: NaiveDateTime,      // 操作时间戳
    pub actor: String,                 // 操作人
    pub ship_name: Option<String>,     // 关联船名
    pub voyage_id: Option<String>,     // 关联航次
    pub detail: Option<String>,        // 详细描述
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)
}

impl ActionLog {
    /// 以当前本地时间创建日志
    pub fn new(action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts: chrono::Local::now().naive_local(),
            actor: actor.to_string(),
            ship_name: None,
            voyage_id: None,
            detail: None,
            payload_json: None,
        }
    }

    pub fn with_voyage(mut self, ship_name: &str, voyage_id: Option<&str>) -> Self {
        self.ship_name = Some(ship_name.to_string());
        self.voyage_id = voyage_id.map(str::to_string);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }
}
