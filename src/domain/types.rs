// ==========================================
// 船舶航次排期系统 - 领域类型定义
// ==========================================
// 职责: 跨实体共享的枚举与值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 操作类型 (Action Type)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    ImportJadwal,    // 录入航次计划
    DeleteVoyage,    // 删除整个航次
    CreateDocking,   // 新增坞修期
    DeleteDocking,   // 删除坞修期
    ImportLpk,       // 录入实际航行记录 (LPK)
    PublishVoyage,   // 发布航次到公开计划
    UnpublishVoyage, // 撤回已发布航次
}

impl ActionType {
    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ActionType::ImportJadwal => "IMPORT_JADWAL",
            ActionType::DeleteVoyage => "DELETE_VOYAGE",
            ActionType::CreateDocking => "CREATE_DOCKING",
            ActionType::DeleteDocking => "DELETE_DOCKING",
            ActionType::ImportLpk => "IMPORT_LPK",
            ActionType::PublishVoyage => "PUBLISH_VOYAGE",
            ActionType::UnpublishVoyage => "UNPUBLISH_VOYAGE",
        }
    }

    /// 从数据库字符串解析
    ///
    /// 未知值返回 None（旧数据中可能存在已废弃的类型）
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IMPORT_JADWAL" => Some(ActionType::ImportJadwal),
            "DELETE_VOYAGE" => Some(ActionType::DeleteVoyage),
            "CREATE_DOCKING" => Some(ActionType::CreateDocking),
            "DELETE_DOCKING" => Some(ActionType::DeleteDocking),
            "IMPORT_LPK" => Some(ActionType::ImportLpk),
            "PUBLISH_VOYAGE" => Some(ActionType::PublishVoyage),
            "UNPUBLISH_VOYAGE" => Some(ActionType::UnpublishVoyage),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 计划来源 (Plan Source)
// ==========================================
// 草稿计划 (jadwal) 用于冲突预览; 公开计划 (plan public) 为已发布版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanSource {
    Draft,     // 草稿计划
    Published, // 公开计划
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanSource::Draft => write!(f, "DRAFT"),
            PlanSource::Published => write!(f, "PUBLISHED"),
        }
    }
}
