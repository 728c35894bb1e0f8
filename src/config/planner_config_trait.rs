// ==========================================
// 船舶航次排期系统 - 排期配置读取 Trait
// ==========================================
// 职责: 定义计划视图 / OTP 所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::otp::OtpBands;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// PlannerConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait PlannerConfigReader: Send + Sync {
    /// 获取船队名单
    ///
    /// # 默认值
    /// - 内置 25 艘船舶名单
    async fn get_fleet_roster(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>>;

    /// 获取 OTP 分档表
    ///
    /// # 默认值
    /// - >48h 50 / >24h 60 / >12h 70 / >6h 80 / >2h 90 / 其余 100
    async fn get_otp_bands(&self) -> Result<OtpBands, Box<dyn Error + Send + Sync>>;
}
