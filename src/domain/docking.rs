// ==========================================
// 船舶航次排期系统 - 坞修期领域模型
// ==========================================
// 对应: docking_period 表
// 约束: start_date <= end_date (由 DockingApi 校验)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DockingPeriod - 坞修期
// ==========================================
// 坞修期间船舶停航, 计划视图中以整段覆盖该船的日程单元格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingPeriod {
    pub docking_id: i64,       // 记录ID
    pub ship_name: String,     // 船名
    pub start_date: NaiveDate, // 开始日期 (含)
    pub end_date: NaiveDate,   // 结束日期 (含)
    pub label: String,         // 坞修说明
}

impl DockingPeriod {
    /// 判断日期是否落在坞修期内 (闭区间, 仅比较日期)
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// 坞修天数 (含首尾)
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
