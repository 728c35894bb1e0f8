// ==========================================
// 船舶航次排期系统 - 航次计划文本解析 (Jadwal)
// ==========================================
// 输入: 从表格复制的空白分隔文本, 每行一个港口
// 行格式 (从行尾向前解析):
// - 完整航段: <港口…> <5 列数值> <星期> <日期> <时间> <星期> <日期> <时间>
// - 航次终点 (少于 9 列): <港口…> <星期> <日期> <时间>
// 数值列: 第 1/3/5 列为 航程 / 潮汐因子 / 靠泊时长
// ==========================================

use crate::domain::voyage::NewVoyageLeg;
use crate::importer::datetime_parser::{parse_optional_schedule_datetime, parse_schedule_datetime};
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

/// 少于此列数的行直接跳过
const MIN_TOKENS: usize = 3;
/// 完整航段的最少列数
const FULL_LEG_TOKENS: usize = 9;
/// 数值列个数
const NUMERIC_COLUMNS: usize = 5;

// ==========================================
// ParsedJadwalRow - 解析后的一行 (日期时间尚未校验)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedJadwalRow {
    pub line_no: usize,              // 原文行号 (从 1 开始)
    pub port: String,                // 港口
    pub eta_text: String,            // 到港 "d-Mon-yy HH:MM"
    pub etd_text: Option<String>,    // 离港, 航次终点为 None
    pub distance_nm: Option<f64>,    // 航程
    pub tide_factor: Option<f64>,    // 潮汐因子
    pub berth_hours: Option<f64>,    // 靠泊时长
}

impl ParsedJadwalRow {
    /// 转换为待写入航段
    ///
    /// # 参数
    /// - ship_name / voyage_id / route_tag / speed_knots: 整批共享的航次属性
    ///
    /// # 错误
    /// - DateFormatError: ETA / ETD 无法解析
    /// - DepartureBeforeArrival: ETD 早于 ETA (ETD 等于 ETA 允许)
    pub fn into_new_leg(
        self,
        ship_name: &str,
        voyage_id: &str,
        route_tag: Option<&str>,
        speed_knots: Option<f64>,
    ) -> ImportResult<NewVoyageLeg> {
        let arrival = parse_schedule_datetime(&self.eta_text).ok_or_else(|| ImportError::DateFormatError {
            row: self.line_no,
            field: "ETA".to_string(),
            value: self.eta_text.clone(),
        })?;

        let departure = match &self.etd_text {
            Some(raw) => parse_optional_schedule_datetime(raw).map_err(|value| ImportError::DateFormatError {
                row: self.line_no,
                field: "ETD".to_string(),
                value,
            })?,
            None => None,
        };

        if let Some(departure) = departure.filter(|etd| *etd < arrival) {
            return Err(ImportError::DepartureBeforeArrival {
                row: self.line_no,
                port: self.port,
                eta: arrival.format("%Y-%m-%d %H:%M").to_string(),
                etd: departure.format("%Y-%m-%d %H:%M").to_string(),
            });
        }

        Ok(NewVoyageLeg {
            ship_name: ship_name.to_string(),
            voyage_id: voyage_id.to_string(),
            route_tag: route_tag.map(str::to_string),
            port: self.port,
            arrival,
            departure,
            speed_knots,
            distance_nm: self.distance_nm,
            tide_factor: self.tide_factor,
            berth_hours: self.berth_hours,
        })
    }
}

/// 清洗表格数值
///
/// - "-" → 0
/// - "(x)" → -x (会计负数写法)
/// - 无法解析 → None
pub fn clean_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s == "-" {
        return Some(0.0);
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse::<f64>().ok()
}

/// 解析整段文本
///
/// 列数不足或港口为空的行被跳过 (记录 debug 日志)
pub fn parse_jadwal_text(text: &str) -> Vec<ParsedJadwalRow> {
    let rows: Vec<ParsedJadwalRow> = text
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let row = parse_line(idx + 1, line);
            if row.is_none() && !line.trim().is_empty() {
                tracing::debug!(line_no = idx + 1, "Jadwal 行无法识别, 已跳过");
            }
            row
        })
        .collect();

    tracing::debug!(rows = rows.len(), "Jadwal 文本解析完成");
    rows
}

fn parse_line(line_no: usize, line: &str) -> Option<ParsedJadwalRow> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }

    let is_final_destination = tokens.len() < FULL_LEG_TOKENS;

    let (eta_text, etd_text) = if is_final_destination {
        let eta = pop_date_time(&mut tokens)?;
        (eta, None)
    } else {
        let etd = pop_date_time(&mut tokens)?;
        let eta = pop_date_time(&mut tokens)?;
        (eta, Some(etd))
    };

    let (distance_nm, tide_factor, berth_hours) = if is_final_destination {
        (None, None, None)
    } else {
        let split_at = tokens.len().saturating_sub(NUMERIC_COLUMNS);
        let numeric = tokens.split_off(split_at);
        let column = |i: usize| numeric.get(i).and_then(|raw| clean_number(raw));
        (column(0), column(2), column(4))
    };

    let port = tokens.join(" ");
    if port.is_empty() {
        return None;
    }

    Some(ParsedJadwalRow {
        line_no,
        port,
        eta_text,
        etd_text,
        distance_nm,
        tide_factor,
        berth_hours,
    })
}

/// 从行尾弹出 <星期> <日期> <时间>, 返回 "日期 时间"
fn pop_date_time(tokens: &mut Vec<&str>) -> Option<String> {
    let time = tokens.pop()?;
    let date = tokens.pop()?;
    tokens.pop()?; // 星期, 不使用
    Some(format!("{} {}", date, time))
}
