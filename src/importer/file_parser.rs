// ==========================================
// 船舶航次排期系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)
// 输出: 表头 → 单元格文本 的原始记录, 再映射为 Jadwal 行
// ==========================================

use crate::importer::datetime_parser::is_missing;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::jadwal_text_parser::{clean_number, ParsedJadwalRow};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 一行原始记录
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub row_no: usize,                  // 源文件中的行号 (从 1 开始, 表头为第 1 行)
    pub fields: HashMap<String, String>, // 表头 → 值
}

impl RawRecord {
    fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

// ==========================================
// FileParser - 文件解析接口
// ==========================================
pub trait FileParser {
    /// 解析文件为原始记录 (首行为表头, 跳过全空行)
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // csv 会静默跳过空行, 行号以读取位置为准
            let row_no = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(idx + 2);
            let raw = RawRecord {
                row_no,
                fields: headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.clone(), v.trim().to_string()))
                    .collect(),
            };

            // 跳过完全空白的行
            if raw.is_blank() {
                continue;
            }
            records.push(raw);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 日期单元格需以文本形式保存 (与粘贴格式一致)
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域可能不从 A1 开始
        let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let raw = RawRecord {
                row_no: first_row + idx + 1,
                fields: headers
                    .iter()
                    .zip(data_row.iter())
                    .map(|(h, cell)| (h.clone(), cell.to_string().trim().to_string()))
                    .collect(),
            };

            if raw.is_blank() {
                continue;
            }
            records.push(raw);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" => ExcelParser.parse_to_raw_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ==========================================
// Jadwal 表格映射
// ==========================================
// 必需列: Pelabuhan / ETA / ETD (不区分大小写)
// 可选列: Jarak / Pasang Surut / Jam Labuh

const COL_PORT: &str = "pelabuhan";
const COL_ETA: &str = "eta";
const COL_ETD: &str = "etd";
const COL_DISTANCE: &str = "jarak";
const COL_TIDE: &str = "pasang surut";
const COL_BERTH: &str = "jam labuh";

fn lookup<'a>(record: &'a RawRecord, column: &str) -> Option<&'a str> {
    record
        .fields
        .iter()
        .find(|(header, _)| header.trim().eq_ignore_ascii_case(column))
        .map(|(_, value)| value.as_str())
}

/// 原始记录 → Jadwal 行
///
/// 行号沿用源文件行号 (空行已跳过但不影响编号)
pub fn jadwal_rows_from_records(records: &[RawRecord]) -> ImportResult<Vec<ParsedJadwalRow>> {
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let line_no = record.row_no;

        let port = lookup(record, COL_PORT).ok_or_else(|| ImportError::MissingColumn("Pelabuhan".to_string()))?;
        let eta = lookup(record, COL_ETA).ok_or_else(|| ImportError::MissingColumn("ETA".to_string()))?;
        let etd = lookup(record, COL_ETD).ok_or_else(|| ImportError::MissingColumn("ETD".to_string()))?;

        if port.is_empty() {
            return Err(ImportError::EmptyField {
                row: line_no,
                field: "Pelabuhan".to_string(),
            });
        }
        if eta.is_empty() {
            return Err(ImportError::EmptyField {
                row: line_no,
                field: "ETA".to_string(),
            });
        }

        let number = |column: &str| lookup(record, column).and_then(clean_number);

        rows.push(ParsedJadwalRow {
            line_no,
            port: port.to_string(),
            eta_text: eta.to_string(),
            etd_text: (!is_missing(etd)).then(|| etd.to_string()),
            distance_nm: number(COL_DISTANCE),
            tide_factor: number(COL_TIDE),
            berth_hours: number(COL_BERTH),
        });
    }

    Ok(rows)
}

/// 解析 Jadwal 表格文件
pub fn parse_jadwal_file<P: AsRef<Path>>(file_path: P) -> ImportResult<Vec<ParsedJadwalRow>> {
    let records = UniversalFileParser.parse(file_path)?;
    jadwal_rows_from_records(&records)
}
