// ==========================================
// 船舶航次排期系统 - 导入层
// ==========================================
// 职责: 表格粘贴文本 / 文件 → 类型化记录
// 支持: Jadwal (航次计划), LPK (实际航行报告), CSV / Excel
// ==========================================

pub mod datetime_parser;
pub mod error;
pub mod file_parser;
pub mod jadwal_text_parser;
pub mod lpk_text_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    parse_jadwal_file, CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser,
};
pub use jadwal_text_parser::{parse_jadwal_text, ParsedJadwalRow};
pub use lpk_text_parser::{parse_lpk_text, LpkParseOutcome};
