// ==========================================
// 船舶航次排期系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv/.txt）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    #[error("字段为空 (行 {row}, 字段 {field})")]
    EmptyField { row: usize, field: String },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 d-Mon-yy HH:MM，实际 '{value}'")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("离港早于到港 (行 {row}, 港口 {port}): ETA {eta}, ETD {etd}")]
    DepartureBeforeArrival {
        row: usize,
        port: String,
        eta: String,
        etd: String,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
