// ==========================================
// 船舶航次排期系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换 Repository / Importer 错误为用户友好的错误消息
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导入 / 配置错误
    // ==========================================
    #[error("导入失败: {0}")]
    ImportError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("检查约束违反: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件不存在: {}", path)),
            ImportError::UnsupportedFormat(_)
            | ImportError::MissingColumn(_)
            | ImportError::EmptyField { .. }
            | ImportError::DateFormatError { .. }
            | ImportError::DepartureBeforeArrival { .. } => ApiError::InvalidInput(err.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 通用输入校验
// ==========================================

/// 校验必填文本字段 (去空白后非空)
pub(crate) fn require_non_empty<'a>(value: &'a str, field: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "DockingPeriod".to_string(),
            id: "7".to_string(),
        };
        match ApiError::from(repo_err) {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("DockingPeriod"));
                assert!(msg.contains('7'));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }

        let repo_err = RepositoryError::CheckConstraintViolation("CHECK failed".to_string());
        assert!(matches!(ApiError::from(repo_err), ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_import_error_conversion() {
        let import_err = ImportError::DateFormatError {
            row: 3,
            field: "ETA".to_string(),
            value: "31-Foo-24".to_string(),
        };
        match ApiError::from(import_err) {
            ApiError::InvalidInput(msg) => assert!(msg.contains("31-Foo-24")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let import_err = ImportError::ExcelParseError("bad zip".to_string());
        assert!(matches!(ApiError::from(import_err), ApiError::ImportError(_)));
    }

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("  KM. AWU ", "船名").unwrap(), "KM. AWU");
        assert!(matches!(
            require_non_empty("   ", "船名"),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
