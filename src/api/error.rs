// ==========================================
// 餐厅 POS 后台 - API层错误类型
// ==========================================
// 职责: 定义业务操作的类型化失败
// - Validation: 违反业务规则/输入不合法（调用方可修正，不重试）
// - NotFound:   操作所需的实体不存在（调用方可修正）
// - Repository: 基础设施故障，原样透传，不做业务解释
// ==========================================

use crate::domain::error::DomainError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("数据验证失败: {0}")]
    Validation(String),

    #[error("资源未找到: {entity}(id={id})")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ApiError::NotFound { entity, id }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// 是否为基础设施故障（边界层映射为通用失败响应）
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, ApiError::Repository(_))
    }
}

// ==========================================
// 从 DomainError 转换
// 说明: 构造校验失败一律视为 Validation
// ==========================================
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_becomes_validation() {
        let api_err: ApiError = DomainError::InvalidPrice("-1".to_string()).into();
        assert!(api_err.is_validation());
        assert!(api_err.to_string().contains("-1"));

        let api_err: ApiError = DomainError::AmountOverflow("menu_product").into();
        assert!(api_err.is_validation());
    }

    #[test]
    fn test_repository_error_passes_through_unmodified() {
        let repo_err = RepositoryError::DatabaseQueryError("disk I/O error".to_string());
        let api_err: ApiError = repo_err.into();
        assert!(api_err.is_infrastructure());
        assert_eq!(api_err.to_string(), "数据库查询失败: disk I/O error");
        match api_err {
            ApiError::Repository(RepositoryError::DatabaseQueryError(msg)) => {
                assert_eq!(msg, "disk I/O error");
            }
            _ => panic!("Expected Repository(DatabaseQueryError)"),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("Order", 200);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "资源未找到: Order(id=200)");
    }
}
