//! 积分服务错误类型
//!
//! 定义业务错误和系统错误，并负责转换为 HTTP 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 积分服务错误类型
#[derive(Debug, Error)]
pub enum PointsError {
    // === 业务错误 ===
    #[error("Item not found")]
    ItemNotFound(i64),

    /// 用户没有余额记录
    #[error("User not found")]
    BalanceNotFound(i64),

    #[error("Not enough points")]
    InsufficientPoints { required: i32, available: i32 },

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 积分服务 Result 类型别名
pub type Result<T> = std::result::Result<T, PointsError>;

impl PointsError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ItemNotFound(_) | Self::BalanceNotFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPoints { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::BalanceNotFound(_) => "USER_NOT_FOUND",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for PointsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let detail = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "Internal server error".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "code": self.error_code(),
            "detail": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        assert_eq!(PointsError::ItemNotFound(5).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PointsError::BalanceNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PointsError::InsufficientPoints {
                required: 30,
                available: 10
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PointsError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_is_business_error() {
        assert!(PointsError::ItemNotFound(1).is_business_error());
        assert!(
            PointsError::InsufficientPoints {
                required: 5,
                available: 3
            }
            .is_business_error()
        );
        assert!(!PointsError::Internal("boom".to_string()).is_business_error());
        assert!(!PointsError::Database(sqlx::Error::PoolClosed).is_business_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(PointsError::ItemNotFound(9).to_string(), "Item not found");
        assert_eq!(PointsError::BalanceNotFound(9).to_string(), "User not found");

        let err = PointsError::InsufficientPoints {
            required: 30,
            available: 10,
        };
        assert_eq!(err.to_string(), "Not enough points");
    }

    #[test]
    fn test_error_code() {
        assert_eq!(PointsError::ItemNotFound(1).error_code(), "ITEM_NOT_FOUND");
        assert_eq!(PointsError::BalanceNotFound(1).error_code(), "USER_NOT_FOUND");
        assert_eq!(
            PointsError::Internal("x".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[tokio::test]
    async fn test_system_error_hides_detail() {
        let response =
            PointsError::Internal("connection string leaked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["detail"], "Internal server error");
    }
}
