//! 根路径与探针

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::{SERVICE_NAME, service::WelcomeResponse, state::AppState};

/// 欢迎信息
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：存储不可用时返回 503
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_ok = match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "就绪检查失败");
            false
        }
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_ok { "ok" } else { "degraded" },
            "service": SERVICE_NAME,
            "checks": {
                "database": if db_ok { "ok" } else { "fail" }
            }
        })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::PointsError;
    use crate::repository::MockLedgerStore;

    fn state_with_health(healthy: bool) -> AppState {
        let mut store = MockLedgerStore::new();
        store.expect_health_check().times(1).returning(move || {
            if healthy {
                Ok(())
            } else {
                Err(PointsError::Database(sqlx::Error::PoolClosed))
            }
        });
        AppState::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_readiness_degraded_when_store_down() {
        let (status, Json(body)) = readiness_check(State(state_with_health(false))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["service"], SERVICE_NAME);
        assert_eq!(body["checks"]["database"], "fail");
    }

    #[tokio::test]
    async fn test_readiness_ok_when_store_up() {
        let (status, Json(body)) = readiness_check(State(state_with_health(true))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["checks"]["database"], "ok");
    }

    #[tokio::test]
    async fn test_health_check_reports_service_name() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], SERVICE_NAME);
    }
}
