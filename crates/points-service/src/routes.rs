//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use points_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 用户、余额与积分流水
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{user_id}/balance", get(handlers::user::get_balance))
        .route(
            "/users/{user_id}/points/history",
            get(handlers::points::get_point_history),
        )
}

/// 兑换与商品目录
fn redemption_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/redeem/{item_id}",
            post(handlers::redemption::redeem),
        )
        .route(
            "/users/{user_id}/redemptions",
            get(handlers::redemption::list_redemptions),
        )
        .route("/items", get(handlers::item::list_items))
}

/// 根路径与探针
fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health_check))
        .route("/ready", get(handlers::system::readiness_check))
}

/// 全部 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(system_routes())
        .merge(user_routes())
        .merge(redemption_routes())
}

/// 构建完整的应用路由
///
/// 跨域请求不受限制（任意来源、方法、请求头）。
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api_routes()
        .layer(cors)
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
