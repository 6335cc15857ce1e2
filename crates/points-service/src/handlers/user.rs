//! 用户 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::Result,
    service::{BalanceDto, UserDto},
    state::AppState,
};

/// 用户列表
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>> {
    let users = state.query_service.list_users().await?;
    Ok(Json(users))
}

/// 用户积分余额
///
/// GET /users/{user_id}/balance
pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<BalanceDto>> {
    let balance = state.query_service.get_balance(user_id).await?;
    Ok(Json(balance))
}
