//! 积分兑换 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::Result,
    service::{RedeemResponse, RedemptionDto},
    state::AppState,
};

/// 使用积分兑换商品
///
/// POST /users/{user_id}/redeem/{item_id}
pub async fn redeem(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<RedeemResponse>> {
    let response = state.redemption_service.redeem(user_id, item_id).await?;
    Ok(Json(response))
}

/// 用户兑换记录
///
/// GET /users/{user_id}/redemptions
pub async fn list_redemptions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<RedemptionDto>>> {
    let redemptions = state.query_service.get_redemptions(user_id).await?;
    Ok(Json(redemptions))
}
