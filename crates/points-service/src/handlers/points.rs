//! 积分流水 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{error::Result, service::PointHistoryDto, state::AppState};

/// 用户积分流水，没有记录时返回空数组
///
/// GET /users/{user_id}/points/history
pub async fn get_point_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PointHistoryDto>>> {
    let history = state.query_service.get_point_history(user_id).await?;
    Ok(Json(history))
}
