//! 商品目录 API 处理器

use axum::{Json, extract::State};

use crate::{error::Result, service::ItemDto, state::AppState};

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ItemDto>>> {
    let items = state.query_service.list_items().await?;
    Ok(Json(items))
}
