use serde::{Deserialize, Serialize};

/// 可兑换商品
///
/// 商品目录由外部维护，`points_required` 非负。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RedeemableItem {
    pub id: i64,
    pub name: String,
    pub points_required: i32,
}
