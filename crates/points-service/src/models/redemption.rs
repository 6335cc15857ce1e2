use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 兑换记录
///
/// 每次成功兑换追加一条，`points_spent` 等于兑换时商品的所需积分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RedemptionHistory {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub date: DateTime<Utc>,
    pub points_spent: i32,
}

/// 待写入的兑换记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRedemption {
    pub user_id: i64,
    pub item_id: i64,
    pub date: DateTime<Utc>,
    pub points_spent: i32,
}
