//! 服务层数据传输对象
//!
//! 每个接口都有具名的响应结构，与内部领域模型解耦。字段名保持 snake_case。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{PointHistory, RedeemableItem, RedemptionHistory, User, UserBalance};

/// 兑换成功提示
pub const REDEEM_SUCCESS_MESSAGE: &str = "Point redemption completed";

/// 欢迎信息
pub const WELCOME_MESSAGE: &str = "Welcome to the Point Management System API!";

/// 用户 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub company_name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            company_name: user.company_name,
        }
    }
}

/// 积分余额 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDto {
    pub user_id: i64,
    pub current_points: i32,
    pub scheduled_points: i32,
    pub expiring_points: i32,
}

impl From<UserBalance> for BalanceDto {
    fn from(balance: UserBalance) -> Self {
        Self {
            user_id: balance.user_id,
            current_points: balance.current_points,
            scheduled_points: balance.scheduled_points,
            expiring_points: balance.expiring_points,
        }
    }
}

/// 积分流水 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistoryDto {
    pub date: DateTime<Utc>,
    pub description: String,
    pub points: i32,
}

impl From<PointHistory> for PointHistoryDto {
    fn from(history: PointHistory) -> Self {
        Self {
            date: history.date,
            description: history.description,
            points: history.points,
        }
    }
}

/// 可兑换商品 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub points_required: i32,
}

impl From<RedeemableItem> for ItemDto {
    fn from(item: RedeemableItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            points_required: item.points_required,
        }
    }
}

/// 兑换记录 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionDto {
    pub item_id: i64,
    pub date: DateTime<Utc>,
    pub points_spent: i32,
}

impl From<RedemptionHistory> for RedemptionDto {
    fn from(redemption: RedemptionHistory) -> Self {
        Self {
            item_id: redemption.item_id,
            date: redemption.date,
            points_spent: redemption.points_spent,
        }
    }
}

/// 兑换响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub message: String,
    /// 扣减后的当前积分
    pub new_balance: i32,
}

impl RedeemResponse {
    pub fn success(new_balance: i32) -> Self {
        Self {
            message: REDEEM_SUCCESS_MESSAGE.to_string(),
            new_balance,
        }
    }
}

/// 根路径响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}
