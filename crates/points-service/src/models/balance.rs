//! 用户积分余额

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户积分余额
///
/// 每个用户至多一条。兑换只修改 `current_points` 和 `updated_at`，
/// 付与预定积分与失效预定积分在本服务中只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBalance {
    pub id: i64,
    pub user_id: i64,
    /// 当前可用积分
    pub current_points: i32,
    /// 付与预定积分
    pub scheduled_points: i32,
    /// 失效预定积分
    pub expiring_points: i32,
    pub updated_at: DateTime<Utc>,
}

impl UserBalance {
    /// 当前积分是否足以支付
    pub fn can_afford(&self, points: i32) -> bool {
        self.current_points >= points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(current_points: i32) -> UserBalance {
        UserBalance {
            id: 1,
            user_id: 1,
            current_points,
            scheduled_points: 0,
            expiring_points: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_afford() {
        assert!(balance(100).can_afford(30));
        assert!(balance(30).can_afford(30));
        assert!(balance(0).can_afford(0));
        assert!(!balance(29).can_afford(30));
    }
}
