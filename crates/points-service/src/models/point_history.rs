//! 积分流水

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 兑换产生的积分流水描述
pub const REDEMPTION_DESCRIPTION: &str = "point redemption";

/// 积分流水
///
/// 只追加，不更新也不删除。`points` 为带符号的变动量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PointHistory {
    pub id: i64,
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub points: i32,
}

/// 待写入的积分流水
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointHistory {
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub points: i32,
}

impl NewPointHistory {
    /// 兑换扣减流水，变动量为所需积分的相反数
    pub fn redemption(user_id: i64, points_required: i32, date: DateTime<Utc>) -> Self {
        Self {
            user_id,
            date,
            description: REDEMPTION_DESCRIPTION.to_string(),
            points: -points_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redemption_entry_is_negative() {
        let now = Utc::now();
        let entry = NewPointHistory::redemption(7, 30, now);

        assert_eq!(entry.user_id, 7);
        assert_eq!(entry.points, -30);
        assert_eq!(entry.description, REDEMPTION_DESCRIPTION);
        assert_eq!(entry.date, now);
    }
}
