//! 积分兑换服务
//!
//! ## 兑换流程
//!
//! 1. 商品存在 -> 2. 余额记录存在（行锁）-> 3. 积分充足
//!    -> 4. 扣减余额 -> 5. 写入兑换记录 -> 6. 写入积分流水 -> 7. 提交
//!
//! 任一步失败时会话被丢弃，已执行的写入全部回滚。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use points_shared::observability::metrics::record_redemption;

use crate::error::{PointsError, Result};
use crate::models::{NewPointHistory, NewRedemption, RedeemableItem, UserBalance};
use crate::repository::LedgerStore;
use crate::service::dto::RedeemResponse;

/// 积分兑换服务
pub struct RedemptionService {
    store: Arc<dyn LedgerStore>,
}

impl RedemptionService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// 使用积分兑换商品
    ///
    /// 前置条件按顺序检查，第一个不满足的条件决定返回的错误：
    /// `ItemNotFound` -> `BalanceNotFound` -> `InsufficientPoints`
    #[instrument(skip(self))]
    pub async fn redeem(&self, user_id: i64, item_id: i64) -> Result<RedeemResponse> {
        match self.execute_redemption(user_id, item_id).await {
            Ok((new_balance, points_spent)) => {
                record_redemption("success", Some(points_spent));
                info!(
                    user_id,
                    item_id, points_spent, new_balance, "积分兑换成功"
                );
                Ok(RedeemResponse::success(new_balance))
            }
            Err(e) => {
                record_redemption(outcome_label(&e), None);
                if e.is_business_error() {
                    warn!(user_id, item_id, error = %e, "积分兑换被拒绝");
                }
                Err(e)
            }
        }
    }

    /// 执行兑换事务，返回 (扣减后余额, 消耗积分)
    async fn execute_redemption(&self, user_id: i64, item_id: i64) -> Result<(i32, i32)> {
        let mut session = self.store.begin().await?;

        // 1. 商品
        let item = session
            .find_item(item_id)
            .await?
            .ok_or(PointsError::ItemNotFound(item_id))?;

        // 2. 余额（锁定到事务结束）
        let balance = session
            .find_balance_for_update(user_id)
            .await?
            .ok_or(PointsError::BalanceNotFound(user_id))?;

        // 3. 积分是否充足
        ensure_sufficient(&balance, &item)?;

        let now = Utc::now();
        let points_spent = item.points_required;

        // 4. 扣减
        let new_balance = session
            .decrement_current_points(balance.id, points_spent, now)
            .await?;

        // 5. 兑换记录
        session
            .insert_redemption(&NewRedemption {
                user_id,
                item_id,
                date: now,
                points_spent,
            })
            .await?;

        // 6. 积分流水
        session
            .insert_point_history(&NewPointHistory::redemption(user_id, points_spent, now))
            .await?;

        // 7. 提交
        session.commit().await?;

        Ok((new_balance, points_spent))
    }
}

/// 积分不足时返回 `InsufficientPoints`
fn ensure_sufficient(balance: &UserBalance, item: &RedeemableItem) -> Result<()> {
    if balance.can_afford(item.points_required) {
        Ok(())
    } else {
        Err(PointsError::InsufficientPoints {
            required: item.points_required,
            available: balance.current_points,
        })
    }
}

/// 兑换结果的指标标签
fn outcome_label(error: &PointsError) -> &'static str {
    match error {
        PointsError::ItemNotFound(_) => "item_not_found",
        PointsError::BalanceNotFound(_) => "balance_not_found",
        PointsError::InsufficientPoints { .. } => "insufficient_points",
        PointsError::Database(_) | PointsError::Internal(_) => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REDEMPTION_DESCRIPTION;
    use crate::repository::{MemoryLedgerStore, MockLedgerStore};

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

    fn item(points_required: i32) -> RedeemableItem {
        RedeemableItem {
            id: 5,
            name: "Coffee ticket".to_string(),
            points_required,
        }
    }

    #[test]
    fn test_ensure_sufficient() {
        assert!(ensure_sufficient(&balance(100), &item(30)).is_ok());
        assert!(ensure_sufficient(&balance(30), &item(30)).is_ok());

        let err = ensure_sufficient(&balance(29), &item(30)).unwrap_err();
        assert!(matches!(
            err,
            PointsError::InsufficientPoints {
                required: 30,
                available: 29
            }
        ));
    }

    #[test]
    fn test_outcome_label() {
        assert_eq!(outcome_label(&PointsError::ItemNotFound(1)), "item_not_found");
        assert_eq!(
            outcome_label(&PointsError::BalanceNotFound(1)),
            "balance_not_found"
        );
        assert_eq!(
            outcome_label(&PointsError::Internal("x".to_string())),
            "error"
        );
    }

    #[tokio::test]
    async fn test_redeem_success_writes_all_rows() {
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Tanaka", "Acme").await;
        store.seed_balance(user_id, 100, 0, 0).await;
        let item_id = store.seed_item("Coffee ticket", 30).await.unwrap();
        let service = RedemptionService::new(Arc::new(store.clone()));

        let response = service.redeem(user_id, item_id).await.unwrap();
        assert_eq!(response.new_balance, 70);

        let tables = store.snapshot().await;
        assert_eq!(tables.balances[0].current_points, 70);
        assert_eq!(tables.redemptions.len(), 1);
        assert_eq!(tables.redemptions[0].points_spent, 30);
        assert_eq!(tables.redemptions[0].item_id, item_id);
        assert_eq!(tables.point_history.len(), 1);
        assert_eq!(tables.point_history[0].points, -30);
        assert_eq!(tables.point_history[0].description, REDEMPTION_DESCRIPTION);
        assert_eq!(tables.point_history[0].date, tables.redemptions[0].date);
    }

    #[tokio::test]
    async fn test_item_checked_before_balance() {
        // 用户没有余额且商品不存在时，优先报告商品不存在
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Tanaka", "Acme").await;
        let service = RedemptionService::new(Arc::new(store));

        let err = service.redeem(user_id, 42).await.unwrap_err();
        assert!(matches!(err, PointsError::ItemNotFound(42)));
    }

    #[tokio::test]
    async fn test_balance_checked_before_sufficiency() {
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Tanaka", "Acme").await;
        let item_id = store.seed_item("Free item", 0).await.unwrap();
        let service = RedemptionService::new(Arc::new(store));

        let err = service.redeem(user_id, item_id).await.unwrap_err();
        assert!(matches!(err, PointsError::BalanceNotFound(id) if id == user_id));
    }

    #[tokio::test]
    async fn test_insufficient_points_no_mutation() {
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Tanaka", "Acme").await;
        store.seed_balance(user_id, 10, 0, 0).await;
        let item_id = store.seed_item("Headphones", 30).await.unwrap();
        let service = RedemptionService::new(Arc::new(store.clone()));

        let err = service.redeem(user_id, item_id).await.unwrap_err();
        assert!(matches!(err, PointsError::InsufficientPoints { .. }));

        let tables = store.snapshot().await;
        assert_eq!(tables.balances[0].current_points, 10);
        assert!(tables.redemptions.is_empty());
        assert!(tables.point_history.is_empty());
    }

    #[tokio::test]
    async fn test_store_unavailable() {
        let mut store = MockLedgerStore::new();
        store
            .expect_begin()
            .times(1)
            .returning(|| Err(PointsError::Database(sqlx::Error::PoolTimedOut)));
        let service = RedemptionService::new(Arc::new(store));

        let err = service.redeem(1, 1).await.unwrap_err();
        assert!(!err.is_business_error());
    }
}
