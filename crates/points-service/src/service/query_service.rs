//! 积分查询服务
//!
//! 只读操作：每次查询开启一个会话，读取完成后显式回滚。

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{PointsError, Result};
use crate::repository::LedgerStore;
use crate::service::dto::{BalanceDto, ItemDto, PointHistoryDto, RedemptionDto, UserDto};

/// 积分查询服务
pub struct QueryService {
    store: Arc<dyn LedgerStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// 全部用户
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserDto>> {
        let mut session = self.store.begin().await?;
        let users = session.list_users().await?;
        session.rollback().await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// 用户积分余额
    ///
    /// 没有余额记录时返回 `BalanceNotFound`
    #[instrument(skip(self))]
    pub async fn get_balance(&self, user_id: i64) -> Result<BalanceDto> {
        let mut session = self.store.begin().await?;
        let balance = session.find_balance(user_id).await?;
        session.rollback().await?;

        match balance {
            Some(balance) => Ok(BalanceDto::from(balance)),
            None => {
                debug!(user_id, "用户没有余额记录");
                Err(PointsError::BalanceNotFound(user_id))
            }
        }
    }

    /// 用户积分流水，按写入顺序
    #[instrument(skip(self))]
    pub async fn get_point_history(&self, user_id: i64) -> Result<Vec<PointHistoryDto>> {
        let mut session = self.store.begin().await?;
        let history = session.list_point_history(user_id).await?;
        session.rollback().await?;

        Ok(history.into_iter().map(PointHistoryDto::from).collect())
    }

    /// 可兑换商品目录
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<ItemDto>> {
        let mut session = self.store.begin().await?;
        let items = session.list_items().await?;
        session.rollback().await?;

        Ok(items.into_iter().map(ItemDto::from).collect())
    }

    /// 用户兑换记录
    #[instrument(skip(self))]
    pub async fn get_redemptions(&self, user_id: i64) -> Result<Vec<RedemptionDto>> {
        let mut session = self.store.begin().await?;
        let redemptions = session.list_redemptions(user_id).await?;
        session.rollback().await?;

        Ok(redemptions.into_iter().map(RedemptionDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryLedgerStore;

    #[tokio::test]
    async fn test_get_balance_not_found() {
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Sato", "Acme").await;
        let service = QueryService::new(Arc::new(store));

        let result = service.get_balance(user_id).await;
        assert!(matches!(result, Err(PointsError::BalanceNotFound(id)) if id == user_id));
    }

    #[tokio::test]
    async fn test_get_balance() {
        let store = MemoryLedgerStore::new();
        let user_id = store.seed_user("Sato", "Acme").await;
        store.seed_balance(user_id, 100, 20, 5).await;
        let service = QueryService::new(Arc::new(store));

        let balance = service.get_balance(user_id).await.unwrap();
        assert_eq!(balance.user_id, user_id);
        assert_eq!(balance.current_points, 100);
        assert_eq!(balance.scheduled_points, 20);
        assert_eq!(balance.expiring_points, 5);
    }

    #[tokio::test]
    async fn test_history_filtered_by_user() {
        let store = MemoryLedgerStore::new();
        let alice = store.seed_user("Alice", "Acme").await;
        let bob = store.seed_user("Bob", "Initech").await;
        store.seed_point_history(alice, "signup bonus", 50).await;
        store.seed_point_history(bob, "signup bonus", 10).await;
        store.seed_point_history(alice, "monthly grant", 25).await;
        let service = QueryService::new(Arc::new(store));

        let history = service.get_point_history(alice).await.unwrap();
        let points: Vec<i32> = history.iter().map(|h| h.points).collect();
        assert_eq!(points, vec![50, 25]);

        assert!(service.get_point_history(999).await.unwrap().is_empty());
    }
}
