//! 内存账本存储
//!
//! 适用于测试和本地开发环境，事务语义与 PostgreSQL 实现保持一致：
//! - 会话持有全表互斥锁，会话之间串行执行
//! - 会话内写入先落在暂存副本上，`commit` 时整体替换，未提交即丢弃
//! - 插入时检查外键与非负约束，违反时返回错误

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::traits::{LedgerSession, LedgerStore};
use crate::error::{PointsError, Result};
use crate::models::{
    NewPointHistory, NewRedemption, PointHistory, RedeemableItem, RedemptionHistory, User,
    UserBalance,
};

/// 全部账本表的快照
#[derive(Debug, Clone, Default)]
pub struct LedgerTables {
    pub users: Vec<User>,
    pub balances: Vec<UserBalance>,
    pub point_history: Vec<PointHistory>,
    pub items: Vec<RedeemableItem>,
    pub redemptions: Vec<RedemptionHistory>,
}

impl LedgerTables {
    fn user_exists(&self, user_id: i64) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }

    fn item_exists(&self, item_id: i64) -> bool {
        self.items.iter().any(|i| i.id == item_id)
    }
}

/// 自增主键
fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i64) -> i64 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

/// 内存账本存储
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    tables: Arc<Mutex<LedgerTables>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 数据准备 ====================

    /// 插入用户，返回用户 ID
    pub async fn seed_user(&self, name: &str, company_name: &str) -> i64 {
        let mut tables = self.tables.lock().await;
        let id = next_id(&tables.users, |u| u.id);
        tables.users.push(User {
            id,
            name: name.to_string(),
            company_name: company_name.to_string(),
        });
        id
    }

    /// 设置用户余额，已存在时覆盖（每个用户至多一条）
    pub async fn seed_balance(
        &self,
        user_id: i64,
        current_points: i32,
        scheduled_points: i32,
        expiring_points: i32,
    ) {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        if let Some(balance) = tables.balances.iter_mut().find(|b| b.user_id == user_id) {
            balance.current_points = current_points;
            balance.scheduled_points = scheduled_points;
            balance.expiring_points = expiring_points;
            balance.updated_at = now;
            return;
        }

        let id = next_id(&tables.balances, |b| b.id);
        tables.balances.push(UserBalance {
            id,
            user_id,
            current_points,
            scheduled_points,
            expiring_points,
            updated_at: now,
        });
    }

    /// 插入可兑换商品，返回商品 ID
    pub async fn seed_item(&self, name: &str, points_required: i32) -> Result<i64> {
        if points_required < 0 {
            return Err(PointsError::Internal(format!(
                "违反约束 points_required >= 0: {}",
                points_required
            )));
        }

        let mut tables = self.tables.lock().await;
        let id = next_id(&tables.items, |i| i.id);
        tables.items.push(RedeemableItem {
            id,
            name: name.to_string(),
            points_required,
        });
        Ok(id)
    }

    /// 追加一条积分流水（如积分发放）
    pub async fn seed_point_history(&self, user_id: i64, description: &str, points: i32) {
        let mut tables = self.tables.lock().await;
        let id = next_id(&tables.point_history, |h| h.id);
        tables.point_history.push(PointHistory {
            id,
            user_id,
            date: Utc::now(),
            description: description.to_string(),
            points,
        });
    }

    // ==================== 测试辅助 ====================

    /// 已提交数据的快照
    pub async fn snapshot(&self) -> LedgerTables {
        self.tables.lock().await.clone()
    }

    /// 让下一次提交失败，用于验证全有或全无
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerSession>> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryLedgerSession {
            guard,
            staged,
            fail_next_commit: self.fail_next_commit.clone(),
        }))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// 内存会话
pub struct MemoryLedgerSession {
    guard: OwnedMutexGuard<LedgerTables>,
    staged: LedgerTables,
    fail_next_commit: Arc<AtomicBool>,
}

#[async_trait]
impl LedgerSession for MemoryLedgerSession {
    async fn list_users(&mut self) -> Result<Vec<User>> {
        Ok(self.staged.users.clone())
    }

    async fn find_balance(&mut self, user_id: i64) -> Result<Option<UserBalance>> {
        Ok(self
            .staged
            .balances
            .iter()
            .find(|b| b.user_id == user_id)
            .cloned())
    }

    async fn find_balance_for_update(&mut self, user_id: i64) -> Result<Option<UserBalance>> {
        // 会话本身已独占全表
        self.find_balance(user_id).await
    }

    async fn decrement_current_points(
        &mut self,
        balance_id: i64,
        points: i32,
        updated_at: DateTime<Utc>,
    ) -> Result<i32> {
        let balance = self
            .staged
            .balances
            .iter_mut()
            .find(|b| b.id == balance_id)
            .ok_or_else(|| {
                PointsError::Internal(format!("余额记录不存在: balance_id={}", balance_id))
            })?;

        let remaining = balance.current_points - points;
        if remaining < 0 {
            return Err(PointsError::Internal(format!(
                "违反约束 current_points >= 0: balance_id={}",
                balance_id
            )));
        }

        balance.current_points = remaining;
        balance.updated_at = updated_at;
        Ok(remaining)
    }

    async fn list_point_history(&mut self, user_id: i64) -> Result<Vec<PointHistory>> {
        Ok(self
            .staged
            .point_history
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_point_history(&mut self, entry: &NewPointHistory) -> Result<PointHistory> {
        if !self.staged.user_exists(entry.user_id) {
            return Err(PointsError::Internal(format!(
                "违反外键约束 point_history.user_id: {}",
                entry.user_id
            )));
        }

        let record = PointHistory {
            id: next_id(&self.staged.point_history, |h| h.id),
            user_id: entry.user_id,
            date: entry.date,
            description: entry.description.clone(),
            points: entry.points,
        };
        self.staged.point_history.push(record.clone());
        Ok(record)
    }

    async fn find_item(&mut self, item_id: i64) -> Result<Option<RedeemableItem>> {
        Ok(self
            .staged
            .items
            .iter()
            .find(|i| i.id == item_id)
            .cloned())
    }

    async fn list_items(&mut self) -> Result<Vec<RedeemableItem>> {
        Ok(self.staged.items.clone())
    }

    async fn list_redemptions(&mut self, user_id: i64) -> Result<Vec<RedemptionHistory>> {
        Ok(self
            .staged
            .redemptions
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_redemption(
        &mut self,
        redemption: &NewRedemption,
    ) -> Result<RedemptionHistory> {
        if !self.staged.user_exists(redemption.user_id) {
            return Err(PointsError::Internal(format!(
                "违反外键约束 redemption_history.user_id: {}",
                redemption.user_id
            )));
        }
        if !self.staged.item_exists(redemption.item_id) {
            return Err(PointsError::Internal(format!(
                "违反外键约束 redemption_history.item_id: {}",
                redemption.item_id
            )));
        }

        let record = RedemptionHistory {
            id: next_id(&self.staged.redemptions, |r| r.id),
            user_id: redemption.user_id,
            item_id: redemption.item_id,
            date: redemption.date,
            points_spent: redemption.points_spent,
        };
        self.staged.redemptions.push(record.clone());
        Ok(record)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryLedgerSession {
            mut guard,
            staged,
            fail_next_commit,
        } = *self;

        if fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(PointsError::Internal("提交失败（测试注入）".to_string()));
        }

        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
