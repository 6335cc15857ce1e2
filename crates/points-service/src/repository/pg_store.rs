//! PostgreSQL 账本存储
//!
//! 每个会话对应一个 sqlx 事务。事务对象被 drop 时 sqlx 自动回滚并归还连接。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use super::traits::{LedgerSession, LedgerStore};
use crate::error::{PointsError, Result};
use crate::models::{
    NewPointHistory, NewRedemption, PointHistory, RedeemableItem, RedemptionHistory, User,
    UserBalance,
};

/// PostgreSQL 账本存储
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerSession>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgLedgerSession { tx }))
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// 基于单个事务的会话
pub struct PgLedgerSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LedgerSession for PgLedgerSession {
    async fn list_users(&mut self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, company_name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(users)
    }

    async fn find_balance(&mut self, user_id: i64) -> Result<Option<UserBalance>> {
        let balance = sqlx::query_as::<_, UserBalance>(
            r#"
            SELECT id, user_id, current_points, scheduled_points, expiring_points, updated_at
            FROM user_balance
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(balance)
    }

    async fn find_balance_for_update(&mut self, user_id: i64) -> Result<Option<UserBalance>> {
        let balance = sqlx::query_as::<_, UserBalance>(
            r#"
            SELECT id, user_id, current_points, scheduled_points, expiring_points, updated_at
            FROM user_balance
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(balance)
    }

    async fn decrement_current_points(
        &mut self,
        balance_id: i64,
        points: i32,
        updated_at: DateTime<Utc>,
    ) -> Result<i32> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE user_balance
            SET current_points = current_points - $2, updated_at = $3
            WHERE id = $1
            RETURNING current_points
            "#,
        )
        .bind(balance_id)
        .bind(points)
        .bind(updated_at)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(|(current_points,)| current_points).ok_or_else(|| {
            PointsError::Internal(format!("余额记录在事务中消失: balance_id={}", balance_id))
        })
    }

    async fn list_point_history(&mut self, user_id: i64) -> Result<Vec<PointHistory>> {
        let history = sqlx::query_as::<_, PointHistory>(
            r#"
            SELECT id, user_id, date, description, points
            FROM point_history
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(history)
    }

    async fn insert_point_history(&mut self, entry: &NewPointHistory) -> Result<PointHistory> {
        let history = sqlx::query_as::<_, PointHistory>(
            r#"
            INSERT INTO point_history (user_id, date, description, points)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, description, points
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(&entry.description)
        .bind(entry.points)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(history)
    }

    async fn find_item(&mut self, item_id: i64) -> Result<Option<RedeemableItem>> {
        let item = sqlx::query_as::<_, RedeemableItem>(
            r#"
            SELECT id, name, points_required
            FROM redeemable_items
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(item)
    }

    async fn list_items(&mut self) -> Result<Vec<RedeemableItem>> {
        let items = sqlx::query_as::<_, RedeemableItem>(
            r#"
            SELECT id, name, points_required
            FROM redeemable_items
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(items)
    }

    async fn list_redemptions(&mut self, user_id: i64) -> Result<Vec<RedemptionHistory>> {
        let redemptions = sqlx::query_as::<_, RedemptionHistory>(
            r#"
            SELECT id, user_id, item_id, date, points_spent
            FROM redemption_history
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(redemptions)
    }

    async fn insert_redemption(
        &mut self,
        redemption: &NewRedemption,
    ) -> Result<RedemptionHistory> {
        let record = sqlx::query_as::<_, RedemptionHistory>(
            r#"
            INSERT INTO redemption_history (user_id, item_id, date, points_spent)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, item_id, date, points_spent
            "#,
        )
        .bind(redemption.user_id)
        .bind(redemption.item_id)
        .bind(redemption.date)
        .bind(redemption.points_spent)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(record)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let session = *self;
        session.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        let session = *self;
        session.tx.rollback().await?;
        Ok(())
    }
}
