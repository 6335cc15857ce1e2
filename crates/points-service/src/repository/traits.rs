//! 仓储 Trait 定义
//!
//! 服务层只依赖这里的抽象：`LedgerStore` 负责开启会话，
//! `LedgerSession` 是一次请求内的事务性工作单元。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    NewPointHistory, NewRedemption, PointHistory, RedeemableItem, RedemptionHistory, User,
    UserBalance,
};

/// 积分账本存储
///
/// 进程内共享（`Arc<dyn LedgerStore>`），每个请求通过 `begin` 获取独立会话。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// 开启一个事务性会话
    async fn begin(&self) -> Result<Box<dyn LedgerSession>>;

    /// 存储可用性检查
    async fn health_check(&self) -> Result<()>;
}

/// 事务性会话
///
/// 会话内的写入只有在 `commit` 成功后才对其他会话可见；
/// 未提交即被 drop 的会话等同于回滚。
#[async_trait]
pub trait LedgerSession: Send {
    // 用户
    async fn list_users(&mut self) -> Result<Vec<User>>;

    // 余额
    async fn find_balance(&mut self, user_id: i64) -> Result<Option<UserBalance>>;
    /// 读取余额并锁定该行直到会话结束
    async fn find_balance_for_update(&mut self, user_id: i64) -> Result<Option<UserBalance>>;
    /// 扣减当前积分，返回扣减后的余额
    async fn decrement_current_points(
        &mut self,
        balance_id: i64,
        points: i32,
        updated_at: DateTime<Utc>,
    ) -> Result<i32>;

    // 积分流水
    async fn list_point_history(&mut self, user_id: i64) -> Result<Vec<PointHistory>>;
    async fn insert_point_history(&mut self, entry: &NewPointHistory) -> Result<PointHistory>;

    // 商品
    async fn find_item(&mut self, item_id: i64) -> Result<Option<RedeemableItem>>;
    async fn list_items(&mut self) -> Result<Vec<RedeemableItem>>;

    // 兑换记录
    async fn list_redemptions(&mut self, user_id: i64) -> Result<Vec<RedemptionHistory>>;
    async fn insert_redemption(&mut self, redemption: &NewRedemption)
    -> Result<RedemptionHistory>;

    /// 提交会话内的全部写入
    async fn commit(self: Box<Self>) -> Result<()>;

    /// 放弃会话内的全部写入
    async fn rollback(self: Box<Self>) -> Result<()>;
}
