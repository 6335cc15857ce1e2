//! 数据访问层
//!
//! 提供各实体的按 ID 查询、按用户过滤、插入以及事务提交，不包含业务逻辑。
//!
//! ## 设计原则
//!
//! - 每个请求通过 `LedgerStore::begin` 获得一个独立会话
//! - 会话结束时必须 commit 或 rollback；直接 drop 等同于回滚
//! - 事务控制由调用方（服务层）决定
//! - 通过 trait 抽象支持 PostgreSQL 与内存两种实现，便于测试

mod memory_store;
mod pg_store;
mod traits;

pub use memory_store::{LedgerTables, MemoryLedgerSession, MemoryLedgerStore};
pub use pg_store::{PgLedgerSession, PgLedgerStore};
pub use traits::*;
