//! 积分管理服务
//!
//! 提供用户积分余额、积分流水查询与积分兑换的 REST API。
//!
//! ## 核心功能
//!
//! - **余额查询**：当前积分、付与预定积分、失效预定积分
//! - **积分流水**：按用户查询带符号的积分变动记录
//! - **积分兑换**：校验商品、余额与积分充足后，在单个事务内扣减余额并写入兑换记录和积分流水
//! - **商品目录**：可兑换商品及所需积分
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据访问层（PostgreSQL / 内存）
//! - `service`: 业务服务层
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{PointsError, Result};
pub use repository::{LedgerSession, LedgerStore, MemoryLedgerStore, PgLedgerStore};
pub use routes::build_router;
pub use service::{QueryService, RedemptionService};
pub use state::AppState;

/// 服务名称，用于配置加载、日志与探针响应
pub const SERVICE_NAME: &str = "points-service";
