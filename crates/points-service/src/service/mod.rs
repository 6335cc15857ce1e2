//! 服务层
//!
//! 实现积分业务逻辑，协调数据访问层的会话与事务。
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `query_service`: 查询服务（只读操作）
//! - `redemption_service`: 积分兑换服务

pub mod dto;
pub mod query_service;
pub mod redemption_service;

pub use dto::*;
pub use query_service::QueryService;
pub use redemption_service::RedemptionService;
