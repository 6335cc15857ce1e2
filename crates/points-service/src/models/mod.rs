//! 领域模型
//!
//! 与数据库表一一对应的实体，以及追加写入时使用的新记录结构。

mod balance;
mod item;
mod point_history;
mod redemption;
mod user;

pub use balance::UserBalance;
pub use item::RedeemableItem;
pub use point_history::{NewPointHistory, PointHistory, REDEMPTION_DESCRIPTION};
pub use redemption::{NewRedemption, RedemptionHistory};
pub use user::User;
