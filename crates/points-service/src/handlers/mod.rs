//! HTTP 请求处理器模块
//!
//! 处理器只负责提取路径参数和序列化响应，业务逻辑在服务层。

pub mod item;
pub mod points;
pub mod redemption;
pub mod system;
pub mod user;
