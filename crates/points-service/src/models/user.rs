use serde::{Deserialize, Serialize};

/// 用户
///
/// 由外部系统创建，本服务只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub company_name: String,
}
