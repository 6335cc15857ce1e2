//! 应用状态定义

use std::sync::Arc;

use crate::repository::LedgerStore;
use crate::service::{QueryService, RedemptionService};

/// Axum 应用共享状态
///
/// 进程内没有跨请求的可变状态，唯一共享的可变资源是存储本身。
#[derive(Clone)]
pub struct AppState {
    /// 账本存储（就绪探针使用）
    pub store: Arc<dyn LedgerStore>,
    pub query_service: Arc<QueryService>,
    pub redemption_service: Arc<RedemptionService>,
}

impl AppState {
    /// 基于同一个存储构造全部服务
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            query_service: Arc::new(QueryService::new(store.clone())),
            redemption_service: Arc::new(RedemptionService::new(store.clone())),
            store,
        }
    }
}
