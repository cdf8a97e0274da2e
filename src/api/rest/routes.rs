//! 路由注册

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::CalcMode;
use crate::workflow::{FallbackFlow, StagedFlow};

use super::handlers;

/// 路由共享状态（只读）
#[derive(Clone)]
pub struct GatewayState {
    pub fallback: Arc<FallbackFlow>,
    pub staged: Arc<StagedFlow>,
}

/// 构建路由
///
/// `POST /calculate` 由 `mode` 选择的流程处理，每个进程只暴露一种
pub fn build_router(mode: CalcMode, state: GatewayState) -> Router {
    let calculate = match mode {
        CalcMode::Fallback => post(handlers::calculate_with_fallback),
        CalcMode::Staged => post(handlers::calculate_staged),
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/calculate", calculate)
        .with_state(state)
}
