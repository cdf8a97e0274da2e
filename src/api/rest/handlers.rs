//! REST 请求处理函数

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::models::{CalcRequest, CalcResponse, StagedCalcRequest};

use super::error::ApiError;
use super::routes::GatewayState;

/// 静态首页
const LANDING_PAGE: &str = include_str!("../../../templates/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// POST /calculate（兜底模式）
pub async fn calculate_with_fallback(
    State(state): State<GatewayState>,
    payload: Result<Json<CalcRequest>, JsonRejection>,
) -> Result<Json<CalcResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state.fallback.run(&req).await?;
    Ok(Json(CalcResponse::new(result)))
}

/// POST /calculate（分阶段模式）
pub async fn calculate_staged(
    State(state): State<GatewayState>,
    payload: Result<Json<StagedCalcRequest>, JsonRejection>,
) -> Result<Json<CalcResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state.staged.run(&req).await?;
    Ok(Json(CalcResponse::new(result)))
}
