//! 单次调用 + 本地兜底流程 - 流程层
//!
//! 流程顺序：
//! 1. 解析运算符、校验进制
//! 2. 调用对应的远程算术服务
//! 3. 远程失败 → 本地解析、计算、格式化（兜底）

use num_bigint::BigInt;
use tracing::{info, instrument, warn};

use crate::error::{AppResult, BusinessError, RemoteError};
use crate::infrastructure::RemoteCaller;
use crate::models::wire::{self, OperandsPayload, RESULT_FIELDS};
use crate::models::{CalcRequest, Endpoint, Operator};
use crate::services::{base_codec, local_arithmetic};
use crate::workflow::calc_ctx::CalcCtx;

/// 单次调用 + 本地兜底流程
///
/// - 每个请求最多一次远程调用
/// - 只有远程错误会触发兜底
/// - 兜底中的错误（无效操作数、除零）直接返回给调用方
pub struct FallbackFlow {
    caller: RemoteCaller,
}

impl FallbackFlow {
    /// 创建新的兜底流程
    pub fn new(caller: RemoteCaller) -> Self {
        Self { caller }
    }

    #[instrument(skip_all, fields(op = %request.op, base = request.base))]
    pub async fn run(&self, request: &CalcRequest) -> AppResult<String> {
        let op = Operator::parse(&request.op)?;
        let base = base_codec::checked_base(request.base)?;

        let ctx = CalcCtx::shared_base(op, base);
        info!("{} 📨 收到计算请求", ctx);

        // ========== 远程调用 ==========
        match self.remote_attempt(op, base, request).await {
            Ok(result) => {
                info!("{} ✓ 远程服务返回结果: {}", ctx, result);
                Ok(result)
            }
            Err(e) => {
                warn!("{} ⚠️ 远程服务不可用，切换到本地计算: {}", ctx, e);
                let result = self.local_fallback(op, base, request).await?;
                info!("{} ✓ 本地计算完成: {}", ctx, result);
                Ok(result)
            }
        }
    }

    /// 调用远程算术服务，原样返回其结果字段
    async fn remote_attempt(
        &self,
        op: Operator,
        base: u32,
        request: &CalcRequest,
    ) -> Result<String, RemoteError> {
        let endpoint = Endpoint::Operation(op);
        let payload = OperandsPayload {
            a: &request.a,
            b: &request.b,
            base,
        };

        let value = self.caller.fetch_field(endpoint, &payload, RESULT_FIELDS).await?;

        wire::json_to_text(&value)
            .ok_or_else(|| RemoteError::invalid_field(self.caller.endpoint_url(endpoint), "result", &value))
    }

    /// 本地兜底计算
    ///
    /// 大整数运算可能耗时较长，放到阻塞线程池中执行，不占用异步工作线程
    async fn local_fallback(&self, op: Operator, base: u32, request: &CalcRequest) -> AppResult<String> {
        let a = request.a.clone();
        let b = request.b.clone();

        tokio::task::spawn_blocking(move || compute_locally(op, base, &a, &b))
            .await
            .map_err(|e| BusinessError::LocalTaskFailed(e.to_string()))?
    }
}

/// 解析、计算、格式化
fn compute_locally(op: Operator, base: u32, a: &str, b: &str) -> AppResult<String> {
    let a = parse_operand(a, base)?;
    let b = parse_operand(b, base)?;

    let value = local_arithmetic::compute(&a, &b, op)?;

    Ok(base_codec::format(&value, base)?)
}

/// 解析操作数，转换错误包装为 `InvalidOperand`
fn parse_operand(digits: &str, base: u32) -> Result<BigInt, BusinessError> {
    base_codec::parse(digits, base).map_err(|source| BusinessError::InvalidOperand { base, source })
}
