//! 分阶段流水线流程 - 流程层
//!
//! 流程顺序（严格串行，任一阶段失败即终止）：
//! 1. 转换第一个操作数（远程）
//! 2. 转换第二个操作数（远程）
//! 3. 执行运算（远程）
//! 4. 格式化结果（远程）
//!
//! 本流程没有本地兜底

use num_bigint::BigInt;
use serde_json::Value as JsonValue;
use tracing::{error, info, instrument};

use crate::error::{AppResult, BusinessError, RemoteError};
use crate::infrastructure::RemoteCaller;
use crate::models::wire::{
    self, CanonicalOperandsPayload, ConvertPayload, FormatPayload, NUMBER_FIELDS, RESULT_FIELDS,
};
use crate::models::{Endpoint, Operator, Stage, StagedCalcRequest};
use crate::services::base_codec;
use crate::workflow::calc_ctx::CalcCtx;

/// 运算服务返回的原始结果按十进制处理
const RAW_RESULT_BASE: u32 = 10;

/// 分阶段流水线流程
pub struct StagedFlow {
    caller: RemoteCaller,
}

impl StagedFlow {
    /// 创建新的分阶段流程
    pub fn new(caller: RemoteCaller) -> Self {
        Self { caller }
    }

    #[instrument(skip_all, fields(op = %request.op))]
    pub async fn run(&self, request: &StagedCalcRequest) -> AppResult<String> {
        // 运算符和进制在任何远程调用之前校验
        let op = Operator::parse(&request.op)?;
        let base_a = base_codec::checked_base(request.base_a)?;
        let base_b = base_codec::checked_base(request.base_b)?;
        let result_base = base_codec::checked_base(request.result_base)?;

        let ctx = CalcCtx::new(op, base_a, base_b, result_base);
        info!("{} 📨 收到分阶段计算请求", ctx);

        let a = self
            .convert(&request.a, base_a)
            .await
            .map_err(|e| self.abort(&ctx, Stage::ConvertFirst, e))?;

        let b = self
            .convert(&request.b, base_b)
            .await
            .map_err(|e| self.abort(&ctx, Stage::ConvertSecond, e))?;

        let raw = self
            .operate(op, &a, &b)
            .await
            .map_err(|e| self.abort(&ctx, Stage::Operate, e))?;

        let formatted = self
            .format(raw, result_base)
            .await
            .map_err(|e| self.abort(&ctx, Stage::Format, e))?;

        info!("{} ✓ 流水线完成: {}", ctx, formatted);
        Ok(formatted)
    }

    /// 转换阶段：任意进制数字串 → 规范整数
    async fn convert(&self, digits: &str, base: u32) -> Result<BigInt, RemoteError> {
        let payload = ConvertPayload {
            numero: digits,
            base,
        };
        let value = self
            .caller
            .fetch_field(Endpoint::Convert, &payload, NUMBER_FIELDS)
            .await?;

        wire::json_to_integer(&value).ok_or_else(|| {
            RemoteError::invalid_field(self.caller.endpoint_url(Endpoint::Convert), "numero", &value)
        })
    }

    /// 运算阶段：返回运算服务的原始结果
    async fn operate(&self, op: Operator, a: &BigInt, b: &BigInt) -> Result<JsonValue, RemoteError> {
        let payload = CanonicalOperandsPayload {
            numero_a: wire::integer_to_json(a),
            numero_b: wire::integer_to_json(b),
        };

        self.caller
            .fetch_field(Endpoint::Operation(op), &payload, RESULT_FIELDS)
            .await
    }

    /// 格式化阶段：十进制原始结果 → 目标进制数字串
    async fn format(&self, raw: JsonValue, result_base: u32) -> Result<String, RemoteError> {
        let payload = FormatPayload {
            numero: raw,
            base_origen: RAW_RESULT_BASE,
            base_destino: result_base,
        };
        let value = self
            .caller
            .fetch_field(Endpoint::Format, &payload, NUMBER_FIELDS)
            .await?;

        wire::json_to_text(&value).ok_or_else(|| {
            RemoteError::invalid_field(self.caller.endpoint_url(Endpoint::Format), "numero", &value)
        })
    }

    /// 记录失败阶段并包装错误
    fn abort(&self, ctx: &CalcCtx, stage: Stage, err: RemoteError) -> BusinessError {
        error!("{} ❌ {} 阶段失败，终止流水线: {}", ctx, stage, err);
        BusinessError::StageFailed { stage, source: err }
    }
}
