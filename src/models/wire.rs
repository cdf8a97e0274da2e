//! 远程服务的请求负载与响应字段
//!
//! 字段名与下游服务约定保持一致（部分服务使用西班牙语字段名）

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::services::base_codec;

/// 算术服务的结果字段（按顺序查找）
pub const RESULT_FIELDS: &[&str] = &["result", "resultado"];

/// 转换/格式化服务的数值字段
pub const NUMBER_FIELDS: &[&str] = &["numero"];

/// 兜底模式下发往算术服务的负载
#[derive(Debug, Serialize)]
pub struct OperandsPayload<'a> {
    pub a: &'a str,
    pub b: &'a str,
    pub base: u32,
}

/// 分阶段模式下发往算术服务的负载（规范整数）
#[derive(Debug, Serialize)]
pub struct CanonicalOperandsPayload {
    pub numero_a: JsonValue,
    pub numero_b: JsonValue,
}

/// 发往转换服务的负载
#[derive(Debug, Serialize)]
pub struct ConvertPayload<'a> {
    pub numero: &'a str,
    pub base: u32,
}

/// 发往格式化服务的负载
#[derive(Debug, Serialize)]
pub struct FormatPayload {
    pub numero: JsonValue,
    pub base_origen: u32,
    pub base_destino: u32,
}

/// 规范整数转为 JSON
///
/// 能放进 i64 的用 JSON 数字，否则用十进制字符串，避免精度丢失
pub fn integer_to_json(value: &BigInt) -> JsonValue {
    match value.to_i64() {
        Some(v) => JsonValue::from(v),
        None => JsonValue::String(value.to_string()),
    }
}

/// 从 JSON 数字或十进制字符串读取规范整数
pub fn json_to_integer(value: &JsonValue) -> Option<BigInt> {
    match value {
        JsonValue::Number(n) => base_codec::parse(&n.to_string(), 10).ok(),
        JsonValue::String(s) => base_codec::parse(s, 10).ok(),
        _ => None,
    }
}

/// 将结果字段原样转为字符串（字符串直接返回，数字转为文本）
pub fn json_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
