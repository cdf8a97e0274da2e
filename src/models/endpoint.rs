//! 远程端点
//!
//! 所有远程依赖都是同一种能力："接收数值负载，在限定时间内返回数值/字符串负载"，
//! 按运算符或流水线阶段区分变体

use crate::models::Operator;

/// 远程端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// 某个运算符对应的算术服务
    Operation(Operator),
    /// 进制转换服务（任意进制 → 规范整数）
    Convert,
    /// 格式化服务（十进制 → 目标进制）
    Format,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Operation(op) => write!(f, "{}-service", op),
            Endpoint::Convert => write!(f, "convert-service"),
            Endpoint::Format => write!(f, "format-service"),
        }
    }
}
