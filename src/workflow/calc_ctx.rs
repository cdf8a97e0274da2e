//! 计算请求上下文
//!
//! 封装"我正在处理什么运算、用什么进制"这一信息，仅用于日志

use std::fmt::Display;

use crate::models::Operator;

/// 计算请求上下文
#[derive(Debug, Clone)]
pub struct CalcCtx {
    /// 运算符
    pub op: Operator,

    /// 第一个操作数的进制
    pub base_a: u32,

    /// 第二个操作数的进制
    pub base_b: u32,

    /// 结果进制
    pub result_base: u32,
}

impl CalcCtx {
    /// 操作数和结果共用同一进制
    pub fn shared_base(op: Operator, base: u32) -> Self {
        Self::new(op, base, base, base)
    }

    pub fn new(op: Operator, base_a: u32, base_b: u32, result_base: u32) -> Self {
        Self {
            op,
            base_a,
            base_b,
            result_base,
        }
    }
}

impl Display for CalcCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.base_a == self.base_b && self.base_b == self.result_base {
            write!(f, "[{} base#{}]", self.op, self.base_a)
        } else {
            write!(
                f,
                "[{} base#{}/{} -> {}]",
                self.op, self.base_a, self.base_b, self.result_base
            )
        }
    }
}
