//! 本地算术服务 - 业务能力层
//!
//! 远程服务不可用时的兜底计算

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::ArithmeticError;
use crate::models::Operator;

/// 对两个整数执行运算
///
/// 除法向零截断（`-7 / 2 == -3`）。远程服务的取整规则可能不同，
/// 兜底结果与远程结果在负数除法上允许不一致
///
/// # 错误
/// 除数为零时返回 `DivisionByZero`
pub fn compute(a: &BigInt, b: &BigInt, op: Operator) -> Result<BigInt, ArithmeticError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div => {
            if b.is_zero() {
                return Err(ArithmeticError::DivisionByZero);
            }
            Ok(a / b)
        }
    }
}
