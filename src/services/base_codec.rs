//! 进制转换服务 - 业务能力层
//!
//! 只负责"任意进制数字串 ⇄ 任意精度整数"的转换，不关心流程

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::ConversionError;

/// 支持的最小进制
pub const MIN_BASE: u32 = 2;

/// 支持的最大进制
pub const MAX_BASE: u32 = 36;

/// 校验进制是否在 [2, 36] 内
pub fn ensure_base(base: u32) -> Result<(), ConversionError> {
    checked_base(i64::from(base)).map(|_| ())
}

/// 校验调用方给出的进制，返回可用于转换的 `u32`
///
/// 请求中的进制按有符号整数接收，负数也在这里报告为 `InvalidBase`
pub fn checked_base(base: i64) -> Result<u32, ConversionError> {
    match u32::try_from(base) {
        Ok(b) if (MIN_BASE..=MAX_BASE).contains(&b) => Ok(b),
        _ => Err(ConversionError::InvalidBase { base }),
    }
}

/// 将 `base` 进制的数字串解析为整数
///
/// - 字母不区分大小写
/// - 支持前导 `-` 或 `+`
/// - 忽略首尾空白
/// - 不接受 `_` 分隔符
///
/// # 错误
/// - 进制越界返回 `InvalidBase`
/// - 空串（包括单独的符号）或存在无效字符返回 `InvalidDigit`
pub fn parse(digits: &str, base: u32) -> Result<BigInt, ConversionError> {
    ensure_base(base)?;

    let trimmed = digits.trim();
    let (sign, magnitude) = if let Some(rest) = trimmed.strip_prefix('-') {
        (Sign::Minus, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (Sign::Plus, rest)
    } else {
        (Sign::Plus, trimmed)
    };

    // 先逐字符校验：parse_bytes 自身会接受 `_`
    if magnitude.is_empty() || !magnitude.chars().all(|ch| ch.is_digit(base)) {
        return Err(ConversionError::invalid_digit(digits, base));
    }

    // 按机器字分块累加，避免每位一次大整数乘法
    let value = BigUint::parse_bytes(magnitude.as_bytes(), base)
        .ok_or_else(|| ConversionError::invalid_digit(digits, base))?;

    // from_biguint 会把 -0 规整为 0
    Ok(BigInt::from_biguint(sign, value))
}

/// 将整数格式化为 `base` 进制数字串
///
/// 字母一律大写；0 输出 `"0"`，负数带前导 `-`
pub fn format(value: &BigInt, base: u32) -> Result<String, ConversionError> {
    ensure_base(base)?;

    // to_str_radix 每次除以能放进一个机器字的 base^k，一次产出 k 位
    let mut out = value.to_str_radix(base);
    out.make_ascii_uppercase();
    Ok(out)
}
