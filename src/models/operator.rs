use crate::error::BusinessError;

/// 运算符枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// 加法
    Add,
    /// 减法
    Sub,
    /// 乘法
    Mul,
    /// 整除
    Div,
}

/// 运算符别名表（键均为小写）
static OPERATOR_ALIASES: phf::Map<&'static str, Operator> = phf::phf_map! {
    "add" => Operator::Add,
    "sum" => Operator::Add,
    "sub" => Operator::Sub,
    "subtract" => Operator::Sub,
    "mul" => Operator::Mul,
    "multiply" => Operator::Mul,
    "div" => Operator::Div,
    "divide" => Operator::Div,
};

impl Operator {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
        }
    }

    /// 解析运算符（忽略大小写，支持别名）
    ///
    /// 未识别的运算符返回 `UnsupportedOperation`，不会触发任何远程调用
    pub fn parse(op: &str) -> Result<Self, BusinessError> {
        OPERATOR_ALIASES
            .get(op.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| BusinessError::unsupported_operation(op))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Operator::parse("add").unwrap(), Operator::Add);
        assert_eq!(Operator::parse("sub").unwrap(), Operator::Sub);
        assert_eq!(Operator::parse("mul").unwrap(), Operator::Mul);
        assert_eq!(Operator::parse("div").unwrap(), Operator::Div);
    }

    #[test]
    fn test_parse_synonyms_case_insensitive() {
        assert_eq!(Operator::parse("SUM").unwrap(), Operator::Add);
        assert_eq!(Operator::parse("Subtract").unwrap(), Operator::Sub);
        assert_eq!(Operator::parse("multiply").unwrap(), Operator::Mul);
        assert_eq!(Operator::parse("DiViDe").unwrap(), Operator::Div);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = Operator::parse("xor").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported operation: xor");
        assert!(Operator::parse("").is_err());
    }
}
