/// 分阶段流水线中的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 转换第一个操作数
    ConvertFirst,
    /// 转换第二个操作数
    ConvertSecond,
    /// 执行运算
    Operate,
    /// 格式化结果
    Format,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Stage::ConvertFirst => "conversion of first operand",
            Stage::ConvertSecond => "conversion of second operand",
            Stage::Operate => "operation",
            Stage::Format => "formatting",
        };
        f.write_str(text)
    }
}
