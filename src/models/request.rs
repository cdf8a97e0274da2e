use serde::{Deserialize, Serialize};

/// 单次调用 + 本地兜底模式的计算请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcRequest {
    /// 第一个操作数
    pub a: String,
    /// 第二个操作数
    pub b: String,
    /// 操作数与结果共用的进制（有符号接收，越界由流程报告）
    pub base: i64,
    /// 运算符（支持别名）
    pub op: String,
}

/// 分阶段流水线模式的计算请求
///
/// 每个操作数和结果都有各自的进制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedCalcRequest {
    pub a: String,
    pub b: String,
    #[serde(alias = "baseA")]
    pub base_a: i64,
    #[serde(alias = "baseB")]
    pub base_b: i64,
    pub op: String,
    #[serde(alias = "resultBase")]
    pub result_base: i64,
}

/// 计算响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResponse {
    pub result: String,
}

impl CalcResponse {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}
