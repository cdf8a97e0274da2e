use crate::models::Stage;

/// 应用程序错误类型
///
/// 所有错误最终都会在 REST 层转换为 400 响应，
/// 错误文本即响应中的 `detail` 字段
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 进制转换错误
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// 算术错误
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    /// 远程服务错误
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// 业务逻辑错误
    #[error(transparent)]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 进制转换错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// 进制不在 [2, 36] 范围内
    #[error("base must be between 2 and 36, got {base}")]
    InvalidBase { base: i64 },
    /// 数字串为空或包含该进制下无效的字符
    #[error("invalid literal for base {base}: '{input}'")]
    InvalidDigit { input: String, base: u32 },
}

/// 本地算术错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// 除数为零
    #[error("Division by zero")]
    DivisionByZero,
}

/// 远程服务调用错误
///
/// 统一归类为"远程服务不可用"：连接失败、超时、非 2xx 状态、响应体无法解析
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP 客户端创建失败
    #[error("failed to build HTTP client: {source}")]
    ClientInit { source: reqwest::Error },
    /// 网络请求失败（连接失败或超时）
    #[error("remote service {endpoint} unavailable: {source}")]
    RequestFailed {
        endpoint: String,
        source: reqwest::Error,
    },
    /// 远程服务返回非成功状态码
    #[error("remote service {endpoint} returned status {status}: {body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体不是合法 JSON
    #[error("remote service {endpoint} returned an unreadable body: {source}")]
    InvalidBody {
        endpoint: String,
        source: reqwest::Error,
    },
    /// 响应中缺少期望的字段
    #[error("remote service {endpoint} response is missing field '{field}'")]
    MissingField { endpoint: String, field: String },
    /// 响应字段存在但取值无法使用
    #[error("remote service {endpoint} returned an invalid '{field}': {value}")]
    InvalidField {
        endpoint: String,
        field: String,
        value: String,
    },
}

/// 业务逻辑错误
#[derive(Debug, thiserror::Error)]
pub enum BusinessError {
    /// 不支持的运算符
    #[error("Unsupported operation: {op}")]
    UnsupportedOperation { op: String },
    /// 操作数在给定进制下无效
    #[error("Invalid numbers for base {base}: {source}")]
    InvalidOperand {
        base: u32,
        source: ConversionError,
    },
    /// 请求体缺失、不是 JSON 或字段类型错误
    #[error("Invalid request body: {reason}")]
    MalformedRequest { reason: String },
    /// 本地计算任务异常退出
    #[error("local computation aborted: {0}")]
    LocalTaskFailed(String),
    /// 分阶段流水线中某一阶段失败
    #[error("{stage} failed: {source}")]
    StageFailed { stage: Stage, source: RemoteError },
}

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("failed to read config file {path}: {source}")]
    FileReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("failed to parse config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("environment variable {var_name} has invalid value '{value}', expected {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 超时时间无效
    #[error("remote timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
}

// ========== 便捷构造函数 ==========

impl ConversionError {
    /// 创建无效数字串错误
    pub fn invalid_digit(input: impl Into<String>, base: u32) -> Self {
        ConversionError::InvalidDigit {
            input: input.into(),
            base,
        }
    }
}

impl RemoteError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        RemoteError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建缺少字段错误
    pub fn missing_field(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        RemoteError::MissingField {
            endpoint: endpoint.into(),
            field: field.into(),
        }
    }

    /// 创建字段取值无效错误
    pub fn invalid_field(
        endpoint: impl Into<String>,
        field: impl Into<String>,
        value: &serde_json::Value,
    ) -> Self {
        RemoteError::InvalidField {
            endpoint: endpoint.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// 是否为超时导致的失败
    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::RequestFailed { source, .. } if source.is_timeout())
    }
}

impl BusinessError {
    /// 创建不支持的运算符错误
    pub fn unsupported_operation(op: impl Into<String>) -> Self {
        BusinessError::UnsupportedOperation { op: op.into() }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
