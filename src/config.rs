use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{Endpoint, Operator};

/// 编排模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMode {
    /// 单次远程调用，失败时本地兜底
    #[default]
    Fallback,
    /// 分阶段远程流水线，无兜底
    Staged,
}

impl std::str::FromStr for CalcMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fallback" => Ok(CalcMode::Fallback),
            "staged" => Ok(CalcMode::Staged),
            _ => Err(ConfigError::EnvVarParseFailed {
                var_name: "CALC_MODE".to_string(),
                value: s.to_string(),
                expected_type: "fallback | staged".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CalcMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcMode::Fallback => write!(f, "fallback"),
            CalcMode::Staged => write!(f, "staged"),
        }
    }
}

/// 程序配置
///
/// 启动时构建一次，之后只读，通过 `Arc` 显式传递
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 编排模式
    pub mode: CalcMode,
    /// 单次远程调用超时（秒）
    pub remote_timeout_secs: f64,
    // --- 算术服务 ---
    pub add_service_url: String,
    pub sub_service_url: String,
    pub mul_service_url: String,
    pub div_service_url: String,
    // --- 进制服务（仅分阶段模式） ---
    pub convert_service_url: String,
    pub format_service_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            mode: CalcMode::Fallback,
            remote_timeout_secs: 5.0,
            add_service_url: "http://add-service:8000/add".to_string(),
            sub_service_url: "http://sub-service:8000/sub".to_string(),
            mul_service_url: "http://mul-service:8000/mul".to_string(),
            div_service_url: "http://div-service:8000/div".to_string(),
            convert_service_url: "http://base-service:8000/to-decimal".to_string(),
            format_service_url: "http://base-service:8000/convert".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 完整加载流程：默认值 → `CALC_CONFIG_FILE` 指定的 TOML 文件 → 环境变量 → 校验
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CALC_CONFIG_FILE") {
            Ok(path) => Self::from_toml_file(&path)?,
            Err(_) => Self::default(),
        };

        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 用环境变量覆盖当前值，无法解析的值保持原值
    pub fn with_env_overrides(self) -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(self.bind_addr),
            mode: std::env::var("CALC_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.mode),
            remote_timeout_secs: std::env::var("REMOTE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.remote_timeout_secs),
            add_service_url: std::env::var("ADD_SERVICE_URL").unwrap_or(self.add_service_url),
            sub_service_url: std::env::var("SUB_SERVICE_URL").unwrap_or(self.sub_service_url),
            mul_service_url: std::env::var("MUL_SERVICE_URL").unwrap_or(self.mul_service_url),
            div_service_url: std::env::var("DIV_SERVICE_URL").unwrap_or(self.div_service_url),
            convert_service_url: std::env::var("CONVERT_SERVICE_URL").unwrap_or(self.convert_service_url),
            format_service_url: std::env::var("FORMAT_SERVICE_URL").unwrap_or(self.format_service_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.remote_timeout_secs.is_finite() || self.remote_timeout_secs <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.remote_timeout_secs));
        }
        Ok(())
    }

    /// 远程端点对应的 URL
    pub fn endpoint_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Operation(Operator::Add) => &self.add_service_url,
            Endpoint::Operation(Operator::Sub) => &self.sub_service_url,
            Endpoint::Operation(Operator::Mul) => &self.mul_service_url,
            Endpoint::Operation(Operator::Div) => &self.div_service_url,
            Endpoint::Convert => &self.convert_service_url,
            Endpoint::Format => &self.format_service_url,
        }
    }
}
