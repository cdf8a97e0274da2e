//! 远程调用器 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"调用远程端点"的能力

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RemoteError;
use crate::models::Endpoint;
use crate::utils::logging::truncate_text;

/// 日志中响应体的最大长度
const LOG_BODY_LIMIT: usize = 200;

/// 配置的超时无法表示为 Duration 时使用
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// 远程调用器
///
/// 职责：
/// - 持有 HTTP 客户端和只读配置
/// - 每次调用只发出一个请求，不重试
/// - 每次调用受超时限制
/// - 不认识 CalcRequest / 流程
#[derive(Clone)]
pub struct RemoteCaller {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl RemoteCaller {
    /// 创建新的远程调用器
    pub fn new(config: Arc<Config>) -> Result<Self, RemoteError> {
        let timeout =
            Duration::try_from_secs_f64(config.remote_timeout_secs).unwrap_or(DEFAULT_TIMEOUT);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RemoteError::ClientInit { source })?;

        Ok(Self { client, config })
    }

    /// 端点对应的 URL
    pub fn endpoint_url(&self, endpoint: Endpoint) -> &str {
        self.config.endpoint_url(endpoint)
    }

    /// POST JSON 负载到远程端点，返回响应 JSON
    ///
    /// # 错误
    /// 连接失败、超时、非 2xx 状态或响应体不是 JSON 时返回 `RemoteError`
    pub async fn invoke<P>(&self, endpoint: Endpoint, payload: &P) -> Result<JsonValue, RemoteError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint);
        debug!("📡 调用 {} ({})", endpoint, url);

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let err = RemoteError::request_failed(url, e);
                if err.is_timeout() {
                    warn!("⏱️ {} 调用超时: {}", endpoint, err);
                } else {
                    warn!("{} 调用失败: {}", endpoint, err);
                }
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} 返回错误状态 {}: {}", endpoint, status, truncate_text(&body, LOG_BODY_LIMIT));
            return Err(RemoteError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body: truncate_text(&body, LOG_BODY_LIMIT),
            });
        }

        let body: JsonValue = response.json().await.map_err(|source| {
            warn!("{} 响应体无法解析: {}", endpoint, source);
            RemoteError::InvalidBody {
                endpoint: url.to_string(),
                source,
            }
        })?;

        debug!(
            "✓ {} 响应: {}",
            endpoint,
            truncate_text(&body.to_string(), LOG_BODY_LIMIT)
        );

        Ok(body)
    }

    /// 调用远程端点并取出第一个存在的字段
    ///
    /// 字段缺失同样视为远程失败
    pub async fn fetch_field<P>(
        &self,
        endpoint: Endpoint,
        payload: &P,
        fields: &[&str],
    ) -> Result<JsonValue, RemoteError>
    where
        P: Serialize + ?Sized,
    {
        let mut body = self.invoke(endpoint, payload).await?;

        fields
            .iter()
            .find_map(|field| body.get_mut(*field).map(JsonValue::take))
            .ok_or_else(|| {
                warn!("{} 响应缺少字段 {:?}", endpoint, fields);
                RemoteError::missing_field(self.endpoint_url(endpoint), fields.join("|"))
            })
    }
}
