//! 计算网关 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、创建远程调用器和流程
//! 2. **路由装配**：按编排模式挂载 `/calculate`
//! 3. **服务运行**：绑定监听地址，直到收到 Ctrl-C
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一创建 HTTP 客户端的模块
//! - **只读共享**：配置和流程通过 `Arc` 共享，请求之间没有可变状态

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::rest::{build_router, GatewayState};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::RemoteCaller;
use crate::utils::logging::log_startup;
use crate::workflow::{FallbackFlow, StagedFlow};

/// 应用主结构
pub struct App {
    config: Arc<Config>,
    router: Router,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        let config = Arc::new(config);
        let caller = RemoteCaller::new(config.clone())?;

        let state = GatewayState {
            fallback: Arc::new(FallbackFlow::new(caller.clone())),
            staged: Arc::new(StagedFlow::new(caller)),
        };
        let router = build_router(config.mode, state);

        Ok(Self { config, router })
    }

    /// 路由（测试中可直接驱动）
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法绑定监听地址: {}", self.config.bind_addr))?;

        info!("✓ 正在监听 http://{}", self.config.bind_addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 计算网关已停止");
        Ok(())
    }
}

/// 等待 Ctrl-C
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到停止信号，正在关闭...");
    }
}
