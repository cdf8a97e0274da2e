//! # Calc Gateway
//!
//! 任意进制计算网关：把算术请求委托给远程算术服务，
//! 远程失败时使用任意精度整数在本地计算
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端，只暴露能力
//! - `RemoteCaller` - 单次、限时的远程调用
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `base_codec` - 任意进制 ⇄ 任意精度整数
//! - `local_arithmetic` - 本地兜底计算
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个计算请求"的完整处理流程
//! - `FallbackFlow` - 远程调用 → 失败则本地计算
//! - `StagedFlow` - 转换 A → 转换 B → 运算 → 格式化，任一阶段失败即终止
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/gateway` - 应用初始化、路由装配、HTTP 监听
//!
//! ## 模块结构

pub mod api;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{CalcMode, Config};
pub use error::{AppError, AppResult};
pub use infrastructure::RemoteCaller;
pub use models::{CalcRequest, CalcResponse, Endpoint, Operator, StagedCalcRequest};
pub use orchestrator::App;
pub use workflow::{CalcCtx, FallbackFlow, StagedFlow};
