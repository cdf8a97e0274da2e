//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 负责应用生命周期和 HTTP 服务，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (配置、路由、监听)
//!     ↓
//! api::rest (处理 HTTP 请求)
//!     ↓
//! workflow::FallbackFlow / StagedFlow (处理单个计算请求)
//!     ↓
//! services (能力层：base_codec / local_arithmetic)
//!     ↓
//! infrastructure (基础设施：RemoteCaller)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层创建 HTTP 客户端
//! 2. **向下依赖**：编排层 → api → workflow → services / infrastructure
//! 3. **无业务逻辑**：只做装配和启动

pub mod gateway;

pub use gateway::App;
