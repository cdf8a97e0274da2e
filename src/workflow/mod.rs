pub mod calc_ctx;
pub mod fallback_flow;
pub mod staged_flow;

pub use calc_ctx::CalcCtx;
pub use fallback_flow::FallbackFlow;
pub use staged_flow::StagedFlow;
