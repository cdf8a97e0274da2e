pub mod endpoint;
pub mod operator;
pub mod request;
pub mod stage;
pub mod wire;

pub use endpoint::Endpoint;
pub use operator::Operator;
pub use request::{CalcRequest, CalcResponse, StagedCalcRequest};
pub use stage::Stage;
