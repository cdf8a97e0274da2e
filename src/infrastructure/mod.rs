pub mod remote_caller;

pub use remote_caller::RemoteCaller;
