pub mod base_codec;
pub mod local_arithmetic;
