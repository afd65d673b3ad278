pub mod http;
pub mod stub;
mod types;

pub use types::{CodeGeneration, GenerateRequest, Provider, ServiceClient};
