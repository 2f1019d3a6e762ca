//! Pipeline orchestration and wire types.

pub mod processor;
pub mod types;

pub use processor::MessageProcessor;
pub use types::{DispatchResponse, IncomingMessage, NluResponse};
