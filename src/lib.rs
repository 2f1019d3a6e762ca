//! ORION bot: deterministic support-message pipeline for e-commerce
//! customer care in Spanish.

pub mod config;
pub mod error;
pub mod escalation;
pub mod lookup;
pub mod nlu;
pub mod notify;
pub mod pipeline;
pub mod server;
pub mod strategies;
