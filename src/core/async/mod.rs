//! Asynchronous rule evaluation
//!
//! - `engine` - Detector fan-out on a tokio runtime with in-order fan-in

pub mod engine;

pub use engine::AsyncRuleEngine;
