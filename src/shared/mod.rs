//! Shared Utilities Module
//!
//! Contains utilities that are shared across layers.

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::{EngineLogBridge, EngineLogLevel, LogMask};
