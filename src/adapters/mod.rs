//! Interface Adapters Layer
//!
//! This layer converts data between the use case format and external formats.
//! It contains:
//! - **Gateways**: Repository implementations
//!
//! # Clean Architecture Rules
//! - Depends on application and domain layers
//! - Implements repositories defined in the domain layer

pub mod gateways;

pub use gateways::*;
