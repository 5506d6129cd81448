//! Application Ports - Interfaces for external dependencies
//!
//! Ports define the interfaces that infrastructure must implement.
//! They allow the application layer to remain framework-agnostic.

pub mod filesystem_port;

pub use filesystem_port::{FileSystemError, FileSystemPort};
