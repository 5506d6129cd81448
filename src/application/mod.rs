//! Application Layer - Use Cases and Business Workflows
//!
//! This layer orchestrates domain entities and defines application-specific workflows.
//! It contains:
//! - **Use Cases**: Single-purpose operations (RecordCall, OpenRecording, DeleteHistoryEvent)
//! - **Ports**: Interfaces for external dependencies (file system)
//!
//! # Clean Architecture Rules
//! - Depends only on the domain layer
//! - Defines ports that infrastructure implements
//! - Contains no framework-specific code

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::*;
pub use use_cases::*;
