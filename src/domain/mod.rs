//! Domain Layer - Pure business logic with zero external dependencies
//!
//! This layer contains:
//! - **Entities**: Core business objects (HistoryEvent)
//! - **Value Objects**: Immutable values (AudioDevice)
//! - **Repository Interfaces**: Abstractions for data access (no implementations)
//! - **Domain Errors**: Error types for domain operations
//!
//! # Clean Architecture Rules
//! - Zero dependencies on external frameworks
//! - 100% testable without mocks

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
