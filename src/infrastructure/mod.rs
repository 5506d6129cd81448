//! Infrastructure Layer
//!
//! This layer contains concrete implementations of all interfaces.
//! It contains:
//! - **FileSystem**: Disk and in-memory file systems
//! - **SectionFile**: Section codec for the history file
//! - **CompositionRoot**: Dependency injection container
//!
//! # Clean Architecture Rules
//! - Implements ports defined in application layer
//! - No domain logic here - only technical implementations

pub mod composition_root;
pub mod filesystem;
pub mod memory_filesystem;
pub mod section_file;

pub use composition_root::CompositionRoot;
pub use filesystem::StdFileSystem;
pub use memory_filesystem::InMemoryFileSystem;
pub use section_file::{SectionFile, SectionFileError};
