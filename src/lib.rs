//! Call-history event store for an intercom/doorbell client
//!
//! History events are kept in memory keyed by call id and mirrored to a
//! section file after every change. The crate is layered: `domain` holds
//! the entities and repository traits, `application` the ports and use
//! cases, `adapters` the store, `infrastructure` the file systems, the
//! section codec and the composition root.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use adapters::gateways::{HistoryEventStore, SharedHistoryStore};
pub use domain::entities::HistoryEvent;
pub use domain::errors::DomainError;
pub use domain::repositories::HistoryEventRepository;
pub use infrastructure::CompositionRoot;
