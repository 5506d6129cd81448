//! CompositionRoot - Dependency Injection Container
//!
//! This module wires together all the dependencies for the application.
//! It owns the history store and hands out shared handles and use cases.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::adapters::gateways::{HistoryEventStore, SharedHistoryStore};
use crate::application::ports::filesystem_port::FileSystemPort;
use crate::application::use_cases::{
    DeleteHistoryEventUseCase, OpenRecordingUseCase, RecordCallUseCase,
};
use crate::domain::errors::DomainError;
use crate::domain::repositories::HistoryEventRepository;
use crate::infrastructure::filesystem::StdFileSystem;
use crate::shared::config::AppConfig;
use crate::shared::logging::EngineLogBridge;

/// Application composition root - owns all dependencies
pub struct CompositionRoot<F: FileSystemPort = StdFileSystem> {
    /// Configuration the root was built from
    pub config: AppConfig,
    /// Bridge for the telephony engine's log stream
    pub log_bridge: EngineLogBridge,
    file_system: Arc<F>,
    history_store: SharedHistoryStore<F>,
}

impl CompositionRoot<StdFileSystem> {
    /// Create a composition root from the config found on disk
    pub fn new() -> Result<Self, DomainError> {
        Self::with_config(AppConfig::load())
    }

    /// Create with a custom configuration on the real file system
    pub fn with_config(config: AppConfig) -> Result<Self, DomainError> {
        let file_system = match &config.storage.data_dir {
            Some(dir) => StdFileSystem::with_data_dir(dir.clone()),
            None => StdFileSystem::new(),
        };
        Self::with_file_system(config, Arc::new(file_system))
    }
}

impl<F: FileSystemPort> CompositionRoot<F> {
    /// Create on top of any file system
    pub fn with_file_system(config: AppConfig, file_system: Arc<F>) -> Result<Self, DomainError> {
        let data_dir = config.data_dir(&file_system.app_data_dir());
        file_system.create_dir(&data_dir)?;

        let history_path = config.history_path(&file_system.app_data_dir());
        let history_store = HistoryEventStore::open(file_system.clone(), history_path)?.into_shared();
        let log_bridge = EngineLogBridge::from_config(&config.logging);

        info!(data_dir = %data_dir.display(), "Composition root ready");

        Ok(Self {
            config,
            log_bridge,
            file_system,
            history_store,
        })
    }

    /// Shared handle to the history store
    pub fn history_store(&self) -> SharedHistoryStore<F> {
        self.history_store.clone()
    }

    /// File system in use
    pub fn file_system(&self) -> Arc<F> {
        self.file_system.clone()
    }

    /// Get history file path
    pub fn history_path(&self) -> PathBuf {
        self.history_store.lock().path().to_path_buf()
    }

    /// Re-read history from disk, discarding unflushed in-memory state
    pub fn reload_history(&self) -> Result<(), DomainError> {
        self.history_store.lock().reload()
    }

    /// Use case for storing a terminated call
    pub fn record_call(&self) -> RecordCallUseCase<HistoryEventStore<F>> {
        RecordCallUseCase::new(self.history_store())
    }

    /// Use case for opening a recording for playback
    pub fn open_recording(&self) -> OpenRecordingUseCase<HistoryEventStore<F>> {
        OpenRecordingUseCase::new(self.history_store())
    }

    /// Use case for deleting a call's history
    pub fn delete_history_event(&self) -> DeleteHistoryEventUseCase<HistoryEventStore<F>> {
        DeleteHistoryEventUseCase::new(self.history_store())
    }
}
