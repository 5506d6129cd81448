//! HistoryEventStore - section-file backed call-history repository
//!
//! Records live in memory keyed by call id and are mirrored to a section
//! file, one section per record named after the event id. Every mutation
//! rewrites the whole file, so the file is always a snapshot of the map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::application::ports::filesystem_port::FileSystemPort;
use crate::domain::entities::HistoryEvent;
use crate::domain::errors::DomainError;
use crate::domain::repositories::history_repository::HistoryEventRepository;
use crate::infrastructure::section_file::SectionFile;

const CALL_ID: &str = "call_id";
const VIEWED_BY_USER: &str = "viewed_by_user";
const MEDIA_FILE_NAME: &str = "media_file_name";
const MEDIA_THUMBNAIL_FILE_NAME: &str = "media_thumbnail_file_name";
const HAS_VIDEO: &str = "has_video";

/// Store handle shared between callers
pub type SharedHistoryStore<F> = Arc<Mutex<HistoryEventStore<F>>>;

/// Section-file backed history repository
pub struct HistoryEventStore<F: FileSystemPort> {
    file_system: Arc<F>,
    path: PathBuf,
    sections: SectionFile,
    records: HashMap<String, HistoryEvent>,
}

impl<F: FileSystemPort> HistoryEventStore<F> {
    /// Open the store at `path`, creating an empty file if absent.
    ///
    /// A file that cannot be parsed is treated as empty; it is replaced on
    /// the next sync. IO failures are returned.
    pub fn open(file_system: Arc<F>, path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        file_system.ensure_file(&path)?;

        let mut store = Self {
            file_system,
            path,
            sections: SectionFile::new(),
            records: HashMap::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Wrap the store in a shared handle
    pub fn into_shared(self) -> SharedHistoryStore<F> {
        Arc::new(Mutex::new(self))
    }

    /// Get the history file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn read_sections(&self) -> Result<SectionFile, DomainError> {
        let content = self.file_system.read_string(&self.path)?;
        Ok(SectionFile::parse(&content)?)
    }

    fn decode(sections: &SectionFile) -> HashMap<String, HistoryEvent> {
        let mut records = HashMap::new();

        for id in sections.section_names() {
            let Some(call_id) = sections.get_string(&id, CALL_ID) else {
                debug!(section = %id, "Skipping history section without call id");
                continue;
            };

            let event = HistoryEvent {
                call_id: call_id.to_string(),
                viewed_by_user: sections.get_bool(&id, VIEWED_BY_USER, false),
                media_file_name: sections
                    .get_string(&id, MEDIA_FILE_NAME)
                    .unwrap_or_default()
                    .to_string(),
                media_thumbnail_file_name: sections
                    .get_string(&id, MEDIA_THUMBNAIL_FILE_NAME)
                    .unwrap_or_default()
                    .to_string(),
                has_video: sections.get_bool(&id, HAS_VIDEO, false),
                id,
            };
            records.insert(event.call_id.clone(), event);
        }

        records
    }

    fn delete_media(&self, path: &str) -> Result<(), DomainError> {
        let path = Path::new(path);
        if !path.as_os_str().is_empty() && self.file_system.exists(path) {
            self.file_system.remove_file(path)?;
            debug!(path = %path.display(), "Deleted history media");
        }
        Ok(())
    }
}

impl<F: FileSystemPort> HistoryEventRepository for HistoryEventStore<F> {
    fn load(&self) -> Result<HashMap<String, HistoryEvent>, DomainError> {
        if !self.file_system.exists(&self.path) {
            return Ok(HashMap::new());
        }

        Ok(Self::decode(&self.read_sections()?))
    }

    fn reload(&mut self) -> Result<(), DomainError> {
        let sections = if self.file_system.exists(&self.path) {
            match self.read_sections() {
                Ok(sections) => sections,
                Err(e) if e.is_recoverable() => {
                    warn!(path = %self.path.display(), error = %e, "History file unreadable, starting empty");
                    SectionFile::new()
                }
                Err(e) => return Err(e),
            }
        } else {
            SectionFile::new()
        };

        self.records = Self::decode(&sections);
        self.sections = sections;

        info!(
            count = self.records.len(),
            path = %self.path.display(),
            "Loaded history events"
        );
        Ok(())
    }

    fn sync(&mut self) -> Result<(), DomainError> {
        for name in self.sections.section_names() {
            self.sections.clean_section(&name);
        }

        for event in self.records.values() {
            let id = event.id.as_str();
            self.sections.set_bool(id, VIEWED_BY_USER, event.viewed_by_user);
            self.sections.set_string(id, MEDIA_FILE_NAME, &event.media_file_name);
            self.sections
                .set_string(id, MEDIA_THUMBNAIL_FILE_NAME, &event.media_thumbnail_file_name);
            self.sections.set_string(id, CALL_ID, &event.call_id);
            self.sections.set_bool(id, HAS_VIDEO, event.has_video);
        }

        let content = self.sections.dump()?;
        self.file_system.write_string(&self.path, &content)?;

        debug!(count = self.records.len(), "Synced history events");
        Ok(())
    }

    fn persist(&mut self, event: HistoryEvent) -> Result<(), DomainError> {
        if !event.has_call_id() {
            return Ok(());
        }

        self.records.insert(event.call_id.clone(), event);
        self.sync()
    }

    fn remove(&mut self, event: &HistoryEvent) -> Result<(), DomainError> {
        // A failed delete keeps the record so the caller can retry
        self.delete_media(&event.media_file_name)?;
        self.delete_media(&event.media_thumbnail_file_name)?;

        self.records.remove(&event.call_id);
        self.sync()
    }

    fn remove_by_call_id(&mut self, call_id: &str) -> Result<(), DomainError> {
        match self.find_by_call_id(call_id) {
            Some(event) => self.remove(&event),
            None => Ok(()),
        }
    }

    fn find_by_call_id(&self, call_id: &str) -> Option<HistoryEvent> {
        self.records.get(call_id).cloned()
    }

    fn mark_as_read(&mut self, event_id: &str) -> Result<(), DomainError> {
        let matches: Vec<HistoryEvent> = self
            .records
            .values()
            .filter(|event| event.id == event_id)
            .cloned()
            .collect();

        for event in matches {
            self.persist(event.viewed(true))?;
        }

        Ok(())
    }

    fn events(&self) -> Vec<HistoryEvent> {
        let mut events: Vec<HistoryEvent> = self.records.values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.call_id.cmp(&b.call_id)));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::filesystem::StdFileSystem;
    use crate::infrastructure::memory_filesystem::InMemoryFileSystem;
    use std::fs;
    use tempfile::TempDir;

    const HISTORY: &str = "/memory/history_events.toml";

    fn memory_store() -> (Arc<InMemoryFileSystem>, HistoryEventStore<InMemoryFileSystem>) {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = HistoryEventStore::open(fs.clone(), HISTORY).unwrap();
        (fs, store)
    }

    fn disk_store(dir: &TempDir) -> HistoryEventStore<StdFileSystem> {
        let fs = Arc::new(StdFileSystem::with_data_dir(dir.path().to_path_buf()));
        HistoryEventStore::open(fs, dir.path().join("history_events.toml")).unwrap()
    }

    #[test]
    fn test_open_creates_missing_file() {
        let (fs, store) = memory_store();

        assert!(store.is_empty());
        assert!(fs.exists(Path::new(HISTORY)));
        assert_eq!(fs.read_string(Path::new(HISTORY)).unwrap(), "");
    }

    #[test]
    fn test_persist_mark_as_read_example() {
        let (_fs, mut store) = memory_store();

        let event = HistoryEvent::new("s1", "c1");
        store.persist(event.clone()).unwrap();
        assert_eq!(store.find_by_call_id("c1"), Some(event));

        store.mark_as_read("s1").unwrap();
        assert!(store.find_by_call_id("c1").unwrap().viewed_by_user);
    }

    #[test]
    fn test_persist_without_call_id_is_ignored() {
        let (fs, mut store) = memory_store();

        store.persist(HistoryEvent::new("s1", "")).unwrap();

        assert!(store.is_empty());
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_persist_replaces_same_call_id() {
        let (_fs, mut store) = memory_store();

        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        store
            .persist(HistoryEvent::new("s2", "c1").with_video(true))
            .unwrap();

        assert_eq!(store.len(), 1);
        let event = store.find_by_call_id("c1").unwrap();
        assert_eq!(event.id, "s2");
        assert!(event.has_video);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["c1"].id, "s2");
    }

    #[test]
    fn test_round_trip_through_fresh_store() {
        let dir = TempDir::new().unwrap();
        let events = vec![
            HistoryEvent::new("s1", "c1"),
            HistoryEvent::new("s2", "c2")
                .with_media("/rec/c2.mkv", "/rec/c2.jpg")
                .with_video(true),
            HistoryEvent::new("s3", "c3").viewed(true),
        ];

        {
            let mut store = disk_store(&dir);
            for event in events.iter().rev() {
                store.persist(event.clone()).unwrap();
            }
        }

        let store = disk_store(&dir);
        assert_eq!(store.events(), events);
        for event in &events {
            assert_eq!(store.find_by_call_id(&event.call_id).as_ref(), Some(event));
        }
    }

    #[test]
    fn test_sync_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = disk_store(&dir);
        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        store
            .persist(HistoryEvent::new("s2", "c2").with_media("a.mkv", "a.jpg"))
            .unwrap();

        store.sync().unwrap();
        let first = fs::read(store.path()).unwrap();
        store.sync().unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_without_call_id_are_skipped() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.insert(
            HISTORY,
            r#"
[s1]
call_id = "c1"
viewed_by_user = true

[s2]
media_file_name = "orphan.mkv"

[s3]
call_id = "c3"

[s4]
has_video = true
"#,
        );

        let store = HistoryEventStore::open(fs, HISTORY).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.find_by_call_id("c1").unwrap().viewed_by_user);
        let c3 = store.find_by_call_id("c3").unwrap();
        assert_eq!(c3.id, "s3");
        assert!(c3.media_file_name.is_empty());
        assert!(!c3.has_video);
    }

    #[test]
    fn test_sync_drops_stale_sections() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.insert(HISTORY, "[s1]\ncall_id = \"c1\"\n\n[orphan]\nhas_video = true\n");
        let mut store = HistoryEventStore::open(fs.clone(), HISTORY).unwrap();

        store.remove_by_call_id("c1").unwrap();

        assert_eq!(fs.read_string(Path::new(HISTORY)).unwrap(), "");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_is_repaired() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.insert(HISTORY, "this is [not a section file");

        let mut store = HistoryEventStore::open(fs.clone(), HISTORY).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.load(), Err(DomainError::StorageCorrupt(_))));

        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_non_utf8_file_on_disk_starts_empty_and_is_repaired() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history_events.toml");
        fs::write(&path, [0xff, 0xfe, b'[', b's', b'1', b']']).unwrap();

        let mut store = disk_store(&dir);
        assert!(store.is_empty());
        assert!(matches!(store.load(), Err(DomainError::StorageCorrupt(_))));

        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        assert_eq!(disk_store(&dir).find_by_call_id("c1").unwrap().id, "s1");
    }

    #[test]
    fn test_read_failure_propagates_from_open() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.insert(HISTORY, "[s1]\ncall_id = \"c1\"\n");
        fs.set_fail_reads(true);

        match HistoryEventStore::open(fs.clone(), HISTORY) {
            Err(DomainError::StorageIo(_)) => {}
            Err(e) => panic!("Expected StorageIo error, got {:?}", e),
            Ok(_) => panic!("Expected open to fail"),
        }

        fs.set_fail_reads(false);
        assert_eq!(HistoryEventStore::open(fs, HISTORY).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_deletes_media() {
        let dir = TempDir::new().unwrap();
        let media = dir.path().join("c1.mkv");
        let thumbnail = dir.path().join("c1.jpg");
        fs::write(&media, b"video").unwrap();
        fs::write(&thumbnail, b"image").unwrap();

        let mut store = disk_store(&dir);
        let event = HistoryEvent::new("s1", "c1")
            .with_media(media.to_string_lossy(), thumbnail.to_string_lossy());
        store.persist(event.clone()).unwrap();

        store.remove(&event).unwrap();

        assert!(!media.exists());
        assert!(!thumbnail.exists());
        assert!(store.find_by_call_id("c1").is_none());
        assert!(disk_store(&dir).is_empty());
    }

    #[test]
    fn test_remove_with_missing_media() {
        let (_fs, mut store) = memory_store();
        let event = HistoryEvent::new("s1", "c1").with_media("/memory/gone.mkv", "");
        store.persist(event.clone()).unwrap();

        store.remove(&event).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_by_call_id() {
        let (fs, mut store) = memory_store();
        fs.insert("/memory/c1.mkv", "video");
        store
            .persist(HistoryEvent::new("s1", "c1").with_media("/memory/c1.mkv", ""))
            .unwrap();
        store.persist(HistoryEvent::new("s2", "c2")).unwrap();

        store.remove_by_call_id("unknown").unwrap();
        assert_eq!(store.len(), 2);

        store.remove_by_call_id("c1").unwrap();
        assert_eq!(store.len(), 1);
        assert!(!fs.exists(Path::new("/memory/c1.mkv")));
        assert!(store.find_by_call_id("c2").is_some());
    }

    #[test]
    fn test_failed_media_delete_keeps_record() {
        let (fs, mut store) = memory_store();
        fs.insert("/memory/c1.mkv", "video");
        let event = HistoryEvent::new("s1", "c1").with_media("/memory/c1.mkv", "");
        store.persist(event.clone()).unwrap();

        fs.set_fail_writes(true);
        let result = store.remove(&event);

        assert!(matches!(result, Err(DomainError::StorageIo(_))));
        assert_eq!(store.find_by_call_id("c1"), Some(event));
    }

    #[test]
    fn test_write_failure_surfaces_and_keeps_file() {
        let (fs, mut store) = memory_store();
        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        let before = fs.read_string(Path::new(HISTORY)).unwrap();

        fs.set_fail_writes(true);
        let result = store.persist(HistoryEvent::new("s2", "c2"));

        assert!(matches!(result, Err(DomainError::StorageIo(_))));
        assert_eq!(fs.read_string(Path::new(HISTORY)).unwrap(), before);
    }

    #[test]
    fn test_mark_as_read_absent_id_writes_nothing() {
        let (fs, mut store) = memory_store();
        store.mark_as_read("s1").unwrap();
        assert_eq!(fs.write_count(), 0);

        store.persist(HistoryEvent::new("s1", "c1")).unwrap();
        store.mark_as_read("other").unwrap();
        assert_eq!(fs.write_count(), 1);
        assert!(!store.find_by_call_id("c1").unwrap().viewed_by_user);
    }

    #[test]
    fn test_mark_as_read_applies_to_every_match() {
        let (fs, mut store) = memory_store();
        store.persist(HistoryEvent::new("dup", "c1")).unwrap();
        store.persist(HistoryEvent::new("dup", "c2")).unwrap();
        store.persist(HistoryEvent::new("s3", "c3")).unwrap();
        let writes = fs.write_count();

        store.mark_as_read("dup").unwrap();

        assert_eq!(fs.write_count(), writes + 2);
        assert!(store.find_by_call_id("c1").unwrap().viewed_by_user);
        assert!(store.find_by_call_id("c2").unwrap().viewed_by_user);
        assert!(!store.find_by_call_id("c3").unwrap().viewed_by_user);
    }

    #[test]
    fn test_reload_discards_unflushed_state() {
        let (fs, mut store) = memory_store();
        store.persist(HistoryEvent::new("s1", "c1")).unwrap();

        fs.set_fail_writes(true);
        let _ = store.persist(HistoryEvent::new("s2", "c2"));
        assert_eq!(store.len(), 2);

        fs.set_fail_writes(false);
        store.reload().unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_call_id("c2").is_none());
    }

    #[test]
    fn test_shared_handle() {
        let (_fs, store) = memory_store();
        let shared = store.into_shared();

        shared.lock().persist(HistoryEvent::new("s1", "c1")).unwrap();

        assert_eq!(shared.lock().len(), 1);
    }
}
