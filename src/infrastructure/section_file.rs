//! SectionFile - named key/value sections stored as TOML tables
//!
//! Every top-level table is a section. Section names are quoted by the
//! encoder when needed, so arbitrary identifiers survive a round trip.
//! Sections and keys are emitted in sorted order, so encoding the same
//! sections twice yields identical bytes.
//!
//! ```text
//! [s1]
//! call_id = "c1"
//! viewed_by_user = false
//! ```

use toml::{Table, Value};

use crate::domain::errors::DomainError;

/// Section file error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionFileError {
    /// Content is not valid TOML
    Parse(String),
    /// A top-level entry is a plain value instead of a section
    NotASection(String),
    /// Sections could not be encoded
    Encode(String),
}

impl std::fmt::Display for SectionFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionFileError::Parse(s) => write!(f, "Parse error: {}", s),
            SectionFileError::NotASection(name) => {
                write!(f, "Top-level entry '{}' is not a section", name)
            }
            SectionFileError::Encode(s) => write!(f, "Encode error: {}", s),
        }
    }
}

impl std::error::Error for SectionFileError {}

impl From<SectionFileError> for DomainError {
    fn from(err: SectionFileError) -> Self {
        DomainError::StorageCorrupt(err.to_string())
    }
}

/// Parsed section file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionFile {
    sections: Table,
}

impl SectionFile {
    /// Create a file with no sections
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored content. Blank content has zero sections.
    pub fn parse(content: &str) -> Result<Self, SectionFileError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let sections: Table =
            toml::from_str(content).map_err(|e| SectionFileError::Parse(e.to_string()))?;

        if let Some((name, _)) = sections.iter().find(|(_, value)| !value.is_table()) {
            return Err(SectionFileError::NotASection(name.clone()));
        }

        Ok(Self { sections })
    }

    /// Encode all sections
    pub fn dump(&self) -> Result<String, SectionFileError> {
        toml::to_string(&self.sections).map_err(|e| SectionFileError::Encode(e.to_string()))
    }

    /// Names of all sections
    pub fn section_names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Read a string field
    pub fn get_string(&self, section: &str, key: &str) -> Option<&str> {
        self.field(section, key).and_then(Value::as_str)
    }

    /// Read a boolean field, falling back to `default` when absent or mistyped
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.field(section, key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Write a string field, creating the section if needed
    pub fn set_string(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section)
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Write a boolean field, creating the section if needed
    pub fn set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.section_mut(section)
            .insert(key.to_string(), Value::Boolean(value));
    }

    /// Drop a section and all its fields
    pub fn clean_section(&mut self, section: &str) {
        self.sections.remove(section);
    }

    fn field(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections
            .get(section)
            .and_then(Value::as_table)
            .and_then(|table| table.get(key))
    }

    fn section_mut(&mut self, section: &str) -> &mut Table {
        let entry = self
            .sections
            .entry(section.to_string())
            .or_insert_with(|| Value::Table(Table::new()));

        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }

        match entry {
            Value::Table(table) => table,
            _ => unreachable!("section entry was just made a table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_has_no_sections() {
        assert!(SectionFile::parse("").unwrap().is_empty());
        assert!(SectionFile::parse("  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_get_with_defaults() {
        let file = SectionFile::parse(
            r#"
[s1]
call_id = "c1"
has_video = true
"#,
        )
        .unwrap();

        assert_eq!(file.section_names(), vec!["s1".to_string()]);
        assert_eq!(file.get_string("s1", "call_id"), Some("c1"));
        assert_eq!(file.get_string("s1", "media_file_name"), None);
        assert!(file.get_bool("s1", "has_video", false));
        assert!(!file.get_bool("s1", "viewed_by_user", false));
        assert!(file.get_bool("missing", "viewed_by_user", true));
    }

    #[test]
    fn test_mistyped_field_uses_default() {
        let file = SectionFile::parse("[s1]\nhas_video = \"yes\"\ncall_id = 7\n").unwrap();

        assert!(!file.get_bool("s1", "has_video", false));
        assert_eq!(file.get_string("s1", "call_id"), None);
    }

    #[test]
    fn test_set_and_dump() {
        let mut file = SectionFile::new();
        file.set_string("s1", "call_id", "c1");
        file.set_bool("s1", "has_video", false);

        let reparsed = SectionFile::parse(&file.dump().unwrap()).unwrap();
        assert_eq!(reparsed, file);
    }

    #[test]
    fn test_unusual_section_names() {
        let mut file = SectionFile::new();
        file.set_string("sip:door@example.org [front]", "call_id", "c1");
        file.set_string("a.b", "call_id", "c2");

        let reparsed = SectionFile::parse(&file.dump().unwrap()).unwrap();
        assert_eq!(
            reparsed.get_string("sip:door@example.org [front]", "call_id"),
            Some("c1")
        );
        assert_eq!(reparsed.get_string("a.b", "call_id"), Some("c2"));
    }

    #[test]
    fn test_clean_section() {
        let mut file = SectionFile::new();
        file.set_string("s1", "call_id", "c1");
        file.set_string("s2", "call_id", "c2");

        file.clean_section("s1");
        file.clean_section("unknown");

        assert_eq!(file.section_names(), vec!["s2".to_string()]);
    }

    #[test]
    fn test_dump_is_stable() {
        let mut first = SectionFile::new();
        first.set_string("b", "call_id", "c2");
        first.set_string("a", "call_id", "c1");

        let mut second = SectionFile::new();
        second.set_string("a", "call_id", "c1");
        second.set_string("b", "call_id", "c2");

        assert_eq!(first.dump().unwrap(), second.dump().unwrap());
    }

    #[test]
    fn test_invalid_content() {
        assert!(matches!(
            SectionFile::parse("[s1\ncall_id ="),
            Err(SectionFileError::Parse(_))
        ));
        assert_eq!(
            SectionFile::parse("call_id = \"c1\"\n"),
            Err(SectionFileError::NotASection("call_id".to_string()))
        );
    }

    #[test]
    fn test_error_maps_to_storage_corrupt() {
        let err: DomainError = SectionFileError::NotASection("x".to_string()).into();
        assert!(err.is_recoverable());
    }
}
