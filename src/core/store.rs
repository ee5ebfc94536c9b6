/// File-backed store of issued ring names with a uniqueness constraint.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::collaborators::{CollaboratorError, InMemoryRegistry, NameRegistry};
use crate::schema::name::{AnnotatedName, GeneratedName};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Either form is already persisted. Callers may skip and continue.
    #[error("duplicate name: {native} / {romanized}")]
    Duplicate { native: String, romanized: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub native: String,
    pub romanized: String,
    #[serde(default)]
    pub meaning: Option<String>,
}

impl From<GeneratedName> for NameRecord {
    fn from(name: GeneratedName) -> Self {
        Self {
            native: name.native,
            romanized: name.romanized,
            meaning: None,
        }
    }
}

impl From<AnnotatedName> for NameRecord {
    fn from(annotated: AnnotatedName) -> Self {
        Self {
            meaning: Some(annotated.meaning),
            ..annotated.name.into()
        }
    }
}

/// Names persisted to a RON file.
///
/// Every native and romanized form is unique across the store. Changes
/// are held in memory until [`NameStore::save`].
#[derive(Debug)]
pub struct NameStore {
    path: PathBuf,
    records: Vec<NameRecord>,
    forms: FxHashSet<String>,
}

impl NameStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let records: Vec<NameRecord> = if path.exists() {
            ron::from_str(&std::fs::read_to_string(path)?)?
        } else {
            Vec::new()
        };

        let mut store = Self {
            path: path.to_path_buf(),
            records: Vec::with_capacity(records.len()),
            forms: FxHashSet::default(),
        };
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Add a record, rejecting it if either form is already stored.
    pub fn insert(&mut self, record: NameRecord) -> Result<(), StoreError> {
        if self.forms.contains(&record.native) || self.forms.contains(&record.romanized) {
            return Err(StoreError::Duplicate {
                native: record.native,
                romanized: record.romanized,
            });
        }
        self.forms.insert(record.native.clone());
        self.forms.insert(record.romanized.clone());
        self.records.push(record);
        Ok(())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = ron::ser::to_string_pretty(&self.records, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Point-in-time registry of every stored form.
    pub fn snapshot(&self) -> InMemoryRegistry {
        InMemoryRegistry::from_names(self.forms.iter().cloned())
    }
}

impl NameRegistry for NameStore {
    fn exists(&self, form: &str) -> Result<bool, CollaboratorError> {
        Ok(self.forms.contains(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(native: &str, romanized: &str) -> NameRecord {
        NameRecord {
            native: native.to_string(),
            romanized: romanized.to_string(),
            meaning: None,
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = NameStore::open(&dir.path().join("names.ron")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn duplicates_rejected_on_either_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NameStore::open(&dir.path().join("names.ron")).unwrap();
        store.insert(record("白鵬", "hakuho")).unwrap();

        assert!(matches!(
            store.insert(record("白鵬", "hakuhou")),
            Err(StoreError::Duplicate { .. })
        ));
        assert!(matches!(
            store.insert(record("博鵬", "hakuho")),
            Err(StoreError::Duplicate { .. })
        ));
        assert_eq!(store.len(), 1);
        assert!(store.exists("hakuho").unwrap());
        assert!(!store.exists("taiho").unwrap());
    }

    #[test]
    fn save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("names.ron");

        let mut store = NameStore::open(&path).unwrap();
        store.insert(record("白鵬", "hakuho")).unwrap();
        store
            .insert(NameRecord::from(AnnotatedName {
                name: GeneratedName {
                    native: "大鵬".to_string(),
                    romanized: "daiho".to_string(),
                },
                meaning: "great phoenix".to_string(),
            }))
            .unwrap();
        store.save().unwrap();

        let reopened = NameStore::open(&path).unwrap();
        assert_eq!(reopened.records(), store.records());
        assert_eq!(reopened.records()[1].meaning.as_deref(), Some("great phoenix"));
        assert!(reopened.snapshot().exists("daiho").unwrap());
    }

    #[test]
    fn duplicate_in_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.ron");
        std::fs::write(
            &path,
            r#"[(native: "白鵬", romanized: "hakuho"), (native: "白鵬", romanized: "x")]"#,
        )
        .unwrap();
        assert!(matches!(NameStore::open(&path), Err(StoreError::Duplicate { .. })));
    }
}
