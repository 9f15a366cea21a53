//! # Persistent Store
//!
//! The catalog is persisted as two JSON blobs in a key-value store: one for
//! the core-course list and one for the electives map. Both are overwritten
//! together after every successful mutation; a store either takes both or
//! neither.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::catalog::{Catalog, Course, Electives};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Key holding the serialized core-course list
pub const COURSES_KEY: &str = "courseList";
/// Key holding the serialized electives map
pub const ELECTIVES_KEY: &str = "electivesList";
/// Where a stored core-course list goes when it can no longer be loaded
pub const REJECTED_COURSES_KEY: &str = "courseList.rejected";
/// Where a stored electives map goes when it can no longer be loaded
pub const REJECTED_ELECTIVES_KEY: &str = "electivesList.rejected";

/// A string-keyed blob store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several keys at once. Either every entry lands or none does.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_many(entries)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_many(entries)
    }
}

/// The two persisted blobs, as raw JSON text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub courses: String,
    /// Missing electives parse as an empty map
    pub electives: Option<String>,
}

impl Snapshot {
    /// Read the snapshot from `store`; the courses key decides whether one exists
    pub fn read<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        let Some(courses) = store.get(COURSES_KEY)? else {
            return Ok(None);
        };
        let electives = store.get(ELECTIVES_KEY)?;
        Ok(Some(Self { courses, electives }))
    }

    /// Serialize the current state of `catalog`
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let courses =
            serde_json::to_string(catalog.courses()).context("Failed to serialize courses")?;
        let electives =
            serde_json::to_string(catalog.electives()).context("Failed to serialize electives")?;
        Ok(Self {
            courses,
            electives: Some(electives),
        })
    }

    /// Overwrite both keys in `store` in one write
    pub fn write<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set_many(&[
            (COURSES_KEY, self.courses.as_str()),
            (ELECTIVES_KEY, self.electives.as_deref().unwrap_or("{}")),
        ])
    }

    /// Copy the blobs to the rejected keys so a later write cannot lose them
    pub fn set_aside<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        let mut entries = vec![(REJECTED_COURSES_KEY, self.courses.as_str())];
        if let Some(electives) = &self.electives {
            entries.push((REJECTED_ELECTIVES_KEY, electives.as_str()));
        }
        store
            .set_many(&entries)
            .context("Failed to set aside stored catalog")
    }

    /// Deserialize into a catalog, checking catalog invariants
    pub fn parse(&self) -> Result<Catalog, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(&self.courses)
            .map_err(|e| CatalogError::InvalidCatalog(format!("stored courses: {}", e)))?;
        let electives: Electives = match &self.electives {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| CatalogError::InvalidCatalog(format!("stored electives: {}", e)))?,
            None => Electives::new(),
        };
        Catalog::from_parts(courses, electives)
    }
}

/// Snapshot `catalog` and write it to `store`
pub fn persist<S: KeyValueStore + ?Sized>(store: &S, catalog: &Catalog) -> Result<()> {
    Snapshot::from_catalog(catalog)?
        .write(store)
        .context("Failed to persist catalog")
}
