//! Catalog of source talks and their processing status.
//!
//! Simple JSON-backed list with an auto-incrementing id counter. Every
//! mutating operation writes the whole catalog back to disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::material::{MaterialId, MaterialRecord};

/// Listing text returned for an empty catalog
pub const EMPTY_LISTING: &str = "No materials in library.";

/// Errors that can occur when loading or saving the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed catalog file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog file {}: material id {id} {reason}", .path.display())]
    InvalidId {
        path: PathBuf,
        id: MaterialId,
        reason: &'static str,
    },

    #[error("No material ids left after {last} in {}", .path.display())]
    IdSpaceExhausted { path: PathBuf, last: MaterialId },

    #[error("Failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write catalog {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk shapes accepted when loading
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCatalog {
    /// Bare array of records (earliest format)
    Legacy(Vec<MaterialRecord>),

    /// Object with the id counter alongside the records
    Current {
        materials: Vec<MaterialRecord>,
        #[serde(default)]
        next_id: Option<MaterialId>,
    },
}

/// Shape written on save
#[derive(Debug, Serialize)]
struct StoredCatalogRef<'a> {
    materials: &'a [MaterialRecord],
    next_id: MaterialId,
}

/// Persisted state: records in insertion order plus the id counter
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub materials: Vec<MaterialRecord>,
    pub next_id: MaterialId,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            materials: Vec::new(),
            next_id: MaterialId::new(1),
        }
    }
}

impl CatalogState {
    fn from_stored(stored: StoredCatalog, path: &Path) -> Result<Self, CatalogError> {
        let (materials, stored_next) = match stored {
            StoredCatalog::Legacy(materials) => (materials, None),
            StoredCatalog::Current { materials, next_id } => (materials, next_id),
        };

        let mut seen = HashSet::with_capacity(materials.len());
        for material in &materials {
            let reason = if material.id.get() == 0 {
                "is not positive"
            } else if !seen.insert(material.id) {
                "appears more than once"
            } else {
                continue;
            };
            return Err(CatalogError::InvalidId {
                path: path.to_path_buf(),
                id: material.id,
                reason,
            });
        }

        let derived = derive_next_id(&materials, path)?;
        let next_id = match stored_next {
            Some(next) if next >= derived => next,
            Some(next) => {
                warn!(
                    stored = %next,
                    derived = %derived,
                    "Stored next_id does not exceed existing ids, using derived value"
                );
                derived
            }
            None => derived,
        };

        Ok(Self { materials, next_id })
    }
}

/// `max(id) + 1`, or 1 for an empty list
fn derive_next_id(materials: &[MaterialRecord], path: &Path) -> Result<MaterialId, CatalogError> {
    match materials.iter().map(|m| m.id).max() {
        Some(last) => last.next().ok_or_else(|| CatalogError::IdSpaceExhausted {
            path: path.to_path_buf(),
            last,
        }),
        None => Ok(MaterialId::new(1)),
    }
}

/// Handle on a catalog file
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    state: CatalogState,
}

impl Catalog {
    /// Open the catalog stored at `path`.
    ///
    /// A missing file yields an empty catalog; nothing is written until the
    /// first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.clone(),
                source,
            })?;

            let stored: StoredCatalog =
                serde_json::from_str(&content).map_err(|source| CatalogError::Malformed {
                    path: path.clone(),
                    source,
                })?;

            CatalogState::from_stored(stored, &path)?
        } else {
            debug!(path = %path.display(), "Catalog file absent, starting empty");
            CatalogState::default()
        };

        debug!(
            path = %path.display(),
            materials = state.materials.len(),
            next_id = %state.next_id,
            "Catalog loaded"
        );

        Ok(Self { path, state })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory state
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Id the next added record will receive
    pub fn next_id(&self) -> MaterialId {
        self.state.next_id
    }

    /// Write the full catalog to the backing file
    pub fn save(&self) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&StoredCatalogRef {
            materials: &self.state.materials,
            next_id: self.state.next_id,
        })?;

        std::fs::write(&self.path, content).map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Add a new unprocessed record and persist
    pub fn add(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<MaterialRecord, CatalogError> {
        let id = self.state.next_id;
        let next_id = id.next().ok_or_else(|| CatalogError::IdSpaceExhausted {
            path: self.path.clone(),
            last: id,
        })?;
        let record = MaterialRecord::new(id, url, title, description);

        self.commit(|state| {
            state.materials.push(record.clone());
            state.next_id = next_id;
        })?;

        info!(id = %record.id, title = %record.title, "Material added");
        Ok(record)
    }

    /// Get a record by id
    pub fn get(&self, id: MaterialId) -> Option<&MaterialRecord> {
        self.state.materials.iter().find(|m| m.id == id)
    }

    /// All records in insertion order
    pub fn list(&self) -> &[MaterialRecord] {
        &self.state.materials
    }

    /// Records still waiting for a study package
    pub fn list_unprocessed(&self) -> Vec<&MaterialRecord> {
        self.state.materials.iter().filter(|m| !m.processed).collect()
    }

    /// Flag a record as processed and store its file references.
    ///
    /// Returns `false` without touching the catalog when the id is absent.
    pub fn mark_processed(
        &mut self,
        id: MaterialId,
        transcript_file: impl Into<String>,
        package_file: impl Into<String>,
    ) -> Result<bool, CatalogError> {
        let Some(pos) = self.state.materials.iter().position(|m| m.id == id) else {
            debug!(%id, "mark_processed: material not found");
            return Ok(false);
        };

        if self.state.materials[pos].processed {
            warn!(%id, "Material already processed, overwriting file references");
        }
        self.commit(|state| state.materials[pos].mark_processed(transcript_file, package_file))?;

        info!(%id, "Material marked processed");
        Ok(true)
    }

    /// Remove a record. The id is never handed out again.
    pub fn remove(&mut self, id: MaterialId) -> Result<bool, CatalogError> {
        let Some(pos) = self.state.materials.iter().position(|m| m.id == id) else {
            debug!(%id, "remove: material not found");
            return Ok(false);
        };

        self.commit(|state| {
            state.materials.remove(pos);
        })?;

        info!(%id, "Material removed");
        Ok(true)
    }

    /// Apply `change` and persist it. On a failed write the in-memory state
    /// is restored so it keeps matching the file.
    fn commit(&mut self, change: impl FnOnce(&mut CatalogState)) -> Result<(), CatalogError> {
        let previous = self.state.clone();
        change(&mut self.state);

        if let Err(err) = self.save() {
            self.state = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Search title and description (case-insensitive substring match)
    pub fn search(&self, query: &str) -> Vec<&MaterialRecord> {
        let query_lower = query.to_lowercase();

        self.state
            .materials
            .iter()
            .filter(|m| m.matches(&query_lower))
            .collect()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.state.materials.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.state.materials.is_empty()
    }

    /// Human-readable listing of every record
    pub fn format_listing(&self) -> String {
        format_materials(self.state.materials.iter())
    }
}

/// Render records as a readable block of text
pub fn format_materials<'a>(materials: impl IntoIterator<Item = &'a MaterialRecord>) -> String {
    let mut lines: Vec<String> = Vec::new();

    for material in materials {
        if lines.is_empty() {
            lines.push("Material Library:".to_string());
            lines.push("=".repeat(60));
        }

        let status = if material.processed {
            "✓ Processed"
        } else {
            "○ Pending"
        };

        lines.push(String::new());
        lines.push(format!("[{}] {}", material.id, status));
        lines.push(format!("Title: {}", material.title));
        lines.push(format!("URL: {}", material.url));
        if !material.description.is_empty() {
            lines.push(format!("Description: {}", material.description));
        }
        lines.push(format!("Added: {}", material.date_added_day()));
        if material.processed {
            if let Some(package) = &material.learning_package_file {
                lines.push(format!("Learning Package: {}", package));
            }
        }
    }

    if lines.is_empty() {
        EMPTY_LISTING.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_catalog() -> (TempDir, Catalog) {
        let temp = TempDir::new().unwrap();
        let catalog = Catalog::open(temp.path().join("catalog.json")).unwrap();
        (temp, catalog)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (temp, catalog) = temp_catalog();

        assert!(catalog.is_empty());
        assert_eq!(catalog.next_id(), MaterialId::new(1));
        // Opening must not create the file
        assert!(!temp.path().join("catalog.json").exists());
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_temp, mut catalog) = temp_catalog();

        let a = catalog.add("https://a", "A", "").unwrap();
        let b = catalog.add("https://b", "B", "").unwrap();
        let c = catalog.add("https://c", "C", "").unwrap();

        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
        assert_eq!(c.id.get(), 3);
        assert_eq!(catalog.next_id().get(), 4);
    }

    #[test]
    fn test_add_persists_immediately() {
        let (temp, mut catalog) = temp_catalog();
        catalog.add("https://a", "A", "").unwrap();

        let reopened = Catalog::open(temp.path().join("catalog.json")).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.next_id().get(), 2);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (_temp, mut catalog) = temp_catalog();
        catalog.add("https://a", "A", "").unwrap();

        assert!(catalog.get(MaterialId::new(1)).is_some());
        assert!(catalog.get(MaterialId::new(2)).is_none());
    }

    #[test]
    fn test_list_unprocessed_preserves_order() {
        let (_temp, mut catalog) = temp_catalog();
        catalog.add("https://a", "A", "").unwrap();
        catalog.add("https://b", "B", "").unwrap();
        catalog.add("https://c", "C", "").unwrap();
        catalog.mark_processed(MaterialId::new(2), "b.txt", "b.md").unwrap();

        let ids: Vec<u64> = catalog.list_unprocessed().iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_does_not_reuse_ids() {
        let (_temp, mut catalog) = temp_catalog();
        catalog.add("https://a", "A", "").unwrap();
        catalog.add("https://b", "B", "").unwrap();

        assert!(catalog.remove(MaterialId::new(2)).unwrap());
        let next = catalog.add("https://c", "C", "").unwrap();

        assert_eq!(next.id.get(), 3);
    }

    #[test]
    fn test_current_format_without_next_id_derives_it() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"materials": [{"id": 4, "url": "u", "date_added": "2024-01-01T00:00:00"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::open(&path).unwrap();
        assert_eq!(catalog.next_id().get(), 5);
    }

    #[test]
    fn test_stored_next_id_respected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"materials": [{"id": 1, "url": "u", "date_added": "2024-01-01T00:00:00"}], "next_id": 9}"#,
        )
        .unwrap();

        let mut catalog = Catalog::open(&path).unwrap();
        assert_eq!(catalog.add("v", "", "").unwrap().id.get(), 9);
    }

    #[test]
    fn test_stale_next_id_is_raised() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"materials": [{"id": 7, "url": "u", "date_added": "2024-01-01T00:00:00"}], "next_id": 2}"#,
        )
        .unwrap();

        let catalog = Catalog::open(&path).unwrap();
        assert_eq!(catalog.next_id().get(), 8);
    }

    #[test]
    fn test_malformed_shapes_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        for content in ["not json", "42", r#""text""#, r#"{"next_id": 3}"#, r#"{"materials": 5}"#] {
            std::fs::write(&path, content).unwrap();
            let result = Catalog::open(&path);
            assert!(
                matches!(result, Err(CatalogError::Malformed { .. })),
                "expected Malformed for {:?}",
                content
            );
        }
    }

    #[test]
    fn test_format_listing_empty() {
        let (_temp, catalog) = temp_catalog();
        assert_eq!(catalog.format_listing(), EMPTY_LISTING);
    }

    #[test]
    fn test_format_listing_contents() {
        let (_temp, mut catalog) = temp_catalog();
        let first = catalog.add("https://x", "T1", "D1").unwrap();
        catalog.add("https://y", "", "").unwrap();
        catalog.mark_processed(first.id, "t.txt", "p.md").unwrap();

        let listing = catalog.format_listing();
        assert!(listing.starts_with("Material Library:"));
        assert!(listing.contains("[1] ✓ Processed"));
        assert!(listing.contains("[2] ○ Pending"));
        assert!(listing.contains("Title: T1"));
        assert!(listing.contains("URL: https://y"));
        assert!(listing.contains("Description: D1"));
        assert!(listing.contains(&format!("Added: {}", first.date_added_day())));
        assert!(listing.contains("Learning Package: p.md"));
        // Empty descriptions are omitted
        assert_eq!(listing.matches("Description:").count(), 1);
    }

    #[test]
    fn test_format_listing_layout() {
        let (_temp, mut catalog) = temp_catalog();
        let record = catalog.add("https://x", "T1", "").unwrap();

        let expected = format!(
            "Material Library:\n{}\n\n[1] ○ Pending\nTitle: T1\nURL: https://x\nAdded: {}",
            "=".repeat(60),
            record.date_added_day()
        );
        assert_eq!(catalog.format_listing(), expected);
    }
}
