//! Catalog of TED talks queued for, or already turned into, study packages.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.ted-study/
//! └── catalog.json     # {"materials": [...], "next_id": N}
//! ```
//!
//! Older catalogs stored a bare array of records; those are still read and
//! are rewritten in the current shape on the next mutation.

pub mod catalog;
pub mod material;

pub use catalog::{format_materials, Catalog, CatalogError, CatalogState, EMPTY_LISTING};
pub use material::{MaterialId, MaterialRecord};
