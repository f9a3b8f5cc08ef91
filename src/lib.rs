//! ted-study - English study packages from TED transcripts
//!
//! Turns a plain-text or SRT transcript into a ten-section Markdown study
//! document and keeps a small JSON catalog of talks and their processing
//! status.
//!
//! # Modules
//!
//! - `library`: Catalog of talks (MaterialRecord, Catalog)
//! - `study`: Transcript analysis and document rendering
//! - `domain`: Learner profile types
//! - `config`: Path and profile-default resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Track a talk
//! ted-study library add https://www.ted.com/talks/... --title "Grit"
//!
//! # Generate a package and mark the talk processed
//! ted-study generate -i grit.srt -o grit.md --level C1 --material 1
//!
//! # What is left to study
//! ted-study library pending
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod study;

// Re-export main types at crate root for convenience
pub use domain::LearnerProfile;
pub use library::{Catalog, CatalogError, MaterialId, MaterialRecord};
pub use study::{DocumentRenderer, StudyDocument};
