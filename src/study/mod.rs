//! Study package generation from TED transcripts.
//!
//! - `transcript`: format detection, cleanup, segmentation, difficulty
//! - `materials`: templated vocabulary, exercises and review content
//! - `render`: Markdown document with ten fixed sections

pub mod materials;
pub mod render;
pub mod transcript;

pub use render::{DocumentRenderer, StudyDocument};
pub use transcript::{Difficulty, Strategy, TranscriptAnalysis};
