//! Domain types shared by the catalog and the study generator.

pub mod profile;

// Re-export commonly used types
pub use profile::{
    default_goals, Goal, LearnerProfile, Level, OutputLanguage, OutputStyle, SubtitleFormat,
};
