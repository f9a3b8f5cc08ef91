//! Learner profile driving study package generation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// CEFR proficiency band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum Level {
    A1,
    A2,
    B1,
    #[default]
    B2,
    C1,
    C2,
}

impl Level {
    /// Long form including the matching exam bands
    pub fn description(self) -> &'static str {
        match self {
            Level::A1 => "A1 (Beginner)",
            Level::A2 => "A2 (Elementary)",
            Level::B1 => "B1 (Intermediate / CET-4)",
            Level::B2 => "B2 (Upper-Intermediate / CET-6 / IELTS 6-6.5 / TOEFL 70-90)",
            Level::C1 => "C1 (Advanced / IELTS 7-8 / TOEFL 90-110)",
            Level::C2 => "C2 (Expert / TOEFL 110+)",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        };
        write!(f, "{}", s)
    }
}

/// Skill the learner wants to train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Listening,
    Speaking,
    Vocabulary,
    Grammar,
    Writing,
    Presentation,
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::Listening => write!(f, "listening"),
            Goal::Speaking => write!(f, "speaking"),
            Goal::Vocabulary => write!(f, "vocabulary"),
            Goal::Grammar => write!(f, "grammar"),
            Goal::Writing => write!(f, "writing"),
            Goal::Presentation => write!(f, "presentation"),
        }
    }
}

/// Goals used when none are given
pub fn default_goals() -> Vec<Goal> {
    vec![Goal::Listening, Goal::Speaking, Goal::Vocabulary]
}

/// Language of explanations in the generated document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputLanguage {
    /// English with Chinese glosses
    #[default]
    Bilingual,

    /// English only
    #[value(name = "english_only", alias = "english-only")]
    EnglishOnly,
}

impl std::fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputLanguage::Bilingual => write!(f, "bilingual"),
            OutputLanguage::EnglishOnly => write!(f, "english_only"),
        }
    }
}

/// Shape of the input transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleFormat {
    /// Detect from the transcript contents
    #[default]
    Auto,

    /// SubRip subtitles with numbered cues and timestamps
    Srt,

    /// Running text
    #[value(name = "plain_text", alias = "plain-text")]
    PlainText,
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleFormat::Auto => write!(f, "auto"),
            SubtitleFormat::Srt => write!(f, "srt"),
            SubtitleFormat::PlainText => write!(f, "plain_text"),
        }
    }
}

/// How much of each section to emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    #[default]
    Complete,
    Simplified,
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Complete => write!(f, "complete"),
            OutputStyle::Simplified => write!(f, "simplified"),
        }
    }
}

/// Everything the renderer needs to know about the learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub level: Level,
    pub vocabulary_size: u32,
    pub goals: Vec<Goal>,
    pub output_language: OutputLanguage,
    pub subtitle_format: SubtitleFormat,
    pub output_style: OutputStyle,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self {
            level: Level::default(),
            vocabulary_size: 8000,
            goals: default_goals(),
            output_language: OutputLanguage::default(),
            subtitle_format: SubtitleFormat::default(),
            output_style: OutputStyle::default(),
        }
    }
}

impl LearnerProfile {
    /// Whether Chinese glosses should be included
    pub fn is_bilingual(&self) -> bool {
        self.output_language == OutputLanguage::Bilingual
    }

    /// Whether the reduced layout was requested
    pub fn is_simplified(&self) -> bool {
        self.output_style == OutputStyle::Simplified
    }

    /// Goals as a comma-separated list
    pub fn goals_display(&self) -> String {
        self.goals
            .iter()
            .map(Goal::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
