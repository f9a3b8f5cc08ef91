//! Transcript cleanup and lightweight text statistics.
//!
//! Nothing here does real language analysis: cleanup is a handful of regex
//! substitutions and difficulty is a linear heuristic over word statistics.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::SubtitleFormat;

/// Assumed speaking rate for duration estimates
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// Sentences longer than this are split further when segmenting
pub const MAX_SEGMENT_WORDS: usize = 18;

fn srt_timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d{2}:\d{2}:\d{2},\d{3}\s*-->\s*\d{2}:\d{2}:\d{2},\d{3}")
            .expect("valid timestamp regex")
    })
}

fn cue_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\d+[ \t]*$").expect("valid cue number regex"))
}

fn noise_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[.*?\]").expect("valid noise marker regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid blank line regex"))
}

fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence regex"))
}

fn clause_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",|\sand\s|\sbut\s|\sor\s").expect("valid clause regex"))
}

/// Resolve `Auto` by looking for SRT cue arrows and early digits
pub fn detect_format(transcript: &str, requested: SubtitleFormat) -> SubtitleFormat {
    match requested {
        SubtitleFormat::Auto => {
            let head_has_digit = transcript.chars().take(100).any(|c| c.is_ascii_digit());
            if transcript.contains("-->") && head_has_digit {
                SubtitleFormat::Srt
            } else {
                SubtitleFormat::PlainText
            }
        }
        explicit => explicit,
    }
}

/// Strip SRT timing, cue numbers and `[noise]` markers, then collapse blank lines
pub fn clean(transcript: &str) -> String {
    let text = srt_timestamp_re().replace_all(transcript, "");
    let text = cue_number_re().replace_all(&text, "");
    let text = noise_marker_re().replace_all(&text, "");
    let text = blank_lines_re().replace_all(&text, "\n");
    text.trim().to_string()
}

/// Split text into short, meaning-sized chunks for shadowing practice
pub fn segment(text: &str) -> Vec<String> {
    let mut segments = Vec::new();

    for sentence in sentence_end_re().split(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if sentence.split_whitespace().count() <= MAX_SEGMENT_WORDS {
            segments.push(sentence.to_string());
            continue;
        }

        segments.extend(
            clause_break_re()
                .split(sentence)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string),
        );
    }

    segments
}

/// Estimated speaking time in minutes
pub fn estimate_duration(text: &str) -> f64 {
    text.split_whitespace().count() as f64 / WORDS_PER_MINUTE
}

/// Study strategy band derived from the difficulty score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Basic,
    Intermediate,
    Academic,
    Advanced,
}

impl Strategy {
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=29 => Strategy::Basic,
            30..=49 => Strategy::Intermediate,
            50..=69 => Strategy::Academic,
            _ => Strategy::Advanced,
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Strategy::Basic => "Focus on basic vocabulary and simple sentence structures",
            Strategy::Intermediate => "Build intermediate vocabulary with common phrases",
            Strategy::Academic => "Develop academic vocabulary and complex expressions",
            Strategy::Advanced => "Master advanced terminology and nuanced expressions",
        }
    }
}

/// Difficulty score (0-100) with the matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub score: u8,
    pub strategy: Strategy,
}

impl Difficulty {
    /// `min(100, diversity * 50 + avg_word_len * 5)` over lowercase words
    pub fn assess(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();

        let score = if words.is_empty() {
            0
        } else {
            let total = words.len() as f64;
            let unique = words.iter().collect::<std::collections::HashSet<_>>().len() as f64;
            let avg_len = words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / total;

            ((unique / total) * 50.0 + avg_len * 5.0).min(100.0) as u8
        };

        Self {
            score,
            strategy: Strategy::for_score(score),
        }
    }
}

/// Cleaned transcript plus the statistics the renderer echoes
#[derive(Debug, Clone)]
pub struct TranscriptAnalysis {
    pub format: SubtitleFormat,
    pub text: String,
    pub duration_minutes: f64,
    pub difficulty: Difficulty,
}

impl TranscriptAnalysis {
    pub fn analyze(transcript: &str, requested: SubtitleFormat) -> Self {
        let format = detect_format(transcript, requested);
        let text = clean(transcript);
        let duration_minutes = estimate_duration(&text);
        let difficulty = Difficulty::assess(&text);

        Self {
            format,
            text,
            duration_minutes,
            difficulty,
        }
    }

    /// Meaning segments of the cleaned text
    pub fn segments(&self) -> Vec<String> {
        segment(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRT: &str = "1\n00:00:01,000 --> 00:00:04,000\nInnovation is the key.\n\n2\n00:00:04,500 --> 00:00:07,000\n[Applause] We must act.\n";

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(SRT, SubtitleFormat::Auto), SubtitleFormat::Srt);
        assert_eq!(
            detect_format("Just talking here.", SubtitleFormat::Auto),
            SubtitleFormat::PlainText
        );
        // Arrow without any early digit is not treated as SRT
        assert_eq!(
            detect_format("a --> b", SubtitleFormat::Auto),
            SubtitleFormat::PlainText
        );
        assert_eq!(
            detect_format("Plain", SubtitleFormat::Srt),
            SubtitleFormat::Srt
        );
    }

    #[test]
    fn test_clean_srt() {
        let cleaned = clean(SRT);
        assert_eq!(cleaned, "Innovation is the key.\n We must act.");
    }

    #[test]
    fn test_clean_plain_text_untouched() {
        assert_eq!(clean("  Hello world.\n\n\nBye.  "), "Hello world.\nBye.");
    }

    #[test]
    fn test_segment_short_sentences() {
        let segments = segment("We must act. Why now? Because!");
        assert_eq!(segments, vec!["We must act", "Why now", "Because"]);
    }

    #[test]
    fn test_segment_splits_long_sentence() {
        let long = "Technology is changing quickly and we need to adapt our schools, \
                    our offices but also our homes or we will fall behind everyone else";
        let segments = segment(long);

        assert!(segments.len() > 1);
        assert_eq!(segments[0], "Technology is changing quickly");
        assert!(segments.iter().all(|s| s.split_whitespace().count() <= MAX_SEGMENT_WORDS));
    }

    #[test]
    fn test_estimate_duration() {
        let text = "word ".repeat(300);
        assert!((estimate_duration(&text) - 2.0).abs() < f64::EPSILON);
        assert_eq!(estimate_duration(""), 0.0);
    }

    #[test]
    fn test_difficulty_empty() {
        let difficulty = Difficulty::assess("");
        assert_eq!(difficulty.score, 0);
        assert_eq!(difficulty.strategy, Strategy::Basic);
    }

    #[test]
    fn test_difficulty_formula() {
        // 4 words, 2 unique, avg length 2 -> 0.5 * 50 + 2 * 5 = 35
        let difficulty = Difficulty::assess("ab AB cd cd");
        assert_eq!(difficulty.score, 35);
        assert_eq!(difficulty.strategy, Strategy::Intermediate);
    }

    #[test]
    fn test_difficulty_capped() {
        let difficulty = Difficulty::assess("internationalization incomprehensibilities");
        assert_eq!(difficulty.score, 100);
        assert_eq!(difficulty.strategy, Strategy::Advanced);
    }

    #[test]
    fn test_strategy_bands() {
        assert_eq!(Strategy::for_score(29), Strategy::Basic);
        assert_eq!(Strategy::for_score(30), Strategy::Intermediate);
        assert_eq!(Strategy::for_score(69), Strategy::Academic);
        assert_eq!(Strategy::for_score(70), Strategy::Advanced);
        assert_eq!(Strategy::for_score(100), Strategy::Advanced);
    }
}
