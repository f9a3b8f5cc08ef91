//! Study Document Integration Tests
//!
//! Tests for the section layout and profile-driven variations of the
//! rendered study package.

use chrono::{NaiveDate, NaiveDateTime};
use ted_study::domain::{Goal, LearnerProfile, Level, OutputStyle, SubtitleFormat};
use ted_study::study::transcript::Strategy;
use ted_study::DocumentRenderer;

const SRT_TRANSCRIPT: &str = "1
00:00:01,000 --> 00:00:04,200
Innovation is the key to solving global challenges.

2
00:00:04,500 --> 00:00:08,000
[Applause]
We must embrace change and think creatively about solutions.

3
00:00:08,500 --> 00:00:12,000
Sustainable development requires collective action.
";

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 14)
        .unwrap()
        .and_hms_opt(18, 5, 9)
        .unwrap()
}

#[test]
fn test_all_ten_sections_in_order() {
    let renderer = DocumentRenderer::new(LearnerProfile::default());
    let doc = renderer.render(SRT_TRANSCRIPT, generated_at());

    let sections = [
        "# 0. Parameter Echo",
        "# 1. Content Overview",
        "# 2. Core Vocabulary",
        "# 3. High-Frequency Phrases & Patterns",
        "# 4. Grammar & Expression Mini-Lessons",
        "# 5. Listening Training",
        "# 6. Speaking & Writing",
        "# 7. Extended Scenarios & Dialogues",
        "# 8. Shadowing & Prosody",
        "# 9. Review Kit",
    ];

    let mut last = 0;
    for section in sections {
        let pos = doc
            .markdown
            .find(section)
            .unwrap_or_else(|| panic!("missing section {}", section));
        assert!(pos >= last, "{} out of order", section);
        last = pos;
    }
}

#[test]
fn test_parameter_echo_reflects_profile() {
    let profile = LearnerProfile {
        level: Level::C1,
        vocabulary_size: 12000,
        goals: vec![Goal::Grammar, Goal::Presentation],
        ..Default::default()
    };
    let doc = DocumentRenderer::new(profile).render(SRT_TRANSCRIPT, generated_at());

    assert!(doc.markdown.contains("C1 (Advanced / IELTS 7-8 / TOEFL 90-110)"));
    assert!(doc.markdown.contains("- Vocabulary (词汇量): 12000"));
    assert!(doc.markdown.contains("grammar, presentation"));
    assert!(doc.markdown.contains("Generated: 2025-02-14 18:05:09"));
}

#[test]
fn test_srt_is_detected_and_cleaned() {
    let doc = DocumentRenderer::new(LearnerProfile::default()).render(SRT_TRANSCRIPT, generated_at());

    assert!(doc.markdown.contains("Input Format (输入格式): srt"));
    // Timing lines and noise markers never reach the shadowing script
    assert!(!doc.markdown.contains("-->"));
    assert!(!doc.markdown.contains("[Applause]"));
    assert!(doc
        .markdown
        .contains("Innovation is the / key to solving / global challenges //"));
}

#[test]
fn test_explicit_format_is_kept() {
    let profile = LearnerProfile {
        subtitle_format: SubtitleFormat::PlainText,
        ..Default::default()
    };
    let doc = DocumentRenderer::new(profile).render(SRT_TRANSCRIPT, generated_at());

    assert!(doc.markdown.contains("Input Format (输入格式): plain_text"));
}

#[test]
fn test_statistics_returned_with_document() {
    let doc = DocumentRenderer::new(LearnerProfile::default()).render(SRT_TRANSCRIPT, generated_at());

    // 22 words at 150 wpm
    assert!((doc.duration_minutes - 22.0 / 150.0).abs() < 1e-9);
    assert!(doc.difficulty.score <= 100);
    assert_eq!(doc.difficulty.strategy, Strategy::for_score(doc.difficulty.score));
    assert!(doc
        .markdown
        .contains(&format!("{}/100", doc.difficulty.score)));
}

#[test]
fn test_empty_transcript_still_renders() {
    let doc = DocumentRenderer::new(LearnerProfile::default()).render("", generated_at());

    assert_eq!(doc.difficulty.score, 0);
    assert_eq!(doc.duration_minutes, 0.0);
    assert!(doc.markdown.contains("# 9. Review Kit"));
    // Falls back to the sample shadowing script
    assert!(doc.markdown.contains("**Sustainable** development"));
}

#[test]
fn test_simplified_is_shorter() {
    let complete = DocumentRenderer::new(LearnerProfile::default()).render(SRT_TRANSCRIPT, generated_at());
    let simplified = DocumentRenderer::new(LearnerProfile {
        output_style: OutputStyle::Simplified,
        ..Default::default()
    })
    .render(SRT_TRANSCRIPT, generated_at());

    let anki_rows = |md: &str| md.lines().filter(|l| l.contains("| TED,")).count();
    assert_eq!(anki_rows(&complete.markdown), 6);
    assert_eq!(anki_rows(&simplified.markdown), 6);
    assert!(simplified.markdown.len() < complete.markdown.len());
}
