//! Templated study content.
//!
//! Vocabulary, phrases and exercises come from a fixed sample set; only the
//! shadowing script and the requested counts depend on the transcript.

use crate::domain::LearnerProfile;

/// Core vocabulary entry
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyItem {
    pub word: &'static str,
    pub ipa: &'static str,
    pub part_of_speech: &'static str,
    pub chinese_meaning: &'static str,
    pub english_gloss: &'static str,
    pub collocations: &'static [&'static str],
    pub original_sentence: &'static str,
    pub timestamp: &'static str,
    pub model_sentence: &'static str,
}

/// High-frequency phrase with graded transfer examples
#[derive(Debug, Clone, PartialEq)]
pub struct PhrasePattern {
    pub expression: &'static str,
    pub usage_note: &'static str,
    pub variants: &'static [&'static str],
    pub original_excerpt: &'static str,
    /// (label, example) pairs: Simple, Natural, Stretch
    pub transfer_examples: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillBlank {
    pub sentence: &'static str,
    pub answer: &'static str,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailQuestion {
    pub statement: &'static str,
    pub answer: &'static str,
    pub location: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListeningExercise {
    pub warmup_questions: Vec<&'static str>,
    pub fill_blanks: Vec<FillBlank>,
    pub detail_questions: Vec<DetailQuestion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakingCard {
    pub prompt: &'static str,
    pub criteria: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritingTask {
    pub prompt: &'static str,
    pub starter: &'static str,
    pub structure: &'static str,
    pub key_phrases: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakingWritingTask {
    pub summary_outline: Vec<&'static str>,
    pub speaking_cards: Vec<SpeakingCard>,
    pub writing_task: WritingTask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub title: &'static str,
    pub context: &'static str,
    pub key_expressions: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialogue {
    pub title: &'static str,
    pub setting: &'static str,
    pub script: &'static str,
    pub roles: &'static str,
    pub replaceable: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDialogue {
    pub scenarios: Vec<Scenario>,
    pub dialogues: Vec<Dialogue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowingScript {
    pub segmented_script: String,
    pub prosody_tips: Vec<&'static str>,
    /// (speed, description) pairs in practice order
    pub practice_speeds: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnkiCard {
    pub front: String,
    pub back: String,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudyDay {
    pub day: u8,
    pub duration: &'static str,
    pub task: &'static str,
    pub goal: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewKit {
    pub anki_cards: Vec<AnkiCard>,
    pub seven_day_plan: Vec<StudyDay>,
}

/// Vocabulary items that get Anki cards
pub const MAX_REVIEW_WORDS: usize = 12;

/// Segments used to build the shadowing script
const SHADOWING_SEGMENTS: usize = 3;

/// Words per pause group in the shadowing script
const SHADOWING_CHUNK_WORDS: usize = 3;

const SAMPLE_VOCABULARY: &[VocabularyItem] = &[
    VocabularyItem {
        word: "innovation",
        ipa: "/ˌɪnəˈveɪʃn/",
        part_of_speech: "n.",
        chinese_meaning: "创新",
        english_gloss: "the introduction of new ideas or methods",
        collocations: &["technological innovation", "drive innovation"],
        original_sentence: "Innovation is key to progress.",
        timestamp: "00:01:23",
        model_sentence: "Innovation in education can transform learning experiences.",
    },
    VocabularyItem {
        word: "perspective",
        ipa: "/pərˈspektɪv/",
        part_of_speech: "n.",
        chinese_meaning: "观点；视角",
        english_gloss: "a particular way of viewing things",
        collocations: &["from my perspective", "gain perspective"],
        original_sentence: "We need a new perspective.",
        timestamp: "00:02:15",
        model_sentence: "Understanding different perspectives helps us make better decisions.",
    },
    VocabularyItem {
        word: "sustainable",
        ipa: "/səˈsteɪnəbl/",
        part_of_speech: "adj.",
        chinese_meaning: "可持续的",
        english_gloss: "able to be maintained at a certain level",
        collocations: &["sustainable development", "sustainable practices"],
        original_sentence: "We must find sustainable solutions.",
        timestamp: "00:03:45",
        model_sentence: "Sustainable practices are essential for our planet's future.",
    },
];

const SAMPLE_PHRASES: &[PhrasePattern] = &[
    PhrasePattern {
        expression: "in other words",
        usage_note: "Used to rephrase or clarify what was just said",
        variants: &["to put it another way", "that is to say"],
        original_excerpt: "In other words, we need to act now.",
        transfer_examples: &[
            ("Simple", "This means we must do something soon."),
            ("Natural", "In other words, immediate action is required."),
            (
                "Stretch",
                "Put another way, the exigency of the situation demands swift intervention.",
            ),
        ],
    },
    PhrasePattern {
        expression: "on the other hand",
        usage_note: "Used to present a contrasting point",
        variants: &["conversely", "by contrast"],
        original_excerpt: "On the other hand, we could wait.",
        transfer_examples: &[
            ("Simple", "But we could also wait and see."),
            ("Natural", "On the other hand, we might benefit from patience."),
            (
                "Stretch",
                "Conversely, a more measured approach might yield superior outcomes.",
            ),
        ],
    },
];

const SAMPLE_SHADOWING_SCRIPT: &str = "Innovation / is the key / to solving / **global** challenges. //
We **must** / embrace **change** / and think / **creatively**. //
**Sustainable** development / requires / **collective** action.";

/// Number of vocabulary items to request for a talk of this length
pub fn vocabulary_target(duration_minutes: f64) -> usize {
    if duration_minutes > 10.0 {
        20
    } else {
        15
    }
}

/// Core vocabulary, at most `count` items
pub fn extract_vocabulary(_text: &str, count: usize) -> Vec<VocabularyItem> {
    SAMPLE_VOCABULARY.iter().take(count).cloned().collect()
}

/// High-frequency phrases, at most `count` items
pub fn extract_phrases(_text: &str, count: usize) -> Vec<PhrasePattern> {
    SAMPLE_PHRASES.iter().take(count).cloned().collect()
}

pub fn listening_exercises() -> ListeningExercise {
    ListeningExercise {
        warmup_questions: vec![
            "What is the main topic of this TED talk?",
            "Who is the intended audience?",
            "What are three key words you expect to hear?",
        ],
        fill_blanks: vec![
            FillBlank {
                sentence: "Innovation is ____ to progress in any field.",
                answer: "essential",
                explanation: "The speaker emphasizes the importance of innovation.",
            },
            FillBlank {
                sentence: "We need to adopt a more ____ approach to development.",
                answer: "sustainable",
                explanation: "Sustainability is a central theme in the talk.",
            },
        ],
        detail_questions: vec![
            DetailQuestion {
                statement: "The speaker mentions that innovation drives economic growth.",
                answer: "True",
                location: "00:01:30 - The speaker explicitly states this.",
            },
            DetailQuestion {
                statement: "The talk focuses only on technological innovation.",
                answer: "False",
                location: "00:02:45 - Multiple types of innovation are discussed.",
            },
        ],
    }
}

pub fn speaking_writing_tasks() -> SpeakingWritingTask {
    SpeakingWritingTask {
        summary_outline: vec![
            "• Introduction: Main topic and speaker's thesis (use: 'The speaker argues that...')",
            "• Key Point 1: First major argument (use: 'First and foremost...')",
            "• Key Point 2: Supporting evidence (use: 'Furthermore...')",
            "• Conclusion: Implications and takeaways (use: 'In conclusion...')",
        ],
        speaking_cards: vec![
            SpeakingCard {
                prompt: "Describe a time when innovation made a difference in your life.",
                criteria: "Content: Relevance and detail | Fluency: Natural pace | Accuracy: Grammar | Pronunciation: Clear articulation",
            },
            SpeakingCard {
                prompt: "What are the biggest challenges to sustainable development?",
                criteria: "Content: Depth of analysis | Fluency: Smooth delivery | Accuracy: Vocabulary usage | Pronunciation: Stress patterns",
            },
        ],
        writing_task: WritingTask {
            prompt: "Write a paragraph about how technology can promote sustainability.",
            starter: "In recent years, technology has emerged as a powerful tool for...",
            structure: "Topic sentence → Supporting detail 1 → Supporting detail 2 → Concluding thought",
            key_phrases: vec!["has emerged as", "plays a crucial role in", "for instance", "as a result"],
        },
    }
}

pub fn scenarios_dialogues() -> ScenarioDialogue {
    ScenarioDialogue {
        scenarios: vec![
            Scenario {
                title: "Professional Presentation",
                context: "You're presenting innovative ideas to your team",
                key_expressions: "Let me walk you through..., As you can see..., What this means is...",
            },
            Scenario {
                title: "Academic Discussion",
                context: "Discussing sustainability in a seminar",
                key_expressions: "From my perspective..., Building on that point..., I'd like to challenge...",
            },
        ],
        dialogues: vec![Dialogue {
            title: "Team Innovation Meeting",
            setting: "Office conference room",
            script: "A: Good morning everyone. Today, I'd like to discuss our innovation strategy.
B: That sounds great. What's your proposal?
A: Well, I believe we need to focus on sustainable solutions.
B: Interesting. Can you elaborate on that?
A: Certainly. By sustainable, I mean solutions that benefit us long-term.
B: I see. What would be the first step?
A: First and foremost, we should assess our current practices.
B: That makes sense. When should we start?",
            roles: "A: Team Leader, B: Team Member",
            replaceable: "I believe → In my opinion | Certainly → Absolutely | That makes sense → I agree",
        }],
    }
}

/// Shadowing script built from the first meaning segments of the talk.
///
/// Each segment becomes one line of short pause groups ending in `//`.
/// Falls back to the sample script when the transcript has no segments.
pub fn shadowing_script(segments: &[String]) -> ShadowingScript {
    let lines: Vec<String> = segments
        .iter()
        .take(SHADOWING_SEGMENTS)
        .map(|segment| {
            let words: Vec<&str> = segment.split_whitespace().collect();
            let groups: Vec<String> = words
                .chunks(SHADOWING_CHUNK_WORDS)
                .map(|chunk| chunk.join(" "))
                .collect();
            format!("{} //", groups.join(" / "))
        })
        .collect();

    let segmented_script = if lines.is_empty() {
        SAMPLE_SHADOWING_SCRIPT.to_string()
    } else {
        lines.join("\n")
    };

    ShadowingScript {
        segmented_script,
        prosody_tips: vec![
            "1. Stress content words (nouns, main verbs, adjectives) more than function words",
            "2. Use rising intonation for questions and lists, falling for statements",
            "3. Group words into meaningful phrases with slight pauses between groups",
            "4. Link consonant-ending words to vowel-starting words naturally",
            "5. Emphasize contrast words and key concepts for clarity",
        ],
        practice_speeds: vec![
            ("Slow", "0.75x - Focus on pronunciation and word stress"),
            ("Natural", "1.0x - Match natural speech rhythm"),
            ("Fast", "1.25x - Challenge your processing speed"),
        ],
    }
}

/// Two Anki cards per vocabulary item (meaning and cloze) plus a 7-day plan
pub fn review_kit(vocabulary: &[VocabularyItem], profile: &LearnerProfile) -> ReviewKit {
    let level = profile.level.description();
    let mut anki_cards = Vec::new();

    for item in vocabulary.iter().take(MAX_REVIEW_WORDS) {
        let back = if profile.is_bilingual() {
            format!("{} | {}", item.chinese_meaning, item.english_gloss)
        } else {
            item.english_gloss.to_string()
        };

        anki_cards.push(AnkiCard {
            front: item.word.to_string(),
            back,
            tags: format!("TED,{},{}", item.part_of_speech, level),
        });
        anki_cards.push(AnkiCard {
            front: format!(
                "Fill in: {}",
                item.model_sentence.replace(item.word, "____")
            ),
            back: format!("{} | {}", item.word, item.model_sentence),
            tags: format!("TED,context,{}", level),
        });
    }

    let seven_day_plan = [
        ("Review all vocabulary cards (12 words)", "Recognition"),
        ("Practice fill-in-the-blank exercises", "Context usage"),
        ("Listen and shadow key segments", "Pronunciation"),
        ("Complete speaking card prompts", "Active production"),
        ("Practice dialogue role-play", "Conversational fluency"),
        ("Write paragraph using target vocabulary", "Written production"),
        ("Comprehensive review and self-test", "Consolidation"),
    ]
    .into_iter()
    .zip(1u8..)
    .map(|((task, goal), day)| StudyDay {
        day,
        duration: "15 min",
        task,
        goal,
    })
    .collect();

    ReviewKit {
        anki_cards,
        seven_day_plan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutputLanguage;

    #[test]
    fn test_vocabulary_target() {
        assert_eq!(vocabulary_target(3.0), 15);
        assert_eq!(vocabulary_target(10.0), 15);
        assert_eq!(vocabulary_target(10.5), 20);
    }

    #[test]
    fn test_extract_respects_count() {
        assert_eq!(extract_vocabulary("anything", 15).len(), SAMPLE_VOCABULARY.len());
        assert_eq!(extract_vocabulary("anything", 2).len(), 2);
        assert!(extract_phrases("anything", 0).is_empty());
    }

    #[test]
    fn test_shadowing_from_segments() {
        let segments = vec![
            "Innovation is the key to solving global challenges".to_string(),
            "We must act".to_string(),
        ];
        let script = shadowing_script(&segments);

        assert_eq!(
            script.segmented_script,
            "Innovation is the / key to solving / global challenges //\nWe must act //"
        );
        assert_eq!(script.prosody_tips.len(), 5);
        assert_eq!(script.practice_speeds[0].0, "Slow");
    }

    #[test]
    fn test_shadowing_fallback() {
        let script = shadowing_script(&[]);
        assert_eq!(script.segmented_script, SAMPLE_SHADOWING_SCRIPT);
    }

    #[test]
    fn test_review_kit_cards() {
        let profile = LearnerProfile::default();
        let vocab = extract_vocabulary("", 15);
        let kit = review_kit(&vocab, &profile);

        assert_eq!(kit.anki_cards.len(), vocab.len() * 2);
        assert_eq!(kit.anki_cards[0].front, "innovation");
        assert_eq!(kit.anki_cards[0].back, "创新 | the introduction of new ideas or methods");
        assert!(kit.anki_cards[1].front.starts_with("Fill in: "));
        assert!(kit.anki_cards[1].tags.starts_with("TED,context,B2"));
        assert_eq!(kit.seven_day_plan.len(), 7);
        assert_eq!(kit.seven_day_plan[6].day, 7);
    }

    #[test]
    fn test_review_kit_english_only() {
        let profile = LearnerProfile {
            output_language: OutputLanguage::EnglishOnly,
            ..Default::default()
        };
        let kit = review_kit(&extract_vocabulary("", 1), &profile);

        assert_eq!(kit.anki_cards[0].back, "the introduction of new ideas or methods");
    }
}
