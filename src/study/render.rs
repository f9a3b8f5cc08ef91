//! Markdown rendering of the ten-section study document.

use chrono::NaiveDateTime;

use crate::domain::LearnerProfile;

use super::materials::{self, VocabularyItem};
use super::transcript::{Difficulty, TranscriptAnalysis};

/// Phrase patterns requested per document
const PHRASE_COUNT: usize = 10;

/// Anki rows shown in the preview table
const ANKI_PREVIEW_COMPLETE: usize = 12;
const ANKI_PREVIEW_SIMPLIFIED: usize = 6;

/// A rendered study package
#[derive(Debug, Clone)]
pub struct StudyDocument {
    pub markdown: String,
    pub duration_minutes: f64,
    pub difficulty: Difficulty,
}

/// Renders study documents for one learner profile
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    profile: LearnerProfile,
}

impl DocumentRenderer {
    pub fn new(profile: LearnerProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &LearnerProfile {
        &self.profile
    }

    /// Render `transcript` into a study document stamped with `generated_at`.
    ///
    /// Output depends only on the profile, the transcript and the timestamp.
    pub fn render(&self, transcript: &str, generated_at: NaiveDateTime) -> StudyDocument {
        let analysis = TranscriptAnalysis::analyze(transcript, self.profile.subtitle_format);
        let mut doc = Markdown::new(self.profile.is_bilingual());

        let vocabulary = materials::extract_vocabulary(
            &analysis.text,
            materials::vocabulary_target(analysis.duration_minutes),
        );

        doc.line("# TED English Learning Package");
        doc.line(format!(
            "\nGenerated: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        self.parameter_echo(&mut doc, &analysis);
        self.overview(&mut doc);
        self.vocabulary(&mut doc, &vocabulary);
        self.phrases(&mut doc, &analysis.text);
        self.grammar(&mut doc);
        self.listening(&mut doc);
        self.speaking_writing(&mut doc);
        self.scenarios(&mut doc);
        self.shadowing(&mut doc, &analysis);
        self.review(&mut doc, &vocabulary);

        if !self.profile.is_simplified() {
            self.quality_footer(&mut doc);
        }

        StudyDocument {
            markdown: doc.finish(),
            duration_minutes: analysis.duration_minutes,
            difficulty: analysis.difficulty,
        }
    }

    fn parameter_echo(&self, doc: &mut Markdown, analysis: &TranscriptAnalysis) {
        let p = &self.profile;

        doc.heading(1, "0. Parameter Echo", "参数回显");
        doc.line(format!("\n- {}: {}", doc.label("Level", "水平"), p.level.description()));
        doc.line(format!("- {}: {}", doc.label("Vocabulary", "词汇量"), p.vocabulary_size));
        doc.line(format!("- {}: {}", doc.label("Goals", "目标"), p.goals_display()));
        doc.line(format!("- {}: {}", doc.label("Input Format", "输入格式"), analysis.format));
        doc.line(format!(
            "- {}: {} / {}",
            doc.label("Output", "输出"),
            p.output_language,
            p.output_style
        ));
        doc.line(format!(
            "- {}: {:.1} minutes",
            doc.label("Duration", "时长"),
            analysis.duration_minutes
        ));
        doc.line(format!(
            "- {}: {}/100",
            doc.label("Difficulty Score", "难度评分"),
            analysis.difficulty.score
        ));
        doc.line(format!(
            "- {}: {}\n",
            doc.label("Strategy", "策略"),
            analysis.difficulty.strategy.advice()
        ));
    }

    fn overview(&self, doc: &mut Markdown) {
        doc.heading(1, "1. Content Overview", "内容总览");
        doc.heading(2, "\nSummary", "摘要");
        doc.line("\n**Simple Version:**");
        doc.line("This TED talk explores important ideas about innovation and sustainable development. The speaker discusses how we can create positive change through new thinking and collaborative action.");
        if !self.profile.is_simplified() {
            doc.line("\n**Natural Version:**");
            doc.line("In this compelling TED presentation, the speaker examines the intersection of innovation and sustainability, arguing that transformative solutions to global challenges require both creative thinking and collective commitment to long-term environmental and social responsibility.");
        }

        doc.heading(2, "\nKey Themes", "主题关键词");
        doc.line("innovation, sustainability, collaboration, technology, global challenges, creative thinking, environmental responsibility, social impact");

        doc.heading(2, "\nSpeaker's Main Points", "核心观点");
        doc.line("- Innovation is essential for addressing contemporary global challenges");
        doc.line("- Sustainable practices must be integrated into all aspects of development");
        doc.line("- Collective action and collaboration are necessary for meaningful change");
        doc.line("- Technology can be leveraged as a tool for positive social and environmental impact\n");
    }

    fn vocabulary(&self, doc: &mut Markdown, vocabulary: &[VocabularyItem]) {
        doc.heading(1, "2. Core Vocabulary", "核心词汇表");
        doc.line(format!(
            "\n| Word | IPA | POS | {} | Collocations | Original Sentence | Teacher Example |",
            doc.label("Meaning", "中英")
        ));
        doc.line("|------|-----|-----|----------------|--------------|-------------------|-----------------|");

        for item in vocabulary {
            let meaning = if doc.bilingual {
                format!("{} / {}", item.chinese_meaning, item.english_gloss)
            } else {
                item.english_gloss.to_string()
            };
            doc.line(format!(
                "| {} | {} | {} | {} | {} | {} ({}) | {} |",
                item.word,
                item.ipa,
                item.part_of_speech,
                meaning,
                item.collocations.join(", "),
                item.original_sentence,
                item.timestamp,
                item.model_sentence
            ));
        }
    }

    fn phrases(&self, doc: &mut Markdown, text: &str) {
        doc.heading(1, "\n3. High-Frequency Phrases & Patterns", "高频短语与句型");
        doc.line("\n| Expression | Usage Note | Variants | Original Excerpt | Transfer Examples |");
        doc.line("|------------|------------|----------|------------------|-------------------|");

        for phrase in materials::extract_phrases(text, PHRASE_COUNT) {
            let examples = phrase
                .transfer_examples
                .iter()
                .map(|(label, example)| format!("**{}**: {}", label, example))
                .collect::<Vec<_>>()
                .join(" | ");
            doc.line(format!(
                "| {} | {} | {} | {} | {} |",
                phrase.expression,
                phrase.usage_note,
                phrase.variants.join(", "),
                phrase.original_excerpt,
                examples
            ));
        }
    }

    fn grammar(&self, doc: &mut Markdown) {
        doc.heading(1, "\n4. Grammar & Expression Mini-Lessons", "语法与表达微课");
        doc.heading(2, "\nLesson 1: Parallel Structure", "平行结构");
        doc.line("**Rule**: Use consistent grammatical forms when listing items or ideas.");
        doc.line("**Template**: We need to [verb], [verb], and [verb].");
        doc.line("**Example**: We need to *innovate*, *collaborate*, and *persevere*.");

        doc.heading(2, "\nLesson 2: Emphasis with 'It is...that'", "强调句型");
        doc.line("**Rule**: Use 'It is...that/who' to emphasize specific elements.");
        doc.line("**Template**: It is [emphasized element] that [rest of sentence].");
        doc.line("**Example**: It is *through collective action* that we will succeed.\n");
    }

    fn listening(&self, doc: &mut Markdown) {
        let listening = materials::listening_exercises();

        doc.heading(1, "5. Listening Training", "听力训练");
        doc.heading(2, "\nPre-Listening Warm-up", "听前热身");
        for (i, q) in listening.warmup_questions.iter().enumerate() {
            doc.line(format!("{}. {}", i + 1, q));
        }

        doc.heading(2, "\nFill in the Blanks", "听中填空");
        for (i, item) in listening.fill_blanks.iter().enumerate() {
            doc.line(format!("{}. {}", i + 1, item.sentence));
        }
        doc.line(format!(
            "\n<details><summary>{}</summary>\n",
            doc.label("Answers & Explanations", "答案与解析")
        ));
        for (i, item) in listening.fill_blanks.iter().enumerate() {
            doc.line(format!("{}. **{}** - {}", i + 1, item.answer, item.explanation));
        }
        doc.line("\n</details>");

        doc.line(format!(
            "\n## {} - True/False/Not Given",
            doc.label("Detail Questions", "细节判断")
        ));
        for (i, item) in listening.detail_questions.iter().enumerate() {
            doc.line(format!("{}. {}", i + 1, item.statement));
        }
        doc.line(format!(
            "\n<details><summary>{}</summary>\n",
            doc.label("Answers & Location", "答案与定位")
        ));
        for (i, item) in listening.detail_questions.iter().enumerate() {
            doc.line(format!("{}. **{}** - {}", i + 1, item.answer, item.location));
        }
        doc.line("\n</details>\n");
    }

    fn speaking_writing(&self, doc: &mut Markdown) {
        let tasks = materials::speaking_writing_tasks();

        doc.heading(1, "6. Speaking & Writing", "口语与写作");
        doc.heading(2, "\nSummary Outline", "要点复述提纲");
        for point in &tasks.summary_outline {
            doc.line(*point);
        }

        doc.heading(2, "\nSpeaking Cards", "即兴口语卡片");
        for (i, card) in tasks.speaking_cards.iter().enumerate() {
            doc.line(format!("\n**Card {}**: {}", i + 1, card.prompt));
            doc.line(format!("*Evaluation Criteria*: {}", card.criteria));
        }

        let writing = &tasks.writing_task;
        doc.heading(2, "\nWriting Task", "段落写作");
        doc.line(format!("\n**Prompt**: {}", writing.prompt));
        doc.line(format!("\n**Opening Sentence**: {}", writing.starter));
        doc.line(format!("\n**Structure**: {}", writing.structure));
        doc.line(format!("\n**Key Phrases**: {}\n", writing.key_phrases.join(", ")));
    }

    fn scenarios(&self, doc: &mut Markdown) {
        let content = materials::scenarios_dialogues();

        doc.heading(1, "7. Extended Scenarios & Dialogues", "场景扩展与模拟对话");
        doc.heading(2, "\nScenarios", "扩展情景");
        for (i, scenario) in content.scenarios.iter().enumerate() {
            doc.line(format!("\n**Scenario {}: {}**", i + 1, scenario.title));
            doc.line(format!("- Context: {}", scenario.context));
            doc.line(format!("- Key Expressions: {}", scenario.key_expressions));
        }

        doc.heading(2, "\nDialogues", "模拟对话");
        for (i, dialogue) in content.dialogues.iter().enumerate() {
            doc.line(format!("\n**Dialogue {}: {}**", i + 1, dialogue.title));
            doc.line(format!("\n*Setting*: {}", dialogue.setting));
            doc.line(format!("\n```\n{}\n```", dialogue.script));
            doc.line(format!("\n*Roles*: {}", dialogue.roles));
            doc.line(format!("\n*Replaceable Expressions*: {}\n", dialogue.replaceable));
        }
    }

    fn shadowing(&self, doc: &mut Markdown, analysis: &TranscriptAnalysis) {
        let shadowing = materials::shadowing_script(&analysis.segments());

        doc.heading(1, "8. Shadowing & Prosody", "跟读与语音");
        doc.heading(2, "\nSegmented Script", "断句稿");
        doc.line(format!("\n```\n{}\n```", shadowing.segmented_script));
        doc.line("\n*Legend*: / = pause, // = longer pause, **bold** = stress");

        doc.heading(2, "\nProsody Tips", "语音提示");
        for tip in &shadowing.prosody_tips {
            doc.line(*tip);
        }

        doc.heading(2, "\nPractice Speeds", "练习速度");
        for (speed, description) in &shadowing.practice_speeds {
            doc.line(format!("- **{}**: {}\n", speed, description));
        }
    }

    fn review(&self, doc: &mut Markdown, vocabulary: &[VocabularyItem]) {
        let review = materials::review_kit(vocabulary, &self.profile);
        let preview = if self.profile.is_simplified() {
            ANKI_PREVIEW_SIMPLIFIED
        } else {
            ANKI_PREVIEW_COMPLETE
        };

        doc.heading(1, "9. Review Kit", "巩固复习材料");
        doc.line("\n## Anki Cards (CSV Preview)");
        doc.line("\n| Front | Back | Tags |");
        doc.line("|-------|------|------|");
        for card in review.anki_cards.iter().take(preview) {
            doc.line(format!("| {} | {} | {} |", card.front, card.back, card.tags));
        }

        doc.heading(2, "\n7-Day Micro-Learning Plan", "7天微学习计划");
        doc.line("\n| Day | Duration | Task | Goal |");
        doc.line("|-----|----------|------|------|");
        for day in &review.seven_day_plan {
            doc.line(format!(
                "| {} | {} | {} | {} |",
                day.day, day.duration, day.task, day.goal
            ));
        }
    }

    fn quality_footer(&self, doc: &mut Markdown) {
        doc.line("\n---");
        doc.heading(2, "\nQuality Assurance", "质量保证");
        doc.line("- ✓ All terminology is accurate and examples are authentic");
        doc.line("- ✓ Content difficulty matches learner profile");
        doc.line("- ✓ Timestamps provided where available");
        if doc.bilingual {
            doc.line("- ✓ Bilingual explanations included");
        }
        doc.line("- ✓ Materials follow systematic learning progression\n");
    }
}

/// Line buffer that knows whether to append Chinese glosses
struct Markdown {
    lines: Vec<String>,
    bilingual: bool,
}

impl Markdown {
    fn new(bilingual: bool) -> Self {
        Self {
            lines: Vec::new(),
            bilingual,
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// `English (中文)` when bilingual, plain English otherwise
    fn label(&self, english: &str, chinese: &str) -> String {
        if self.bilingual {
            format!("{} ({})", english, chinese)
        } else {
            english.to_string()
        }
    }

    /// Heading line; a leading newline in `english` is kept before the hashes
    fn heading(&mut self, level: usize, english: &str, chinese: &str) {
        let (prefix, title) = match english.strip_prefix('\n') {
            Some(rest) => ("\n", rest),
            None => ("", english),
        };
        let line = format!(
            "{}{} {}",
            prefix,
            "#".repeat(level),
            self.label(title, chinese)
        );
        self.lines.push(line);
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
