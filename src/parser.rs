// Question catalog parser - a line-oriented state machine
//
// The extracted text is processed line by line: a header-skip pass locates
// the first subsection heading and seeds the category, then each line runs
// through the classifier and, for question/option openers, a bounded
// lookahead pass that merges continuation lines. Lookahead never consumes:
// the main loop still visits every line it swept over, which is how the
// option lines following a question get committed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::extract;
use crate::lines::{self, LineShape};
use crate::models::{current_timestamp, AnswerOption, Catalog, Question};

// ============================================================================
// CATALOG METADATA
// ============================================================================

pub const CATALOG_TITLE: &str = "Jagdfrageprüfer Bayern";
pub const CATALOG_YEAR: u16 = 2025;
pub const CATALOG_STATE: &str = "by";
pub const CATALOG_SUBJECT: &str = "Jagdwaffen, Jagd- und Fanggeräte";

// ============================================================================
// PARSE LIMITS
// ============================================================================

/// Lookahead bound past a number-only question line.
const QUESTION_LOOKAHEAD: usize = 15;
/// Lookahead bound past an inline question line.
const INLINE_LOOKAHEAD: usize = 10;
/// Lookahead bound past an option line.
const OPTION_LOOKAHEAD: usize = 8;
/// How many lines before the first subsection heading are searched for the
/// initial category label.
const CATEGORY_BACKSCAN: usize = 50;
/// Question text must be longer than this (in bytes) to survive.
const MIN_QUESTION_LEN: usize = 5;

/// The fixed option letter sequence; finalization emits options in this
/// order regardless of the order they were encountered in the source.
pub const OPTION_LETTERS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

// ============================================================================
// PARSER
// ============================================================================

/// Parses one exam document into a [`Catalog`].
pub struct Parser {
    pdf_path: PathBuf,
}

impl Parser {
    pub fn new(pdf_path: impl Into<PathBuf>) -> Self {
        Parser {
            pdf_path: pdf_path.into(),
        }
    }

    /// Extract the document text and parse it.
    ///
    /// The only fallible step is text extraction; parsing itself recovers
    /// from every malformed input locally.
    pub fn parse(&self) -> Result<Catalog> {
        let text = extract::extract_text(&self.pdf_path).with_context(|| {
            format!("failed to extract text from {}", self.pdf_path.display())
        })?;
        Ok(parse_text(&text))
    }
}

/// Convenience: parse the document at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Catalog> {
    Parser::new(path.as_ref()).parse()
}

// ============================================================================
// SESSION STATE
// ============================================================================

#[derive(Debug, Default)]
struct OptionDraft {
    text: String,
    correct: bool,
}

#[derive(Debug)]
struct QuestionDraft {
    text: String,
    /// Category current when this draft was created (or overwritten).
    category: String,
    options: BTreeMap<char, OptionDraft>,
}

/// Mutable state of one parse call. Never shared across documents.
#[derive(Debug, Default)]
struct Session {
    /// Number of the most recently opened question, even if its draft was
    /// rejected for short text. None until the first question line.
    last_question: Option<u32>,
    /// Set by a standalone marker line, consumed by the next committed
    /// unmarked option.
    pending_correct: bool,
    /// Current subject-area label, replaced by every category line.
    category: String,
    drafts: BTreeMap<u32, QuestionDraft>,
}

// ============================================================================
// TEXT PARSING
// ============================================================================

/// Parse extracted document text into a catalog. Deterministic: identical
/// input yields an identical catalog (apart from the timestamp).
pub fn parse_text(text: &str) -> Catalog {
    let trimmed: Vec<&str> = text.lines().map(str::trim).collect();

    let (start, seed_category) = find_content_start(&trimmed);
    let mut session = Session {
        category: seed_category,
        ..Session::default()
    };

    for i in start..trimmed.len() {
        let line = trimmed[i];

        if line.is_empty() {
            continue;
        }

        // Category lines update state but are not consumed: the same line
        // may still match a shape below.
        if lines::is_category(line) {
            session.category = line.to_string();
        }

        if lines::is_boilerplate(line) {
            continue;
        }

        match lines::shape_of(line) {
            LineShape::QuestionNumber(digits) => {
                let Some(number) = parse_question_number(digits) else {
                    continue;
                };
                session.last_question = Some(number);
                let question_text = accumulate_question(&trimmed, i);
                if question_text.len() > MIN_QUESTION_LEN {
                    session.drafts.insert(
                        number,
                        QuestionDraft {
                            text: question_text,
                            category: session.category.clone(),
                            options: BTreeMap::new(),
                        },
                    );
                }
            }
            LineShape::QuestionInline(digits, rest) => {
                let Some(number) = parse_question_number(digits) else {
                    continue;
                };
                session.last_question = Some(number);
                let question_text = accumulate_inline_question(&trimmed, i, rest);
                if question_text.len() > MIN_QUESTION_LEN {
                    session.drafts.insert(
                        number,
                        QuestionDraft {
                            text: question_text,
                            category: session.category.clone(),
                            options: BTreeMap::new(),
                        },
                    );
                }
            }
            LineShape::Marker => {
                if session.last_question.is_some() {
                    session.pending_correct = true;
                }
            }
            LineShape::MarkedOption(letter, rest) => {
                let Some(number) = session.last_question else {
                    continue;
                };
                let Some(draft) = session.drafts.get_mut(&number) else {
                    continue;
                };
                let option_text = accumulate_option(&trimmed, i, rest);
                draft
                    .options
                    .insert(letter, OptionDraft { text: option_text, correct: true });
                session.pending_correct = false;
            }
            LineShape::PlainOption(letter, rest) => {
                // An option with no live draft is discarded without touching
                // the pending flag; the flag waits for a committable option.
                let Some(number) = session.last_question else {
                    continue;
                };
                let Some(draft) = session.drafts.get_mut(&number) else {
                    continue;
                };
                let option_text = accumulate_option(&trimmed, i, rest);
                let correct = std::mem::take(&mut session.pending_correct);
                draft
                    .options
                    .insert(letter, OptionDraft { text: option_text, correct });
            }
            LineShape::Plain => {}
        }
    }

    finalize(session)
}

/// Locate the first subsection heading and seed the category from the lines
/// just above it. Falls back to line 0 with an empty category.
fn find_content_start(trimmed: &[&str]) -> (usize, String) {
    for (i, line) in trimmed.iter().enumerate() {
        if lines::is_subsection_header(line) {
            let mut category = String::new();
            for j in (i.saturating_sub(CATEGORY_BACKSCAN)..i).rev() {
                if lines::is_category(trimmed[j]) {
                    category = trimmed[j].to_string();
                    break;
                }
            }
            return (i, category);
        }
    }
    (0, String::new())
}

fn parse_question_number(digits: &str) -> Option<u32> {
    match digits.parse::<u32>() {
        Ok(number) if number >= 1 => Some(number),
        Ok(_) => None,
        Err(err) => {
            debug!("skipping line with unparseable question number '{digits}': {err}");
            None
        }
    }
}

// ============================================================================
// MULTI-LINE ACCUMULATION
// ============================================================================

/// Collect the text lines following a number-only question line.
fn accumulate_question(trimmed: &[&str], start: usize) -> String {
    let mut text = String::new();
    for j in start + 1..trimmed.len().min(start + QUESTION_LOOKAHEAD) {
        let next = trimmed[j];
        if next.is_empty() {
            continue;
        }
        if lines::is_option_shaped(next) || lines::is_marker_only(next) {
            break;
        }
        if lines::is_question_shaped(next) {
            break;
        }
        text.push(' ');
        text.push_str(next);
    }
    let text = text.trim();
    let text = lines::TRAILING_OPTION_LEAD.replace(text, "");
    text.trim().to_string()
}

/// Collect continuation lines of a question whose text started on the
/// numbered line itself.
fn accumulate_inline_question(trimmed: &[&str], start: usize, first: &str) -> String {
    let mut text = first.trim().to_string();
    for j in start + 1..trimmed.len().min(start + INLINE_LOOKAHEAD) {
        let next = trimmed[j];
        if next.is_empty() {
            continue;
        }
        if lines::is_plain_option_shaped(next) {
            break;
        }
        if lines::is_question_shaped(next) {
            break;
        }
        text.push(' ');
        text.push_str(next);
    }
    let text = text.trim().replace("  ", " ");
    let text = lines::TRAILING_OPTION_SWEEP.replace(&text, "");
    text.trim().to_string()
}

/// Collect continuation lines of an option.
fn accumulate_option(trimmed: &[&str], start: usize, first: &str) -> String {
    let mut text = first.trim().to_string();
    for j in start + 1..trimmed.len().min(start + OPTION_LOOKAHEAD) {
        let next = trimmed[j];
        if next.is_empty() {
            continue;
        }
        if lines::is_option_shaped(next) {
            break;
        }
        if lines::is_question_shaped(next) {
            break;
        }
        if next.contains(lines::CATEGORY_TOKEN) || next.contains("Stand:") {
            break;
        }
        text.push(' ');
        text.push_str(next);
    }
    let text = text.trim();
    let text = lines::TRAILING_MARKER.replace(text, "");
    let text = lines::TRAILING_LETTER.replace(&text, "");
    text.trim().to_string()
}

// ============================================================================
// FINALIZATION
// ============================================================================

/// Promote complete drafts into the immutable catalog. Drafts with short
/// text or no options are dropped silently; options materialize in letter
/// order, absent letters are skipped, never synthesized.
fn finalize(session: Session) -> Catalog {
    let mut questions = Vec::new();

    for (number, draft) in &session.drafts {
        if draft.text.len() <= MIN_QUESTION_LEN || draft.options.is_empty() {
            continue;
        }

        let mut options = Vec::new();
        for letter in OPTION_LETTERS {
            if let Some(opt) = draft.options.get(&letter) {
                options.push(AnswerOption {
                    letter,
                    text: opt.text.clone(),
                    correct: opt.correct,
                });
            }
        }

        questions.push(Question {
            id: *number,
            text: draft.text.clone(),
            options,
            category: draft.category.clone(),
        });
    }

    Catalog {
        title: CATALOG_TITLE.to_string(),
        year: CATALOG_YEAR,
        state: CATALOG_STATE.to_string(),
        subject: CATALOG_SUBJECT.to_string(),
        total_count: questions.len(),
        questions,
        last_modified: current_timestamp(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
