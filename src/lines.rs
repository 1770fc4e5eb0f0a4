// Line classification for extracted exam text
//
// Every predicate here runs against a whitespace-trimmed line and is
// independent of parser state, so each rule is testable on its own. The
// parser applies them in a fixed order: category update and boilerplate
// filtering run on every non-blank line, shape matching afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

/// Token identifying a subject-area ("Sachgebiet") label line.
pub const CATEGORY_TOKEN: &str = "Sachgebiet";

/// Tokens identifying page furniture that carries no question content.
pub const BOILERPLATE_TOKENS: [&str; 4] = ["Stand:", "Seite", "Zweitkorrektor", "HERAUSGEBER"];

// ============================================================================
// LINE SHAPE PATTERNS
// ============================================================================

/// "12." - question number alone, text follows on later lines
static QUESTION_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s*$").unwrap());

/// "12. Was ist ...?" - question number with text on the same line
static QUESTION_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s+(.+)$").unwrap());

/// "a) Ein Dokument" - unmarked answer option
static OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([a-f])\)\s*(.*)$").unwrap());

/// "X a) Ein Dokument" - answer option with inline correctness marker
static OPTION_MARKED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*X\s+([a-f])\)\s*(.*)$").unwrap());

/// "X" alone - marks the next option line as correct
static MARKER_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*X\s*$").unwrap());

/// "3.1 Lang- und Kurzwaffen" - subsection heading, start of real content
static SUBSECTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\d+\s+").unwrap());

// ============================================================================
// CLEANUP PATTERNS
// ============================================================================
// Accumulation sweeps in lead-ins of the following line; these strip them.

/// Trailing "X a)" swept into question text
pub static TRAILING_OPTION_LEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+X\s+[a-f]\)\s*$").unwrap());

/// "X a) ..." and everything after it, swept into inline question text
pub static TRAILING_OPTION_SWEEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+X\s+[a-f]\).*$").unwrap());

/// Trailing lone marker swept into option text
pub static TRAILING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+X\s*$").unwrap());

/// Trailing "b)" lead-in swept into option text
pub static TRAILING_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[a-f]\)\s*$").unwrap());

// ============================================================================
// SHAPE CLASSIFICATION
// ============================================================================

/// Shape of a single trimmed line.
///
/// The shapes are mutually exclusive; `shape_of` returns the first (and
/// only) one that matches. Captured text is borrowed from the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// Question number with the text on following lines; holds the digits.
    QuestionNumber(&'a str),
    /// Question number plus inline text containing a '?'; digits + remainder.
    QuestionInline(&'a str, &'a str),
    /// Standalone correctness marker.
    Marker,
    /// Option line with inline correctness marker; letter + remainder.
    MarkedOption(char, &'a str),
    /// Option line without marker; letter + remainder.
    PlainOption(char, &'a str),
    /// Anything else (including numbered headings without a '?').
    Plain,
}

/// Classify a trimmed line into its shape.
///
/// A numeric line whose remainder lacks a question mark is NOT a question:
/// subsection headings share the "<int>. <text>" shape, and the question
/// mark is what tells them apart. Such lines classify as `Plain`.
pub fn shape_of(line: &str) -> LineShape<'_> {
    if let Some(caps) = QUESTION_NUMBER.captures(line) {
        return LineShape::QuestionNumber(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = QUESTION_INLINE.captures(line) {
        let rest = caps.get(2).map_or("", |m| m.as_str());
        if rest.contains('?') {
            let digits = caps.get(1).map_or("", |m| m.as_str());
            return LineShape::QuestionInline(digits, rest);
        }
        return LineShape::Plain;
    }
    if MARKER_ONLY.is_match(line) {
        return LineShape::Marker;
    }
    if let Some(caps) = OPTION_MARKED.captures(line) {
        return LineShape::MarkedOption(letter_of(&caps), option_text(&caps));
    }
    if let Some(caps) = OPTION.captures(line) {
        return LineShape::PlainOption(letter_of(&caps), option_text(&caps));
    }
    LineShape::Plain
}

fn letter_of(caps: &regex::Captures<'_>) -> char {
    // The [a-f] class guarantees a single ASCII byte in capture 1.
    caps.get(1).map_or("a", |m| m.as_str()).as_bytes()[0] as char
}

fn option_text<'a>(caps: &regex::Captures<'a>) -> &'a str {
    caps.get(2).map_or("", |m| m.as_str())
}

// ============================================================================
// ALWAYS-RUN PREDICATES
// ============================================================================

/// Does this line carry a subject-area label? ("Sachgebiet" plus a colon)
pub fn is_category(line: &str) -> bool {
    line.contains(CATEGORY_TOKEN) && line.contains(':')
}

/// Is this line page furniture (date stamp, page number, reviewer,
/// publisher) that must be skipped entirely?
pub fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_TOKENS.iter().any(|token| line.contains(token))
}

/// Does this line open the real question content? ("<int>.<int> <text>")
pub fn is_subsection_header(line: &str) -> bool {
    SUBSECTION_HEADER.is_match(line)
}

// ============================================================================
// ACCUMULATION TERMINATORS
// ============================================================================
// Lookahead passes need shape tests without captures. Note the inline
// question pattern applies here WITHOUT the question-mark requirement: a
// heading-shaped line still terminates accumulation.

/// Option-shaped, marked or not.
pub fn is_option_shaped(line: &str) -> bool {
    OPTION.is_match(line) || OPTION_MARKED.is_match(line)
}

/// Unmarked option only (the inline-question pass does not stop at marked
/// options; their lead-in is stripped during cleanup instead).
pub fn is_plain_option_shaped(line: &str) -> bool {
    OPTION.is_match(line)
}

/// Question-shaped in either form, question mark not required.
pub fn is_question_shaped(line: &str) -> bool {
    QUESTION_NUMBER.is_match(line) || QUESTION_INLINE.is_match(line)
}

/// Standalone correctness marker.
pub fn is_marker_only(line: &str) -> bool {
    MARKER_ONLY.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_number_only() {
        assert_eq!(shape_of("12."), LineShape::QuestionNumber("12"));
        assert_eq!(shape_of("1."), LineShape::QuestionNumber("1"));
        // text after the dot makes it a different shape
        assert_ne!(shape_of("12. Foo?"), LineShape::QuestionNumber("12"));
    }

    #[test]
    fn test_question_inline_requires_question_mark() {
        assert_eq!(
            shape_of("7. Was ist ein Jagdschein?"),
            LineShape::QuestionInline("7", "Was ist ein Jagdschein?")
        );
        // numbered heading without '?' is plain content
        assert_eq!(shape_of("7. Begriffe und Definitionen"), LineShape::Plain);
    }

    #[test]
    fn test_subsection_heading_is_not_a_question() {
        // "3.1 ..." never matches the question shapes: the second integer
        // blocks the required whitespace after the dot
        assert_eq!(shape_of("3.1 Lang- und Kurzwaffen"), LineShape::Plain);
        assert!(!is_question_shaped("3.1 Lang- und Kurzwaffen"));
        assert!(is_subsection_header("3.1 Lang- und Kurzwaffen"));
    }

    #[test]
    fn test_subsection_header_requires_trailing_text() {
        assert!(!is_subsection_header("3.1"));
        assert!(!is_subsection_header("12."));
        assert!(is_subsection_header("1.1 Begriffe"));
    }

    #[test]
    fn test_marker_only() {
        assert_eq!(shape_of("X"), LineShape::Marker);
        assert!(is_marker_only("X"));
        // anything more than the marker is not a standalone marker
        assert_ne!(shape_of("X b) Eine Erlaubnis"), LineShape::Marker);
        assert_ne!(shape_of("Xenon"), LineShape::Marker);
    }

    #[test]
    fn test_option_shapes() {
        assert_eq!(
            shape_of("a) Ein Dokument"),
            LineShape::PlainOption('a', "Ein Dokument")
        );
        assert_eq!(
            shape_of("X b) Eine Erlaubnis"),
            LineShape::MarkedOption('b', "Eine Erlaubnis")
        );
        // letters outside a-f are not options
        assert_eq!(shape_of("g) Keine Option"), LineShape::Plain);
    }

    #[test]
    fn test_option_with_empty_text_still_matches() {
        assert_eq!(shape_of("c)"), LineShape::PlainOption('c', ""));
    }

    #[test]
    fn test_marked_option_is_not_plain_option_shaped() {
        assert!(is_option_shaped("X b) Eine Erlaubnis"));
        assert!(!is_plain_option_shaped("X b) Eine Erlaubnis"));
        assert!(is_plain_option_shaped("b) Eine Erlaubnis"));
    }

    #[test]
    fn test_is_category() {
        assert!(is_category("1. Sachgebiet: Jagdwaffen"));
        assert!(is_category("Sachgebiet 2: Tierarten"));
        // token without colon is not a category line
        assert!(!is_category("Sachgebiet Jagdwaffen"));
        assert!(!is_category("Irgendwas: anderes"));
    }

    #[test]
    fn test_is_boilerplate() {
        assert!(is_boilerplate("Stand: 01.03.2025"));
        assert!(is_boilerplate("Seite 3 von 12"));
        assert!(is_boilerplate("Erstkorrektor / Zweitkorrektor"));
        assert!(is_boilerplate("HERAUSGEBER: Bayerisches Staatsministerium"));
        assert!(!is_boilerplate("Was ist ein Jagdschein?"));
    }

    #[test]
    fn test_cleanup_patterns() {
        assert_eq!(
            TRAILING_OPTION_LEAD.replace("Was ist das? X a)", ""),
            "Was ist das?"
        );
        assert_eq!(
            TRAILING_OPTION_SWEEP.replace("Was ist das? X a) Ein Dokument", ""),
            "Was ist das?"
        );
        assert_eq!(TRAILING_MARKER.replace("Ein Dokument X", ""), "Ein Dokument");
        assert_eq!(TRAILING_LETTER.replace("Ein Dokument b)", ""), "Ein Dokument");
        // a lone lead-in with no preceding text survives (no leading space)
        assert_eq!(TRAILING_OPTION_LEAD.replace("X a)", ""), "X a)");
    }
}
