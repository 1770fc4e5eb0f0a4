// Catalog data model - the immutable output of a parse
//
// Field names serialize in camelCase to stay compatible with consumers of
// the questions.json format.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single answer option of a question.
///
/// Named `AnswerOption` rather than `Option` to avoid shadowing
/// `std::option::Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option letter: a, b, c, d, e or f
    pub letter: char,
    /// The answer text
    pub text: String,
    /// Whether this option is marked as correct
    pub correct: bool,
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question number as printed in the source document (1, 2, 3, ...)
    pub id: u32,
    /// The question text
    pub text: String,
    /// Answer options, always in letter order a → f
    pub options: Vec<AnswerOption>,
    /// Subject-area label current when the question was parsed (may be empty)
    pub category: String,
}

/// The entire collection of questions from one document (or one batch run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Title of the exam
    pub title: String,
    /// Year of the exam
    pub year: u16,
    /// State code (e.g. "by" for Bayern)
    pub state: String,
    /// Main subject area
    pub subject: String,
    /// Number of questions in `questions`
    pub total_count: usize,
    /// All questions, ordered by id
    pub questions: Vec<Question>,
    /// When this catalog was generated (RFC3339)
    pub last_modified: String,
}

/// Current time in RFC3339 format with second precision.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_serializes_camel_case() {
        let catalog = Catalog {
            title: "Test".to_string(),
            year: 2025,
            state: "by".to_string(),
            subject: "Begriffe".to_string(),
            total_count: 1,
            questions: vec![Question {
                id: 12,
                text: "Was ist ein Jagdschein?".to_string(),
                options: vec![AnswerOption {
                    letter: 'a',
                    text: "Ein Dokument".to_string(),
                    correct: true,
                }],
                category: String::new(),
            }],
            last_modified: "2025-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"totalCount\":1"));
        assert!(json.contains("\"lastModified\":\"2025-01-01T00:00:00Z\""));
        // char letters serialize as one-character strings
        assert!(json.contains("\"letter\":\"a\""));
    }

    #[test]
    fn test_catalog_round_trips() {
        let catalog = Catalog {
            title: "Test".to_string(),
            year: 2025,
            state: "by".to_string(),
            subject: "Begriffe".to_string(),
            total_count: 0,
            questions: vec![],
            last_modified: current_timestamp(),
        };

        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_current_timestamp_is_rfc3339() {
        let ts = current_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
