// Fragekatalog - Core Library
// Exposes all modules for use in the CLI and tests

pub mod batch;
pub mod extract;
pub mod lines;
pub mod models;
pub mod parser;

// Re-export commonly used types
pub use batch::{discover_section_files, parse_batch, SectionFile};
pub use extract::{extract_text, ExtractionError};
pub use models::{current_timestamp, AnswerOption, Catalog, Question};
pub use parser::{parse_file, parse_text, Parser};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
