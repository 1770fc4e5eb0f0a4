// Batch layer - one catalog per subject-area file, merged into an umbrella
//
// The published question catalog ships as one PDF per subject area
// ("Sachgebiet"), named with an _sg<N> suffix. Batch mode discovers those
// files, parses each independently and concatenates the question lists.
// There is deliberately no deduplication across files: question numbers
// restart per subject area and collisions are expected.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::models::{current_timestamp, Catalog};
use crate::parser::{self, CATALOG_STATE, CATALOG_YEAR};

pub const BATCH_TITLE: &str = "Jagdfrageprüfer Bayern - Alle Sachgebiete";
pub const BATCH_SUBJECT: &str = "Alle Sachgebiete (SG 1-6)";

/// One discovered subject-area file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
    /// Numeric section suffix from the file name (1-based).
    pub section: u32,
    pub path: PathBuf,
}

/// Extract the numeric section suffix from a file name.
///
/// Accepts names like `fragekatalog_2025_sg3.pdf` (→ 3). The name must end
/// in `.pdf`, contain exactly one `_sg`, and the suffix must start with a
/// positive number; anything after the digits is ignored.
pub fn section_number(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".pdf")?;

    let mut parts = stem.split("_sg");
    let (Some(_), Some(suffix), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    let digits: String = suffix.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(section) if section >= 1 => Some(section),
        _ => None,
    }
}

/// Find all subject-area PDFs in `dir`, sorted by section number ascending.
pub fn discover_section_files(dir: &Path) -> Result<Vec<SectionFile>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        if entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(section) = section_number(&name) {
            files.push(SectionFile {
                section,
                path: dir.join(&name),
            });
        }
    }

    files.sort_by_key(|f| f.section);
    Ok(files)
}

/// Parse every discovered subject-area file and merge the results.
///
/// A file that fails to parse is logged and skipped; the batch only fails
/// when no matching files exist at all.
pub fn parse_batch(dir: &Path) -> Result<Catalog> {
    let files = discover_section_files(dir)?;
    if files.is_empty() {
        bail!("no *_sg*.pdf files found in {}", dir.display());
    }

    info!("found {} subject-area files to process", files.len());

    let mut questions = Vec::new();
    for file in &files {
        info!("processing SG{}: {}", file.section, file.path.display());
        match parser::parse_file(&file.path) {
            Ok(catalog) => {
                info!("parsed {} questions", catalog.total_count);
                questions.extend(catalog.questions);
            }
            Err(err) => {
                error!("failed to parse {}: {err:#}", file.path.display());
            }
        }
    }

    Ok(Catalog {
        title: BATCH_TITLE.to_string(),
        year: CATALOG_YEAR,
        state: CATALOG_STATE.to_string(),
        subject: BATCH_SUBJECT.to_string(),
        total_count: questions.len(),
        questions,
        last_modified: current_timestamp(),
    })
}
