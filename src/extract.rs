// Text source - wraps the external pdftotext executable
//
// pdftotext (Poppler) already linearizes the page layout into top-to-bottom,
// left-to-right reading order; this module only runs it and hands the raw
// text to the parser. One blocking invocation per document, no retry.

use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;

const EXTRACTION_TOOL: &str = "pdftotext";

/// Failure of the external text source. Fatal for the affected document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The tool could not be started at all (usually: not installed).
    #[error("failed to launch {EXTRACTION_TOOL}")]
    Launch(#[source] std::io::Error),

    /// The tool ran but reported failure.
    #[error("{EXTRACTION_TOOL} failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Extract the text content of the document at `pdf_path`.
///
/// Invokes `pdftotext <path> -` and captures stdout. Output is decoded as
/// UTF-8 lossily so a stray byte never aborts a parse.
pub fn extract_text(pdf_path: &Path) -> Result<String, ExtractionError> {
    run_tool(EXTRACTION_TOOL, pdf_path)
}

fn run_tool(tool: &str, pdf_path: &Path) -> Result<String, ExtractionError> {
    let output = Command::new(tool)
        .arg(pdf_path)
        .arg("-")
        .output()
        .map_err(ExtractionError::Launch)?;

    if !output.status.success() {
        return Err(ExtractionError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_a_launch_error() {
        let err = run_tool("pdftotext-does-not-exist", Path::new("x.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::Launch(_)));
    }

    #[test]
    fn test_nonzero_exit_is_a_failed_error() {
        // `false` exists everywhere, ignores its arguments and exits 1
        let err = run_tool("false", Path::new("x.pdf")).unwrap_err();
        match err {
            ExtractionError::Failed { status, .. } => assert!(!status.success()),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_run_returns_stdout() {
        // `cat <file> -` reads the file, then an immediately-closed stdin
        let out = run_tool("cat", Path::new("/dev/null")).unwrap();
        assert_eq!(out, "");
    }
}
