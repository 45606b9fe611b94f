//! Output formatters for review reports

pub mod json;
pub mod pretty;

use serde::Serialize;
use shinsa_core::diagnostic::AnalysisResult;

/// One reviewed file and its analysis outcome, as handed to the formatters.
/// Serializes flat, so a file entry reads
/// `{"path": ..., "success": ..., "message": ..., "issues": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}
