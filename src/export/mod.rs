/*!
 * File exporters.
 *
 * - `pdf`: printable card tables
 * - `csv`: Anki import files
 *
 * PDF files show the projected cards (only the selected section); CSV files
 * build the back side from the full cards.
 */

use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::ExportError;
use crate::file_utils::FileManager;
use crate::flashcards::{project, LanguageDecks, Section};

pub mod csv;
pub mod pdf;

pub use self::csv::build_csv;
pub use self::pdf::{build_pdf, plan_document, PdfOptions};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

/// File name of an export: `flashcards_{language}_{unixtime}_{section}.{ext}`
pub fn export_filename(language: &str, unix_time: i64, section: Section, format: ExportFormat) -> String {
    format!(
        "flashcards_{}_{}_{}.{}",
        FileManager::sanitize_file_component(language),
        unix_time,
        section.file_label(),
        format.extension()
    )
}

/// What to write and where
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub topic: &'a str,
    pub section: Section,
    pub formats: Vec<ExportFormat>,
    pub output_dir: &'a Path,
    pub unix_time: i64,
    pub pdf: PdfOptions,
}

/// Write every enabled format for every language and return the paths
pub fn write_exports(decks: &LanguageDecks, request: &ExportRequest<'_>) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();

    for deck in decks.iter() {
        for format in &request.formats {
            let bytes = match format {
                ExportFormat::Pdf => {
                    let projected = project(&deck.cards, request.section);
                    build_pdf(request.topic, &deck.language, &projected, &request.pdf)?
                }
                ExportFormat::Csv => build_csv(&deck.language, &deck.cards, request.section)?,
            };

            let name = export_filename(&deck.language, request.unix_time, request.section, *format);
            let path = FileManager::write_bytes(request.output_dir, &name, &bytes)?;
            info!("Wrote {} for {}: {}", format, deck.language, path.display());
            written.push(path);
        }
    }

    Ok(written)
}
