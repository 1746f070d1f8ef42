//! Workbook → JSON conversion.
//!
//! Most callers should use [`convert_file_to_json`] (one workbook) or [`convert_directory`]
//! (every workbook in a folder). Both read the first worksheet (or the one chosen via
//! [`ConvertOptions::sheet`]), parse it with [`crate::parsing::parse_rows`], and write
//! `<stem>.json` next to the input.
//!
//! If an observer is configured in [`ConvertOptions`], success/failure/alerts are reported to it.
//!
//! # Example
//!
//! ```no_run
//! use tagsheet::convert::{convert_directory, BatchOptions, ConvertOptions};
//!
//! # fn main() -> Result<(), tagsheet::ConvertError> {
//! let summary = convert_directory(".", &ConvertOptions::default(), &BatchOptions::default())?;
//! println!("{}/{} files converted", summary.converted(), summary.total());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::error::{ConvertError, ConvertResult};
use crate::ingestion::excel::{SheetSelection, read_rows_from_path};
use crate::ingestion::observability::{ConversionContext, ConversionObserver, ConversionSeverity};
use crate::parsing::parse_rows;
use crate::types::{Document, DocumentStats};

/// Extension of the workbooks picked up by [`discover_workbooks`].
pub const WORKBOOK_EXTENSION: &str = "xlsx";
/// Extension of the written documents.
pub const OUTPUT_EXTENSION: &str = "json";

/// Options controlling conversion of a single workbook.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ConvertOptions {
    /// Worksheet holding the tag table.
    pub sheet: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelection::default(),
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

/// Options for [`convert_directory`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads converting files in parallel.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

/// A workbook that was converted and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: DocumentStats,
}

/// Outcome for one workbook of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: ConvertResult<ConvertedFile>,
}

/// Per-file outcomes of a batch, in discovery order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    /// Number of workbooks attempted.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of workbooks converted and written.
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Document name for a workbook path: its file name without extension.
pub fn document_name(path: &Path) -> ConvertResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConvertError::InvalidPath {
            message: format!("cannot derive a document name from ({})", path.display()),
        })
}

/// `<stem>.json` next to the input.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Pretty JSON (2-space indent, `name` first, non-ASCII kept as is).
pub fn render_json(doc: &Document) -> ConvertResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write `doc` as JSON to `path`, replacing any existing file.
pub fn write_document(doc: &Document, path: impl AsRef<Path>) -> ConvertResult<()> {
    fs::write(path, render_json(doc)?)?;
    Ok(())
}

/// Read and parse one workbook.
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> ConvertResult<Document> {
    let path = path.as_ref();
    let result = read_document(path, options);
    report(options, path, result.as_ref().map(Document::stats));
    result
}

/// Read and parse one workbook, then write `<stem>.json` next to it.
pub fn convert_file_to_json(path: impl AsRef<Path>, options: &ConvertOptions) -> ConvertResult<ConvertedFile> {
    let path = path.as_ref();
    let result = read_document(path, options).and_then(|doc| {
        let output = output_path_for(path);
        write_document(&doc, &output)?;
        Ok(ConvertedFile {
            input: path.to_path_buf(),
            output,
            stats: doc.stats(),
        })
    });
    report(options, path, result.as_ref().map(|c| c.stats));
    result
}

fn read_document(path: &Path, options: &ConvertOptions) -> ConvertResult<Document> {
    let name = document_name(path)?;
    let rows = read_rows_from_path(path, &options.sheet)?;
    Ok(parse_rows(&name, &rows))
}

fn report(options: &ConvertOptions, path: &Path, result: Result<DocumentStats, &ConvertError>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    let ctx = ConversionContext {
        path: path.to_path_buf(),
        format: result.as_ref().ok().map(|s| s.format),
    };
    match result {
        Ok(stats) => obs.on_success(&ctx, stats),
        Err(e) => {
            let sev = ConversionSeverity::for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

/// List `*.xlsx` workbooks directly inside `dir`, sorted by path.
///
/// The extension match is case-insensitive. Office lock files (`~$name.xlsx`) are skipped.
pub fn discover_workbooks(dir: impl AsRef<Path>) -> ConvertResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let dir_str = dir.to_str().ok_or_else(|| ConvertError::InvalidPath {
        message: format!("directory is not valid UTF-8 ({})", dir.display()),
    })?;
    let dir_str = if dir_str.is_empty() { "." } else { dir_str };
    let pattern = format!("{}/*.{WORKBOOK_EXTENSION}", Pattern::escape(dir_str));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| ConvertError::InvalidPath {
        message: format!("bad search pattern '{pattern}': {e}"),
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::Io(e.into_error()))?;
        let is_lock_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('~'));
        if !is_lock_file && path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Convert every workbook found in `dir`.
///
/// Files are converted in parallel and independently: a failing workbook is recorded in the
/// summary and never stops the others. Only discovery or thread-pool setup errors are returned.
pub fn convert_directory(
    dir: impl AsRef<Path>,
    options: &ConvertOptions,
    batch: &BatchOptions,
) -> ConvertResult<BatchSummary> {
    let files = discover_workbooks(dir)?;
    convert_files(&files, options, batch)
}

/// Convert the given workbooks (see [`convert_directory`]).
pub fn convert_files(files: &[PathBuf], options: &ConvertOptions, batch: &BatchOptions) -> ConvertResult<BatchSummary> {
    let mut builder = ThreadPoolBuilder::new();
    if let Some(n) = batch.num_threads {
        builder = builder.num_threads(n.max(1));
    }
    let pool = builder.build()?;

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        files
            .par_iter()
            .map(|input| FileOutcome {
                input: input.clone(),
                result: convert_file_to_json(input, options),
            })
            .collect()
    });
    Ok(BatchSummary { outcomes })
}
