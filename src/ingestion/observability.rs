use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConvertError;
use crate::types::{DocumentStats, SheetFormat};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the file was not converted).
    Error,
    /// Critical error (typically I/O failures).
    Critical,
}

impl ConversionSeverity {
    /// Severity of a failed conversion.
    pub fn for_error(e: &ConvertError) -> Self {
        match e {
            ConvertError::Io(_) => Self::Critical,
            ConvertError::Excel(err) => {
                // Workbook errors often wrap IO (missing file, unreadable archive).
                if error_chain_contains_io(err) {
                    Self::Critical
                } else {
                    Self::Error
                }
            }
            ConvertError::Json(_)
            | ConvertError::ThreadPool(_)
            | ConvertError::MissingWorksheet { .. }
            | ConvertError::InvalidPath { .. } => Self::Error,
        }
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// Context about one conversion attempt.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    /// The workbook being converted.
    pub path: PathBuf,
    /// Detected layout, once parsing got that far.
    pub format: Option<SheetFormat>,
}

/// Observer interface for conversion outcomes.
pub trait ConversionObserver: Send + Sync {
    /// Called when a workbook was parsed successfully.
    fn on_success(&self, _ctx: &ConversionContext, _stats: DocumentStats) {}

    /// Called when a workbook failed to convert.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: ConversionSeverity, _error: &ConvertError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: DocumentStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Per-file log on stderr, one line per event, keyed by the workbook's file name.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn success_line(ctx: &ConversionContext, stats: DocumentStats) -> String {
        format!("[tagsheet] {}: {stats}", file_label(&ctx.path))
    }

    fn failure_line(ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) -> String {
        format!("[tagsheet][{severity:?}] {}: {error}", file_label(&ctx.path))
    }
}

impl ConversionObserver for StdErrObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: DocumentStats) {
        eprintln!("{}", Self::success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        eprintln!("{}", Self::failure_line(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        eprintln!("[ALERT]{}", Self::failure_line(ctx, severity, error));
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: DocumentStats) {
        self.append_line(&format!(
            "{} ok path={} {}",
            unix_ts(),
            ctx.path.display(),
            stats
        ));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.append_line(&format!(
            "{} fail severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
