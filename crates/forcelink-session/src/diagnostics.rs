//! Diagnostics sinks
//!
//! Non-fatal session failures never surface as `Err`; they are handed to a
//! [`DiagnosticsSink`]. The default sink logs through `tracing`.

use forcelink_errors::{ErrorSeverity, FfbError};
use tracing::{error, warn};

/// Receives every failure a session reports.
pub trait DiagnosticsSink {
    fn report(&mut self, error: &FfbError);
}

impl<D: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut D {
    fn report(&mut self, error: &FfbError) {
        (**self).report(error);
    }
}

impl<D: DiagnosticsSink + ?Sized> DiagnosticsSink for Box<D> {
    fn report(&mut self, error: &FfbError) {
        (**self).report(error);
    }
}

/// Logs each report at a level derived from its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&mut self, error: &FfbError) {
        let code = error.native_status().map(|status| status.code());
        match error.severity() {
            ErrorSeverity::Warning => warn!(code = ?code, "{error}"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(code = ?code, severity = %error.severity(), "{error}");
            }
        }
    }
}

/// Keeps every report in memory, optionally logging it as well.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    reports: Vec<FfbError>,
    echo: bool,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also forwards each report to [`TracingDiagnostics`].
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn reports(&self) -> &[FfbError] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Number of reports matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&FfbError) -> bool) -> usize {
        self.reports.iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }

    pub fn take(&mut self) -> Vec<FfbError> {
        std::mem::take(&mut self.reports)
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn report(&mut self, error: &FfbError) {
        if self.echo {
            TracingDiagnostics.report(error);
        }
        self.reports.push(error.clone());
    }
}
