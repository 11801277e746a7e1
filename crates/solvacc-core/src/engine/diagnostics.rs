use super::error::SasaError;
use std::fmt;
use std::panic::Location;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A structured report of a recoverable problem encountered during an operation.
///
/// The location is captured with `#[track_caller]` at construction, so it names the line that
/// detected the problem rather than the line that formatted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub operation: &'static str,
    pub message: String,
    pub location: &'static Location<'static>,
}

impl Diagnostic {
    #[track_caller]
    pub fn warning(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            operation,
            message: message.into(),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn error(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            operation,
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// Sends the diagnostic to the installed `tracing` subscriber and returns it unchanged.
    pub fn emit(self) -> Self {
        match self.severity {
            Severity::Warning => warn!(
                operation = self.operation,
                file = self.location.file(),
                line = self.location.line(),
                "{}",
                self.message
            ),
            Severity::Error => error!(
                operation = self.operation,
                file = self.location.file(),
                line = self.location.line(),
                "{}",
                self.message
            ),
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "{} in {} ({}:{}): {}",
            level,
            self.operation,
            self.location.file(),
            self.location.line(),
            self.message
        )
    }
}

/// Logs `error` as an error diagnostic of `operation` and hands it back for propagation.
#[track_caller]
pub(crate) fn report(operation: &'static str, error: SasaError) -> SasaError {
    Diagnostic::error(operation, error.to_string()).emit();
    error
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
}

/// A successful value together with any warnings raised while producing it.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warning(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            warnings: vec![diagnostic],
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Diagnostic>) -> Self {
        Self { value, warnings }
    }

    pub fn status(&self) -> Status {
        if self.warnings.is_empty() {
            Status::Success
        } else {
            Status::Warning
        }
    }

    pub fn is_success(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_capture_the_calling_line() {
        let line = line!() + 1;
        let diagnostic = Diagnostic::warning("test", "something odd");
        assert_eq!(diagnostic.location.line(), line);
        assert!(diagnostic.location.file().ends_with("diagnostics.rs"));
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(Diagnostic::error("test", "bad").severity, Severity::Error);
    }

    #[test]
    fn display_includes_operation_and_message() {
        let diagnostic = Diagnostic::warning("relative_subarea", "no reference for XYZ");
        let text = diagnostic.to_string();
        assert!(text.starts_with("warning in relative_subarea ("));
        assert!(text.ends_with("no reference for XYZ"));
    }

    #[test]
    fn status_follows_warnings() {
        let ok = Outcome::success(1);
        assert_eq!(ok.status(), Status::Success);
        assert!(ok.is_success());

        let warned = Outcome::warning(2, Diagnostic::warning("test", "w"));
        assert_eq!(warned.status(), Status::Warning);

        let mapped = warned.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.status(), Status::Warning);

        let (value, warnings) = mapped.into_parts();
        assert_eq!(value, 20);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn report_returns_the_error_unchanged() {
        let error = report("test", SasaError::InvalidInput("bad radius".to_string()));
        assert!(matches!(error, SasaError::InvalidInput(message) if message == "bad radius"));
    }

    #[test]
    fn emit_returns_the_diagnostic_unchanged() {
        let diagnostic = Diagnostic::warning("test", "emitted");
        assert_eq!(diagnostic.clone().emit(), diagnostic);
    }
}
