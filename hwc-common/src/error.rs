//! Error handling for the HWC compiler
//!
//! Building syntax-tree nodes never fails; the errors here come from the
//! surfaces around the tree: loading it, storing it, and checking its
//! structure before handing it to later stages.

use crate::node_path::NodePath;
use std::fmt;
use thiserror::Error;

/// Main compiler error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Malformed syntax tree: {message}")]
    MalformedTree { message: String },

    #[error("Structural error at {path}: {message}")]
    StructuralError { path: NodePath, message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CompilerError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            CompilerError::IoError {
                message: err.to_string(),
            }
        } else {
            CompilerError::MalformedTree {
                message: err.to_string(),
            }
        }
    }
}

impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}

/// A structural error attached to a node in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub path: NodePath,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, path: NodePath) -> Self {
        Self {
            message,
            path,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}: {}", self.path, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        Ok(())
    }
}

impl From<Diagnostic> for CompilerError {
    fn from(diagnostic: Diagnostic) -> Self {
        CompilerError::StructuralError {
            path: diagnostic.path,
            message: diagnostic.message,
        }
    }
}

/// Collects diagnostics produced while checking a tree
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-built diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report an error with no notes
    pub fn error(&mut self, message: String, path: NodePath) {
        self.report(Diagnostic::error(message, path));
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// First reported diagnostic, if any, as a compiler error
    pub fn first_error(&self) -> Option<CompilerError> {
        self.diagnostics.first().cloned().map(CompilerError::from)
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.error_count() {
            0 => "No errors".to_string(),
            1 => "1 error".to_string(),
            n => format!("{} errors", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_path() -> NodePath {
        NodePath::root().field("items").index(1)
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("Test error".to_string(), some_path());
        assert_eq!(format!("{}", diag), "error: unit.items[1]: Test error");

        let noted = diag.with_note("declared here".to_string());
        assert_eq!(
            format!("{}", noted),
            "error: unit.items[1]: Test error\n  note: declared here"
        );
    }

    #[test]
    fn test_error_reporter() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);
        assert!(reporter.first_error().is_none());

        reporter.error("Test error".to_string(), some_path());
        reporter.report(Diagnostic::error("Later error".to_string(), NodePath::root()));
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 2);
        assert_eq!(
            reporter.first_error(),
            Some(CompilerError::StructuralError {
                path: some_path(),
                message: "Test error".to_string(),
            })
        );
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors");

        reporter.error("Error 1".to_string(), some_path());
        assert_eq!(reporter.summary(), "1 error");

        reporter.error("Error 2".to_string(), some_path());
        assert_eq!(reporter.summary(), "2 errors");
    }

    #[test]
    fn test_json_error_is_malformed_tree() {
        let err = serde_json::from_str::<Vec<i32>>("[1, 2").unwrap_err();
        assert!(matches!(
            CompilerError::from(err),
            CompilerError::MalformedTree { .. }
        ));
    }
}
