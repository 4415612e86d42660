use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ast::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Recoverable; analysis continues with a best-effort type.
    Normal,
    /// Still recoverable, flagged for higher urgency by consumers.
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    AlreadyDeclared,
    NotDeclared,
    TypeMismatch,
    InvalidIndexType,
    InterfaceKeyNotIndexable,
    NotIndexable,
    DuplicateParameter,
    DuplicateMethod,
    UndefinedType,
    ConstAssignment,
    InvalidAssignmentTarget,
    MissingInitializer,
    EmptyArrayLiteral,
}

impl ErrorKind {
    /// A blocking error leaves the enclosing expression without a usable type.
    pub fn is_blocking(self) -> bool {
        matches!(self, ErrorKind::NotIndexable)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::AlreadyDeclared => "AlreadyDeclared",
            ErrorKind::NotDeclared => "NotDeclared",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::InvalidIndexType => "InvalidIndexType",
            ErrorKind::InterfaceKeyNotIndexable => "InterfaceKeyNotIndexable",
            ErrorKind::NotIndexable => "NotIndexable",
            ErrorKind::DuplicateParameter => "DuplicateParameter",
            ErrorKind::DuplicateMethod => "DuplicateMethod",
            ErrorKind::UndefinedType => "UndefinedType",
            ErrorKind::ConstAssignment => "ConstAssignment",
            ErrorKind::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorKind::MissingInitializer => "MissingInitializer",
            ErrorKind::EmptyArrayLiteral => "EmptyArrayLiteral",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub severity: Severity,
    pub file: PathBuf,
    pub span: SourceSpan,
}

impl Diagnostic {
    pub fn new<S: Into<String>>(
        kind: ErrorKind,
        severity: Severity,
        file: &Path,
        span: SourceSpan,
        message: S,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
            file: file.to_path_buf(),
            span,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

/// Kind and severity of an entry that did not fit under the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropped {
    pub kind: ErrorKind,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    dropped: Vec<Dropped>,
    limit: Option<usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Entries past `limit` are not stored, but their kind and severity are
    /// still counted by `has_errors`, `has_critical` and `has_blocking`.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            dropped: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                self.dropped.push(Dropped {
                    kind: diagnostic.kind,
                    severity: diagnostic.severity,
                });
                return;
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn push_error_with_span<S: Into<String>>(
        &mut self,
        kind: ErrorKind,
        file: &Path,
        message: S,
        span: SourceSpan,
    ) {
        self.push(Diagnostic::new(kind, Severity::Normal, file, span, message));
    }

    pub fn push_critical_with_span<S: Into<String>>(
        &mut self,
        kind: ErrorKind,
        file: &Path,
        message: S,
        span: SourceSpan,
    ) {
        self.push(Diagnostic::new(
            kind,
            Severity::Critical,
            file,
            span,
            message,
        ));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for diagnostic in other.entries {
            self.push(diagnostic);
        }
        self.dropped.extend(other.dropped);
    }

    /// True when nothing was reported, stored or dropped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.dropped.is_empty()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn has_critical(&self) -> bool {
        self.entries
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Critical)
            || self
                .dropped
                .iter()
                .any(|dropped| dropped.severity == Severity::Critical)
    }

    pub fn has_blocking(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_blocking)
            || self.dropped.iter().any(|dropped| dropped.kind.is_blocking())
    }

    pub fn dropped(&self) -> &[Dropped] {
        &self.dropped
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    /// Counts stored and dropped entries of `kind`.
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        let stored = self
            .entries
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count();
        let dropped = self
            .dropped
            .iter()
            .filter(|dropped| dropped.kind == kind)
            .count();
        stored + dropped
    }

    /// JSON array of diagnostic records for an external renderer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}
