//! Classified error types shared by the converter and the evaluator.

use crate::Span;
use thiserror::Error;

/// An evaluation or conversion failure.
///
/// Every failure carries a kind and, where the converter attached one, a
/// source location. All errors are terminal for the operation in which they
/// occur; the host decides whether to retry or substitute a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PsError {
    /// The document failed to parse, or was empty.
    #[error("syntax error in {filename}: {message}")]
    Syntax {
        filename: String,
        message: String,
        span: Option<Span>,
    },
    /// Unbound name, or missing mapping key on path traversal.
    #[error("reference error: {message}")]
    Reference { message: String, span: Option<Span> },
    /// A value of the wrong kind where a specific kind was required.
    #[error("type error: {message}")]
    Type { message: String, span: Option<Span> },
}

impl PsError {
    /// Create a syntax error for the given file.
    pub fn syntax(filename: impl Into<String>, message: impl Into<String>, span: Option<Span>) -> Self {
        Self::Syntax {
            filename: filename.into(),
            message: message.into(),
            span,
        }
    }

    /// Create a reference error.
    pub fn reference(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::Reference {
            message: message.into(),
            span,
        }
    }

    /// Create a type error.
    pub fn type_error(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::Type {
            message: message.into(),
            span,
        }
    }

    /// The source location this error was attributed to, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } | Self::Reference { span, .. } | Self::Type { span, .. } => {
                *span
            }
        }
    }
}

/// Result alias used throughout the PS crates.
pub type PsResult<T> = Result<T, PsError>;
