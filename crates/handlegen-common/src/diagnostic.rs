//! Diagnostic reporting for header parsing and generation.
//!
//! Diagnostics carry a byte span into a header file. The driver attaches the
//! header text when it turns one into a `miette::Report`.

use crate::source::SourceFile;
use crate::span::Span;
use miette::{Diagnostic as MietteDiagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Debug, Clone, Error, MietteDiagnostic)]
#[error("{message}")]
pub struct Diagnostic {
    pub message: String,
    #[label("{label}")]
    pub span: Option<SourceSpan>,
    pub label: String,
    #[help]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            label: String::new(),
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Turn into a report that renders the offending header lines.
    pub fn into_report(self, source: &SourceFile) -> Report {
        Report::new(self).with_source_code(NamedSource::new(source.name(), source.content.clone()))
    }
}
