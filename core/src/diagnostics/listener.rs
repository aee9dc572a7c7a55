use core::fmt;

use crate::parser::Span;

/// One lexer or parser complaint, with the source range it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub span: Span,
    pub message: String,
}

impl SyntaxDiagnostic {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.0.start, self.span.0.end)
    }
}

/// Accumulates syntax diagnostics as the lexer and parser report them.
///
/// The pipeline drains the listener after each stage; anything drained is
/// fatal and evaluation never starts.
#[derive(Debug, Default)]
pub struct ErrorListener {
    diagnostics: Vec<SyntaxDiagnostic>,
}

impl ErrorListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax_error(&mut self, diagnostic: SyntaxDiagnostic) {
        tracing::debug!(%diagnostic, "syntax error");
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns the accumulated messages joined with `"; "` and resets the listener.
    ///
    /// An empty string means no errors were reported.
    pub fn drain(&mut self) -> String {
        self.drain_diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Like [`drain`](Self::drain), but keeps the spans.
    pub fn drain_diagnostics(&mut self) -> Vec<SyntaxDiagnostic> {
        core::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listener_drains_empty_string() {
        let mut listener = ErrorListener::new();
        assert!(!listener.has_errors());
        assert_eq!(listener.drain(), "");
    }

    #[test]
    fn test_messages_are_semicolon_joined() {
        let mut listener = ErrorListener::new();
        listener.syntax_error(SyntaxDiagnostic::new(Span::new(0, 1), "first"));
        listener.syntax_error(SyntaxDiagnostic::new(Span::new(2, 3), "second"));
        assert!(listener.has_errors());
        assert_eq!(listener.drain(), "first; second");
    }

    #[test]
    fn test_drain_resets() {
        let mut listener = ErrorListener::new();
        listener.syntax_error(SyntaxDiagnostic::new(Span::new(0, 1), "oops"));
        assert_eq!(listener.drain_diagnostics().len(), 1);
        assert!(!listener.has_errors());
        assert_eq!(listener.drain(), "");
    }
}
