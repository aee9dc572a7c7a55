//! Error rendering using ariadne
//!
//! Syntax errors are drawn against the expression source, with a label on
//! each diagnostic's span. Prepass and evaluation errors have no span and
//! render as a single line.

use crate::{Error, SyntaxDiagnostic};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use dimexpr::{Engine, render_error};
///
/// if let Err(e) = Engine::default().compile("1 + ") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Syntax {
            source,
            diagnostics,
        } => render_diagnostics(source, diagnostics, writer, use_color),
        Error::Check(err) => writeln!(writer, "Error: invalid expression: {}", err),
        Error::Eval(err) => writeln!(writer, "Error: evaluation failed: {}", err),
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[SyntaxDiagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let span = label_span(source, diag);
        let report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
            .with_message("Syntax error")
            .with_config(ariadne::Config::default().with_color(use_color))
            .with_label(
                Label::new((SOURCE_ID, span))
                    .with_message(&diag.message)
                    .with_color(colors.next()),
            );

        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

/// Widens an empty span to the character under it, so the label has
/// something to point at.
fn label_span(source: &str, diag: &SyntaxDiagnostic) -> std::ops::Range<usize> {
    let span = diag.span.0.clone();
    if !span.is_empty() {
        return span;
    }
    let width = source[span.start..].chars().next().map_or(0, char::len_utf8);
    span.start..span.start + width
}
