//! Error rendering using ariadne
//!
//! Compilation errors are drawn as annotated source snippets. Errors without
//! a source location are written as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use exprkit::{Engine, EngineOptions, Dynamic, render_error};
///
/// let engine = Engine::<(), Dynamic>::new(EngineOptions::default(), |_| Ok(())).unwrap();
///
/// if let Err(e) = engine.compile("1 + + 2") {
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
        Error::Compilation {
            diagnostics,
            source,
        } => render_diagnostics(source, diagnostics, writer, use_color),
        other => writeln!(writer, "{}", other),
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(
                Config::default()
                    .with_color(use_color)
                    .with_index_type(IndexType::Byte),
            );

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        report = report.with_label(
            Label::new((SOURCE_ID, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(colors.next()),
        );

        for help_msg in &diag.help {
            report = report.with_help(help_msg);
        }

        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}
