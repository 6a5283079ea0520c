//! Ariadne rendering of suppressions.

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use cth_common::{Span, Suppression};

fn to_range(span: Span, source_len: usize) -> Range<usize> {
    let start = (span.start as usize).min(source_len);
    let end = (span.end as usize).min(source_len).max(start);
    // Ariadne needs at least one character to point at.
    if start == end {
        start..(end + 1).min(source_len)
    } else {
        start..end
    }
}

/// Render `suppression` against the text of the file it was reported in.
pub fn render_suppression(suppression: &Suppression, source: &str, color: bool) -> io::Result<String> {
    let descriptor = &suppression.descriptor;
    let diagnostic = &suppression.diagnostic;
    let range = to_range(diagnostic.location.span, source.len());

    let mut report = Report::build(ReportKind::Advice, range.clone())
        .with_code(descriptor.id)
        .with_message(format!("suppressed {}", diagnostic.id))
        .with_config(Config::default().with_color(color))
        .with_label(
            Label::new(range)
                .with_message(descriptor.justification)
                .with_color(Color::Green),
        );
    if !diagnostic.message.is_empty() {
        report = report.with_note(format!("{}: {}", diagnostic.id, diagnostic.message));
    }

    let mut buf = Vec::new();
    report.finish().write(Source::from(source), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
