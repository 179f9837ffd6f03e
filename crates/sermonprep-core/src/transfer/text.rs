//! Plain-text export and import of a single record.
//!
//! The format is one section per non-empty field:
//!
//! ```text
//! Sermon Title:
//! Easter Sermon
//!
//! Manuscript:
//! The tomb was empty.
//! ```
//!
//! A section starts at a line holding only a known field label and a colon.
//! Text before the first such line is treated as manuscript, so a bare
//! sermon text file imports as a record with just a manuscript. Body lines
//! that would read as a header are written with a leading `\`, which
//! import strips again.

use crate::dates::settle_dates;
use crate::error::{Result, SermonError};
use crate::schema::{Field, Record, RecordDraft};

const ESCAPE: char = '\\';

/// Render a record's non-empty fields as labelled sections.
pub fn export_text(record: &Record) -> String {
    let sections: Vec<String> = record
        .fields()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(field, value)| {
            let body: Vec<String> = value.trim_end().lines().map(escape_line).collect();
            format!("{}:\n{}\n", field.label(), body.join("\n"))
        })
        .collect();
    sections.join("\n")
}

/// Parse labelled sections back into record contents.
///
/// Unreadable dates are kept in research rather than failing the import.
pub fn import_text(text: &str) -> Result<RecordDraft> {
    let mut sections: Vec<(Field, Vec<&str>)> = Vec::new();
    let mut current = Field::Manuscript;
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(field) = section_header(line) {
            sections.push((current, std::mem::take(&mut lines)));
            current = field;
        } else {
            lines.push(unescape_line(line));
        }
    }
    sections.push((current, lines));

    let mut draft = RecordDraft::new();
    for (field, lines) in sections {
        let value = trim_blank_lines(&lines);
        if !value.is_empty() {
            draft.append(field, &value);
        }
    }
    settle_dates(&mut draft);

    if draft.is_empty() {
        return Err(SermonError::ImportFailed {
            message: "no content found in text".to_string(),
        });
    }

    Ok(draft)
}

fn section_header(line: &str) -> Option<Field> {
    let label = line.trim().strip_suffix(':')?;
    Field::from_label(label)
}

/// A header line, possibly already escaped any number of times.
fn is_header_form(line: &str) -> bool {
    section_header(line.trim_start_matches(ESCAPE)).is_some()
}

fn escape_line(line: &str) -> String {
    if is_header_form(line) {
        format!("{}{}", ESCAPE, line)
    } else {
        line.to_string()
    }
}

fn unescape_line(line: &str) -> &str {
    match line.strip_prefix(ESCAPE) {
        Some(rest) if is_header_form(rest) => rest,
        _ => line,
    }
}

/// Join lines, dropping leading and trailing blank lines but keeping inner ones.
fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
