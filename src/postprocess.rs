//! In-place mutations applied to fixtures after they are written.
//!
//! Each mutation reads the current file, transforms the text in memory and
//! persists the result with [`write_atomic`], so an interrupted run never
//! leaves a truncated fixture behind.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::dialect::LineEnding;
use crate::error::{FixtureError, Result};
use crate::writer::write_atomic;

/// Text edit performed on an already written fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// Put junk lines in front of the CSV content
    PrependBanner { lines: Vec<String> },
    /// Insert `text` after the first `offset` characters
    Splice { offset: usize, text: String },
    /// Append one literal record
    AppendRow { row: String },
}

impl Mutation {
    pub fn prepend_banner(lines: &[&str]) -> Self {
        Mutation::PrependBanner {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn splice(offset: usize, text: &str) -> Self {
        Mutation::Splice {
            offset,
            text: text.to_string(),
        }
    }

    pub fn append_row(row: &str) -> Self {
        Mutation::AppendRow {
            row: row.to_string(),
        }
    }

    /// Transform `content`
    ///
    /// A splice offset past the end of the content inserts at the end.
    pub fn apply(&self, content: &str, line_ending: LineEnding) -> String {
        let eol = line_ending.as_str();
        match self {
            Mutation::PrependBanner { lines } => {
                let mut out = String::with_capacity(content.len() + 64);
                for line in lines {
                    out.push_str(line);
                    out.push_str(eol);
                }
                out.push_str(content);
                out
            }
            Mutation::Splice { offset, text } => {
                let split = content
                    .char_indices()
                    .nth(*offset)
                    .map_or(content.len(), |(byte_idx, _)| byte_idx);
                let (start, end) = content.split_at(split);
                format!("{start}{text}{end}")
            }
            Mutation::AppendRow { row } => format!("{content}{row}{eol}"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Mutation::PrependBanner { lines } => format!("prepend {}-line banner", lines.len()),
            Mutation::Splice { offset, text } => format!("splice {text:?} at {offset}"),
            Mutation::AppendRow { row } => format!("append row {row:?}"),
        }
    }
}

/// Apply `mutations` in order to the file at `path`; returns the final size
pub fn apply_mutations(path: &Path, mutations: &[Mutation], line_ending: LineEnding) -> Result<usize> {
    profiling::scope!("apply_mutations");

    let mut content = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    if mutations.is_empty() {
        return Ok(content.len());
    }

    for mutation in mutations {
        content = mutation.apply(&content, line_ending);
        tracing::debug!(path = %path.display(), mutation = %mutation.describe(), "applied mutation");
    }

    write_atomic(path, content.as_bytes())?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::mutation::{BANNER, LATE_ROW, SPLICE_OFFSET, SPLICE_TEXT};
    use tempfile::TempDir;

    const CHANGING_LF: &str = "time,equal\n1,1\n2,2\n3,3\n4,4\n";
    const CHANGING_CRLF: &str = "time,equal\r\n1,1\r\n2,2\r\n3,3\r\n";

    #[test]
    fn test_banner_uses_line_ending() {
        let banner = Mutation::prepend_banner(&BANNER);

        let lf = banner.apply("time,count\n", LineEnding::Lf);
        assert_eq!(
            lf,
            "this is a custom\nheader which\nshould not\nbe parsed\ntime,count\n"
        );

        let crlf = banner.apply("x\r\n", LineEnding::Crlf);
        assert!(crlf.starts_with("this is a custom\r\nheader which\r\n"));
        assert_eq!(crlf.lines().count(), 5);
    }

    #[test]
    fn test_splice_lands_in_time_column_with_lf() {
        let splice = Mutation::splice(SPLICE_OFFSET, SPLICE_TEXT);
        let out = splice.apply(CHANGING_LF, LineEnding::Lf);
        assert_eq!(out, "time,equal\n1,1\n2,2\n3.14,3\n4,4\n");
    }

    #[test]
    fn test_splice_lands_in_equal_column_with_crlf() {
        let splice = Mutation::splice(SPLICE_OFFSET, SPLICE_TEXT);
        let out = splice.apply(CHANGING_CRLF, LineEnding::Crlf);
        assert_eq!(out, "time,equal\r\n1,1\r\n2,2.14\r\n3,3\r\n");
    }

    #[test]
    fn test_splice_past_end_appends_text() {
        let at_end = Mutation::splice(3, "!").apply("abc", LineEnding::Lf);
        assert_eq!(at_end, "abc!");

        let short =
            Mutation::splice(SPLICE_OFFSET, SPLICE_TEXT).apply("time,equal\n1,1\n", LineEnding::Lf);
        assert_eq!(short, "time,equal\n1,1\n.14");
    }

    #[test]
    fn test_append_row() {
        let out = Mutation::append_row(LATE_ROW).apply("198,198\n", LineEnding::Lf);
        assert_eq!(out, "198,198\n199,199.1\n");
    }

    #[test]
    fn test_apply_mutations_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("changing_type.csv");
        fs::write(&path, CHANGING_LF).unwrap();

        let mutations = vec![
            Mutation::splice(SPLICE_OFFSET, SPLICE_TEXT),
            Mutation::append_row("5,5"),
        ];
        let bytes = apply_mutations(&path, &mutations, LineEnding::Lf).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "time,equal\n1,1\n2,2\n3.14,3\n4,4\n5,5\n");
        assert_eq!(bytes, content.len());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = apply_mutations(&path, &[Mutation::append_row("x")], LineEnding::Lf).unwrap_err();
        assert!(matches!(err, FixtureError::PathIo { .. }));
    }
}
