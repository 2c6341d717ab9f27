//! CSV dialects: delimiter, decimal mark, header and index options

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

/// Line terminator written after every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    pub(crate) fn terminator(self) -> csv::Terminator {
        match self {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::Crlf => csv::Terminator::CRLF,
        }
    }
}

/// Structure of one fixture file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Field separator
    pub delimiter: char,
    /// Replaces the `.` in rendered floats
    pub decimal_mark: char,
    /// Emit the column names as the first record
    pub header: bool,
    /// Prepend the zero-based row index as an unlabeled column
    pub index: bool,
    /// Record terminator, also used by the banner and appended rows
    pub line_ending: LineEnding,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_mark: '.',
            header: true,
            index: false,
            line_ending: LineEnding::Lf,
        }
    }
}

impl Dialect {
    /// Plain comma-separated dialect with the given line ending
    pub fn csv(line_ending: LineEnding) -> Self {
        Self {
            line_ending,
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_decimal_mark(mut self, decimal_mark: char) -> Self {
        self.decimal_mark = decimal_mark;
        self
    }

    pub fn with_index(mut self) -> Self {
        self.index = true;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Delimiter as the single byte the record writer expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            return Err(FixtureError::InvalidDialect(format!(
                "delimiter {:?} is not ASCII",
                self.delimiter
            )));
        }
        Ok(self.delimiter as u8)
    }

    /// Validate invariant expectations before writing
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.delimiter_byte()?;
        if matches!(delimiter, b'"' | b'\r' | b'\n') {
            return Err(FixtureError::InvalidDialect(format!(
                "delimiter {:?} collides with quoting or line breaks",
                self.delimiter
            )));
        }
        if !matches!(self.decimal_mark, '.' | ',') {
            return Err(FixtureError::InvalidDialect(format!(
                "decimal mark must be '.' or ',', got {:?}",
                self.decimal_mark
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect_is_plain_csv() {
        let dialect = Dialect::default();
        assert_eq!(dialect.delimiter_byte().unwrap(), b',');
        assert!(dialect.header);
        assert!(!dialect.index);
        assert!(dialect.validate().is_ok());
    }

    #[test]
    fn test_period_delimiter_is_allowed() {
        // dotsep.csv shares the delimiter with the decimal mark
        let dialect = Dialect::default().with_delimiter('.');
        assert!(dialect.validate().is_ok());
    }

    #[test]
    fn test_invalid_dialects_are_rejected() {
        assert!(Dialect::default().with_delimiter('"').validate().is_err());
        assert!(Dialect::default().with_delimiter('§').validate().is_err());
        assert!(Dialect::default().with_decimal_mark(';').validate().is_err());
    }

    #[test]
    fn test_line_ending_serde_names() {
        assert_eq!(serde_json::to_string(&LineEnding::Crlf).unwrap(), "\"crlf\"");
        let parsed: LineEnding = serde_json::from_str("\"lf\"").unwrap();
        assert_eq!(parsed, LineEnding::Lf);
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
    }
}
