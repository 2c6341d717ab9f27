//! Frame -> delimited text serialization and atomic persistence.
//!
//! Cells are rendered column-major into strings, then emitted row by row
//! through a `csv::Writer` configured from the [`Dialect`]. Quoting is
//! minimal: a field is quoted only when it contains the delimiter, a quote
//! or a line break, which is what keeps `dotsep.csv` parseable.

use chrono::{DateTime, NaiveDateTime, Timelike};
use polars::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::constants::datetime::{ISO_FORMAT, ISO_FORMAT_MICROS};
use crate::dialect::Dialect;
use crate::error::{FixtureError, Result};

/// Shortest round-trip float text with a mandatory fractional part
///
/// Plain notation in `[1e-4, 1e16)`, exponent notation with an explicit sign
/// and at least two exponent digits outside it (`1e-05`, `1.5e+16`). NaN
/// renders empty.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// ISO-8601 with a `T` separator; microseconds only when non-zero
pub fn format_datetime(value: NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format(ISO_FORMAT).to_string()
    } else {
        value.format(ISO_FORMAT_MICROS).to_string()
    }
}

fn apply_decimal_mark(text: String, decimal_mark: char) -> String {
    if decimal_mark == '.' {
        text
    } else {
        text.replacen('.', &decimal_mark.to_string(), 1)
    }
}

fn datetime_from_physical(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    dt.map(|dt| dt.naive_utc())
}

/// Render one column's cells as text
pub fn render_column(series: &Series, decimal_mark: char) -> Result<Vec<String>> {
    let dtype = series.dtype();

    if let DataType::Datetime(unit, _) = dtype {
        let unit = *unit;
        return Ok(series
            .datetime()?
            .into_iter()
            .map(|opt| {
                opt.and_then(|ts| datetime_from_physical(ts, unit))
                    .map(format_datetime)
                    .unwrap_or_default()
            })
            .collect());
    }

    if dtype.is_float() {
        let as_f64 = series.cast(&DataType::Float64)?;
        return Ok(as_f64
            .f64()?
            .into_iter()
            .map(|opt| {
                opt.map(|v| apply_decimal_mark(format_float(v), decimal_mark))
                    .unwrap_or_default()
            })
            .collect());
    }

    if dtype.is_integer() {
        let as_i64 = series.cast(&DataType::Int64)?;
        return Ok(as_i64
            .i64()?
            .into_iter()
            .map(|opt| opt.map(|v| v.to_string()).unwrap_or_default())
            .collect());
    }

    if let Ok(strings) = series.str() {
        return Ok(strings
            .into_iter()
            .map(|opt| opt.unwrap_or("").to_string())
            .collect());
    }

    Err(FixtureError::UnsupportedColumn {
        column: series.name().to_string(),
        dtype: dtype.to_string(),
    })
}

/// Serialize a frame into the bytes of one fixture file
pub fn render_frame(df: &DataFrame, dialect: &Dialect) -> Result<Vec<u8>> {
    profiling::scope!("render_frame");
    dialect.validate()?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(dialect.delimiter_byte()?)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(dialect.line_ending.terminator())
        .from_writer(Vec::new());

    if dialect.header {
        let mut header: Vec<String> = Vec::with_capacity(df.width() + 1);
        if dialect.index {
            header.push(String::new());
        }
        header.extend(df.get_column_names().iter().map(|s| s.to_string()));
        writer.write_record(&header)?;
    }

    // Extract all columns once (column-major)
    let columns: Vec<Vec<String>> = df
        .get_columns()
        .iter()
        .map(|c| render_column(c.as_materialized_series(), dialect.decimal_mark))
        .collect::<Result<_>>()?;

    for row_idx in 0..df.height() {
        let index = row_idx.to_string();
        let mut record: Vec<&str> = Vec::with_capacity(columns.len() + 1);
        if dialect.index {
            record.push(&index);
        }
        record.extend(columns.iter().map(|col| col[row_idx].as_str()));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|err| FixtureError::Csv(csv::Error::from(err.into_error())))
}

/// Replace `path` with `bytes` via a temporary file in the same directory
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FixtureError::io(parent, e))?;
    temp.write_all(bytes).map_err(|e| FixtureError::io(path, e))?;
    temp.flush().map_err(|e| FixtureError::io(path, e))?;
    temp.persist(path).map_err(|e| FixtureError::io(path, e.error))?;
    Ok(())
}
