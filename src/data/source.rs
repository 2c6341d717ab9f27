use polars::prelude::*;
use std::path::Path;

use crate::dialect::Dialect;

/// Read a generated fixture back through polars the way a CSV consumer would
///
/// `skip_rows` drops leading junk lines (custom header banners) before the
/// header is parsed.
pub fn read_fixture(path: &Path, dialect: &Dialect, skip_rows: usize) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(dialect.header)
        .with_separator(dialect.delimiter as u8)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(Some(100))
        .with_try_parse_dates(true)
        .finish()?
        .collect()
}

/// Column dtypes in frame order
pub fn column_dtypes(df: &DataFrame) -> Vec<DataType> {
    df.get_columns().iter().map(|c| c.dtype().clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_reads_back_numeric_types() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "time,count").unwrap();
        writeln!(file, "1.0,0").unwrap();
        writeln!(file, "1.5,1").unwrap();
        file.flush().unwrap();

        let df = read_fixture(file.path(), &Dialect::default(), 0).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(column_dtypes(&df), vec![DataType::Float64, DataType::Int64]);
    }

    #[test]
    fn test_skip_rows_drops_banner() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "junk line").unwrap();
        writeln!(file, "time,count").unwrap();
        writeln!(file, "1.0,0").unwrap();
        file.flush().unwrap();

        let df = read_fixture(file.path(), &Dialect::default(), 1).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["time", "count"]);
    }
}
