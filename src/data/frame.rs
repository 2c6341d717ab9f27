use polars::prelude::*;

use crate::error::{FixtureError, Result};

/// Ordered column-name -> series mapping that materializes into a DataFrame
///
/// Adding a column whose name is already present replaces the earlier values
/// but keeps the earlier position.
#[derive(Debug, Default, Clone)]
pub struct FrameBuilder {
    columns: Vec<Series>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, series: Series) -> Self {
        match self
            .columns
            .iter_mut()
            .find(|existing| existing.name() == series.name())
        {
            Some(existing) => *existing = series,
            None => self.columns.push(series),
        }
        self
    }

    pub fn build(self) -> Result<DataFrame> {
        if let Some(first) = self.columns.first() {
            let expected = first.len();
            if let Some(bad) = self.columns.iter().find(|s| s.len() != expected) {
                return Err(FixtureError::ShapeMismatch {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        let columns: Vec<Column> = self.columns.into_iter().map(Column::from).collect();
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::{elementwise_product, row_counter};

    #[test]
    fn test_columns_keep_insertion_order() {
        let df = FrameBuilder::new()
            .column(row_counter("time", 3))
            .column(row_counter("equal", 3))
            .build()
            .unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["time", "equal"]);
    }

    #[test]
    fn test_duplicate_name_collapses_to_last_values() {
        let counter = row_counter("count", 5);
        let squares = elementwise_product(&counter, &counter, "count").unwrap();
        let df = FrameBuilder::new()
            .column(row_counter("timestamp", 5))
            .column(counter)
            .column(squares)
            .build()
            .unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["timestamp", "count"]);
        let count = df.column("count").unwrap().as_materialized_series().clone();
        assert_eq!(count.i64().unwrap().get(4), Some(16));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let result = FrameBuilder::new()
            .column(row_counter("a", 3))
            .column(row_counter("b", 4))
            .build();
        assert!(matches!(
            result,
            Err(FixtureError::ShapeMismatch { expected: 3, actual: 4, .. })
        ));
    }
}
