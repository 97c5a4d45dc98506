//! In-memory column-oriented dataset.
//!
//! A [`Dataset`] is the read-only input to a resampling run. Columns are
//! either numeric or categorical; `None` marks a missing entry. Rows are
//! addressed by position, which is what the subsampler draws.
//!
//! # Example
//!
//! ```ignore
//! use sampling_dist::Dataset;
//!
//! let data = Dataset::builder()
//!     .numeric("BPXSY1", vec![Some(128.0), None, Some(119.0)])
//!     .categorical("RIAGENDR", vec![Some("Male"), Some("Female"), None])
//!     .build()?;
//! assert_eq!(data.len(), 3);
//! ```

mod encoding;

use std::collections::{BTreeSet, HashMap};

use crate::error::{DataError, SummaryError};
use crate::result::SummaryRecord;
use crate::summary::summarize_values;
use crate::types::{Record, Value};

/// Storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric values; `NaN` is never stored, missing is `None`.
    Numeric(Vec<Option<f64>>),
    /// Categorical labels.
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    /// True if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing entries.
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Numeric(v) => v[row].into(),
            ColumnData::Categorical(v) => v[row].clone().map_or(Value::Missing, Value::Category),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column values.
    pub data: ColumnData,
}

impl Column {
    /// Numeric column. `NaN` inputs are stored as missing.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|x| x.filter(|v| !v.is_nan()))
            .collect();
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Categorical column.
    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values.into_iter().map(|x| x.map(Into::into)).collect()),
        }
    }
}

/// Immutable table of named, typed columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    n_rows: usize,
}

/// Builder collecting columns before validation.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    /// Add a numeric column.
    pub fn numeric(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.columns.push(Column::numeric(name, values));
        self
    }

    /// Add a numeric column with no missing entries.
    pub fn numeric_dense(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.numeric(name, values.into_iter().map(Some).collect())
    }

    /// Add a categorical column.
    pub fn categorical<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<S>>,
    ) -> Self {
        self.columns.push(Column::categorical(name, values));
        self
    }

    /// Add a prebuilt column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Validate lengths and names.
    pub fn build(self) -> Result<Dataset, DataError> {
        let mut dataset = Dataset::default();
        for column in self.columns {
            dataset.push_column(column)?;
        }
        Ok(dataset)
    }
}

impl Dataset {
    /// Start building a dataset.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Build from row records, inferring each column's kind.
    ///
    /// Column order follows first appearance. A column absent from a record
    /// is missing in that row. Columns with only missing entries are numeric.
    pub fn from_records(records: &[Record]) -> Result<Self, DataError> {
        let mut names: Vec<&str> = Vec::new();
        let mut seen = BTreeSet::new();
        for record in records {
            for name in record.keys() {
                if seen.insert(name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }

        let mut dataset = Dataset::default();
        for name in names {
            let cells: Vec<&Value> = records
                .iter()
                .map(|r| r.get(name).unwrap_or(&Value::Missing))
                .collect();

            let has_number = cells
                .iter()
                .any(|v| matches!(v, Value::Number(_)) && !v.is_missing());
            let has_label = cells.iter().any(|v| matches!(v, Value::Category(_)));

            let column = match (has_number, has_label) {
                (true, true) => return Err(DataError::MixedColumn(name.to_string())),
                (_, false) => Column::numeric(
                    name,
                    cells
                        .iter()
                        .map(|v| match v {
                            Value::Number(x) => Some(*x),
                            _ => None,
                        })
                        .collect(),
                ),
                (false, true) => Column::categorical(
                    name,
                    cells
                        .iter()
                        .map(|v| match v {
                            Value::Category(s) => Some(s.clone()),
                            _ => None,
                        })
                        .collect(),
                ),
            };
            dataset.push_column(column)?;
        }
        // Keep row count even when records carry no columns at all.
        if dataset.columns.is_empty() {
            dataset.n_rows = records.len();
        }
        Ok(dataset)
    }

    fn push_column(&mut self, column: Column) -> Result<(), DataError> {
        if self.index.contains_key(&column.name) {
            return Err(DataError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.n_rows = column.data.len();
        } else if column.data.len() != self.n_rows {
            return Err(DataError::LengthMismatch {
                column: column.name,
                expected: self.n_rows,
                got: column.data.len(),
            });
        }
        self.index.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.index
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Values of a numeric column.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>], DataError> {
        match &self.column(name)?.data {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Categorical(_) => Err(DataError::NotNumeric(name.to_string())),
        }
    }

    /// Values of a categorical column.
    pub fn categorical(&self, name: &str) -> Result<&[Option<String>], DataError> {
        match &self.column(name)?.data {
            ColumnData::Categorical(values) => Ok(values),
            ColumnData::Numeric(_) => Err(DataError::NotCategorical(name.to_string())),
        }
    }

    /// Row `i` as a record, or `None` past the end.
    pub fn record(&self, i: usize) -> Option<Record> {
        if i >= self.n_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.data.value(i)))
                .collect(),
        )
    }

    /// Summary of the non-missing values of a numeric column.
    pub fn describe(&self, name: &str) -> Result<SummaryRecord, DescribeError> {
        let values: Vec<f64> = self.numeric(name)?.iter().flatten().copied().collect();
        Ok(summarize_values(&values)?)
    }
}

/// Failure from [`Dataset::describe`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescribeError {
    /// Column lookup failed.
    #[error(transparent)]
    Data(#[from] DataError),
    /// Column has no non-missing values.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::builder()
            .numeric("age", vec![Some(34.0), None, Some(61.0), Some(f64::NAN)])
            .categorical("sex", vec![Some("Male"), Some("Female"), None, Some("Female")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_length_mismatch() {
        let err = Dataset::builder()
            .numeric_dense("a", vec![1.0, 2.0])
            .numeric_dense("b", vec![1.0])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DataError::LengthMismatch {
                column: "b".to_string(),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_builder_rejects_duplicate() {
        let err = Dataset::builder()
            .numeric_dense("a", vec![1.0])
            .numeric_dense("a", vec![2.0])
            .build()
            .unwrap_err();
        assert_eq!(err, DataError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_nan_is_missing() {
        let data = sample();
        assert_eq!(data.numeric("age").unwrap()[3], None);
        assert_eq!(data.column("age").unwrap().data.missing_count(), 2);
    }

    #[test]
    fn test_typed_lookups() {
        let data = sample();
        assert_eq!(
            data.numeric("sex").unwrap_err(),
            DataError::NotNumeric("sex".to_string())
        );
        assert_eq!(
            data.categorical("age").unwrap_err(),
            DataError::NotCategorical("age".to_string())
        );
        assert_eq!(
            data.numeric("bmi").unwrap_err(),
            DataError::UnknownColumn("bmi".to_string())
        );
    }

    #[test]
    fn test_record_roundtrip() {
        let data = sample();
        let rec = data.record(1).unwrap();
        assert_eq!(rec["age"], Value::Missing);
        assert_eq!(rec["sex"], Value::Category("Female".to_string()));
        assert!(data.record(4).is_none());

        let records: Vec<Record> = (0..data.len()).filter_map(|i| data.record(i)).collect();
        let rebuilt = Dataset::from_records(&records).unwrap();
        assert_eq!(rebuilt.numeric("age").unwrap(), data.numeric("age").unwrap());
        assert_eq!(
            rebuilt.categorical("sex").unwrap(),
            data.categorical("sex").unwrap()
        );
    }

    #[test]
    fn test_from_records_infers_kinds() {
        let mut a = Record::new();
        a.insert("x".into(), Value::Number(1.5));
        a.insert("g".into(), "low".into());
        let mut b = Record::new();
        b.insert("x".into(), Value::Missing);
        b.insert("empty".into(), Value::Missing);

        let data = Dataset::from_records(&[a, b]).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.numeric("x").unwrap(), &[Some(1.5), None]);
        assert_eq!(
            data.categorical("g").unwrap(),
            &[Some("low".to_string()), None]
        );
        assert_eq!(data.numeric("empty").unwrap(), &[None, None]);
    }

    #[test]
    fn test_from_records_rejects_mixed() {
        let mut a = Record::new();
        a.insert("x".into(), Value::Number(1.0));
        let mut b = Record::new();
        b.insert("x".into(), "one".into());
        assert_eq!(
            Dataset::from_records(&[a, b]).unwrap_err(),
            DataError::MixedColumn("x".to_string())
        );
    }

    #[test]
    fn test_describe_skips_missing() {
        let data = sample();
        let summary = data.describe("age").unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.mean - 47.5).abs() < 1e-12);
        assert_eq!(summary.min, 34.0);
        assert_eq!(summary.max, 61.0);

        let empty = Dataset::builder()
            .numeric("x", vec![None, None])
            .build()
            .unwrap();
        assert_eq!(
            empty.describe("x").unwrap_err(),
            DescribeError::Summary(SummaryError::EmptyDistribution)
        );
    }
}
