//! Statistics evaluated on one group of a trial.
//!
//! A [`Statistic`] maps a [`Group`] (a set of dataset rows) to one number.
//! Built-ins are [`Mean`] and [`PearsonCorrelation`]; any closure
//! `Fn(&Group) -> Result<f64, StatisticError> + Sync` also qualifies.

use crate::constants::MIN_CORRELATION_CASES;
use crate::dataset::Dataset;
use crate::error::StatisticError;
use crate::statistics::{Welford, WelfordCovariance};

/// A subset of dataset rows, borrowed from the dataset.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Group<'a> {
    /// Group of the given row positions.
    ///
    /// # Panics
    ///
    /// Panics if any row is out of range.
    pub fn new(dataset: &'a Dataset, rows: Vec<usize>) -> Self {
        assert!(
            rows.iter().all(|&r| r < dataset.len()),
            "Group row out of range"
        );
        Self { dataset, rows }
    }

    /// The dataset rows are drawn from.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row positions in draw order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the group has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a numeric column for this group's rows, missing as `None`.
    pub fn numeric<'s>(
        &'s self,
        column: &str,
    ) -> Result<impl Iterator<Item = Option<f64>> + 's, StatisticError> {
        let values: &'s [Option<f64>] = self.dataset.numeric(column)?;
        Ok(self.rows.iter().map(move |&r| values[r]))
    }
}

/// A pure function from a group to a real number.
pub trait Statistic: Sync {
    /// Display name, e.g. `mean(BMXBMI)`.
    fn name(&self) -> String;

    /// Numeric columns this statistic reads. Checked before a run starts.
    fn columns(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Evaluate on one group.
    fn evaluate(&self, group: &Group<'_>) -> Result<f64, StatisticError>;
}

impl<F> Statistic for F
where
    F: Fn(&Group<'_>) -> Result<f64, StatisticError> + Sync,
{
    fn name(&self) -> String {
        "custom".to_string()
    }

    fn evaluate(&self, group: &Group<'_>) -> Result<f64, StatisticError> {
        self(group)
    }
}

/// Mean of the non-missing values of a column (list-wise exclusion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mean {
    column: String,
}

impl Mean {
    /// Mean of `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Statistic for Mean {
    fn name(&self) -> String {
        format!("mean({})", self.column)
    }

    fn columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn evaluate(&self, group: &Group<'_>) -> Result<f64, StatisticError> {
        let acc: Welford = group.numeric(&self.column)?.flatten().collect();
        if acc.count() == 0 {
            return Err(StatisticError::EmptyStatisticInput {
                column: self.column.clone(),
                required: 1,
                found: 0,
            });
        }
        Ok(acc.mean())
    }
}

/// Pearson correlation over pairwise complete cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PearsonCorrelation {
    a: String,
    b: String,
}

impl PearsonCorrelation {
    /// Correlation between columns `a` and `b`.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

impl Statistic for PearsonCorrelation {
    fn name(&self) -> String {
        format!("corr({}, {})", self.a, self.b)
    }

    fn columns(&self) -> Vec<&str> {
        vec![self.a.as_str(), self.b.as_str()]
    }

    fn evaluate(&self, group: &Group<'_>) -> Result<f64, StatisticError> {
        let mut acc = WelfordCovariance::new();
        for (x, y) in group.numeric(&self.a)?.zip(group.numeric(&self.b)?) {
            if let (Some(x), Some(y)) = (x, y) {
                acc.update(x, y);
            }
        }

        if acc.count() < MIN_CORRELATION_CASES {
            return Err(StatisticError::EmptyStatisticInput {
                column: format!("{}, {}", self.a, self.b),
                required: MIN_CORRELATION_CASES,
                found: acc.count(),
            });
        }

        acc.correlation().ok_or_else(|| {
            let column = if acc.x().sum_sq_dev() <= 0.0 {
                &self.a
            } else {
                &self.b
            };
            StatisticError::DegenerateVariance {
                column: column.clone(),
            }
        })
    }
}
