//! Categorical recoding and indicator (dummy) encoding.
//!
//! Used when preparing design matrices for regression: numeric survey codes
//! are mapped to readable labels, then each non-reference level becomes a
//! 0/1 indicator column named `column[T.level]`.

use std::collections::{BTreeSet, HashSet};

use super::{Column, Dataset};
use crate::error::DataError;

impl Dataset {
    /// Sorted distinct non-missing labels of a categorical column.
    pub fn levels(&self, column: &str) -> Result<Vec<String>, DataError> {
        let levels: BTreeSet<&String> = self.categorical(column)?.iter().flatten().collect();
        Ok(levels.into_iter().cloned().collect())
    }

    /// Map numeric codes of `column` to labels, appending the result as
    /// categorical column `new_name`.
    ///
    /// Codes without a mapping entry become missing.
    pub fn recode(
        &mut self,
        column: &str,
        mapping: &[(f64, &str)],
        new_name: &str,
    ) -> Result<(), DataError> {
        let recoded: Vec<Option<String>> = self
            .numeric(column)?
            .iter()
            .map(|value| {
                let code = (*value)?;
                mapping
                    .iter()
                    .find(|(k, _)| *k == code)
                    .map(|(_, label)| label.to_string())
            })
            .collect();
        self.push_column(Column::categorical(new_name, recoded))
    }

    /// Append one indicator column per non-reference level of `column`.
    ///
    /// `reference` defaults to the first level in sorted order. Missing
    /// source entries stay missing in every indicator. Returns the names of
    /// the new columns in level order.
    pub fn dummy_encode(
        &mut self,
        column: &str,
        reference: Option<&str>,
    ) -> Result<Vec<String>, DataError> {
        let levels = self.levels(column)?;
        let reference = match reference {
            Some(level) if levels.iter().any(|l| l == level) => level.to_string(),
            Some(level) => {
                return Err(DataError::UnknownLevel {
                    column: column.to_string(),
                    level: level.to_string(),
                })
            }
            None => match levels.first() {
                Some(first) => first.clone(),
                None => return Ok(Vec::new()),
            },
        };

        let source = self.categorical(column)?;
        let indicators: Vec<Column> = levels
            .iter()
            .filter(|l| **l != reference)
            .map(|level| {
                let indicator = source
                    .iter()
                    .map(|v| v.as_ref().map(|s| if s == level { 1.0 } else { 0.0 }))
                    .collect();
                Column::numeric(format!("{column}[T.{level}]"), indicator)
            })
            .collect();

        // Check every name before appending any column.
        let mut seen = HashSet::with_capacity(indicators.len());
        for indicator in &indicators {
            if self.index.contains_key(&indicator.name) || !seen.insert(indicator.name.as_str()) {
                return Err(DataError::DuplicateColumn(indicator.name.clone()));
            }
        }

        let names = indicators.iter().map(|c| c.name.clone()).collect();
        for indicator in indicators {
            self.push_column(indicator)?;
        }
        Ok(names)
    }
}
