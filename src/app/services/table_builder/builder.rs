//! Cartesian product expansion and alignment with the DATA block
//!
//! PX serializes DATA with the first STUB dimension varying slowest and the
//! last HEADING dimension varying fastest. Row `i` of the product therefore
//! pairs with token `i`.

use super::recode::RecodeRules;
use crate::app::models::{DataRow, DataTable};
use crate::{Error, Result};
use tracing::debug;

/// Number of cells described by a set of dimensions, `None` when it
/// does not fit in `usize`
pub fn expected_rows(members: &[Vec<String>]) -> Option<usize> {
    if members.iter().any(Vec::is_empty) {
        return Some(0);
    }
    members
        .iter()
        .try_fold(1usize, |acc, dimension| acc.checked_mul(dimension.len()))
}

/// Odometer over member indices, last dimension fastest
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    members: &'a [Vec<String>],
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> CartesianProduct<'a> {
    pub fn new(members: &'a [Vec<String>]) -> Self {
        Self {
            members,
            indices: vec![0; members.len()],
            exhausted: members.iter().any(Vec::is_empty),
        }
    }
}

impl<'a> Iterator for CartesianProduct<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let members = self.members;
        let tuple = self
            .indices
            .iter()
            .zip(members)
            .map(|(&index, dimension)| dimension[index].as_str())
            .collect();

        // advance the odometer
        self.exhausted = true;
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < members[position].len() {
                self.exhausted = false;
                break;
            }
            self.indices[position] = 0;
        }

        Some(tuple)
    }
}

/// Builds data tables from dimensions and DATA tokens
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rules: RecodeRules,
}

impl TableBuilder {
    pub fn new(rules: RecodeRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RecodeRules {
        &self.rules
    }

    /// Pair every member tuple with its DATA token, recoding missing markers
    pub fn build<S: AsRef<str>>(
        &self,
        names: &[String],
        members: &[Vec<String>],
        tokens: &[S],
    ) -> Result<DataTable> {
        if names.len() != members.len() {
            return Err(Error::format(format!(
                "{} dimension names but {} member lists",
                names.len(),
                members.len()
            )));
        }

        let expected = expected_rows(members).unwrap_or(usize::MAX);
        if expected != tokens.len() {
            return Err(Error::misaligned_data(expected, tokens.len()));
        }

        let rows: Vec<DataRow> = CartesianProduct::new(members)
            .zip(tokens)
            .map(|(tuple, token)| DataRow {
                members: tuple.into_iter().map(str::to_string).collect(),
                value: self.rules.recode(token.as_ref()),
            })
            .collect();

        debug!(
            "Built table with {} rows across {} dimensions",
            rows.len(),
            names.len()
        );

        Ok(DataTable {
            dimension_names: names.to_vec(),
            rows,
        })
    }
}
