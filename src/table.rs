use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::ExprError;
use crate::expr::{assignment, BooleanExpression};

/// Largest variable count a truth table is generated for.
pub const MAX_VARIABLES: usize = 16;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Row {
    pub inputs: Vec<bool>,
    pub output: bool,
}

/// All `2^n` assignments of a function, in big-endian order over `variables`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl TruthTable {
    pub fn generate(expr: &BooleanExpression) -> Result<Self, ExprError> {
        let n = expr.num_variables();
        check_size(n)?;
        let rows = (0..1usize << n)
            .map(|i| {
                let inputs = assignment(i, n);
                let output = expr.evaluate(&inputs);
                Row { inputs, output }
            })
            .collect();
        debug!("generated truth table for '{}' with {} rows", expr, 1usize << n);
        Ok(Self {
            variables: expr.variables().to_vec(),
            rows,
        })
    }

    /// Build a table from its output column, `outputs[i]` being the value at row `i`.
    pub fn from_outputs(variables: Vec<String>, outputs: &[bool]) -> Result<Self, ExprError> {
        let n = variables.len();
        check_size(n)?;
        if outputs.len() != 1 << n {
            return Err(ExprError::TableSize {
                expected: 1 << n,
                found: outputs.len(),
            });
        }
        let rows = outputs
            .iter()
            .enumerate()
            .map(|(i, &output)| Row {
                inputs: assignment(i, n),
                output,
            })
            .collect();
        Ok(Self { variables, rows })
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn outputs(&self) -> Vec<bool> {
        self.rows.iter().map(|r| r.output).collect()
    }

    /// Rows where the function is true.
    pub fn minterms(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.output)
    }

    /// Rows where the function is false.
    pub fn maxterms(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.output)
    }

    /// Inputs of a row keyed by variable name.
    pub fn row_map(&self, row: &Row) -> BTreeMap<String, bool> {
        self.variables.iter().cloned().zip(row.inputs.iter().copied()).collect()
    }

    pub fn records(&self) -> Vec<RowRecord> {
        self.rows
            .iter()
            .map(|row| RowRecord {
                inputs: self.row_map(row),
                output: row.output,
            })
            .collect()
    }
}

fn check_size(n: usize) -> Result<(), ExprError> {
    if n > MAX_VARIABLES {
        return Err(ExprError::TooManyVariables {
            count: n,
            max: MAX_VARIABLES,
        });
    }
    Ok(())
}

/// Serialized form of a row: `{"inputs": {"A": true, ...}, "output": false}`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RowRecord {
    pub inputs: BTreeMap<String, bool>,
    pub output: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_table() {
        let e = BooleanExpression::parse("A & B").unwrap();
        let table = TruthTable::generate(&e).unwrap();
        assert_eq!(table.len(), 4);
        let inputs: Vec<_> = table.rows().iter().map(|r| r.inputs.clone()).collect();
        assert_eq!(
            inputs,
            [vec![false, false], vec![false, true], vec![true, false], vec![true, true]]
        );
        assert_eq!(table.outputs(), [false, false, false, true]);
        assert_eq!(table.minterms().count(), 1);
        assert_eq!(table.maxterms().count(), 3);
    }

    #[test]
    fn test_rows_are_unique() {
        let e = BooleanExpression::parse("a ^ b ^ c ^ d").unwrap();
        let table = TruthTable::generate(&e).unwrap();
        let mut seen: Vec<_> = table.rows().iter().map(|r| r.inputs.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_too_many_variables() {
        let text = (0..17).map(|i| format!("x{:02}", i)).collect::<Vec<_>>().join(" | ");
        let e = BooleanExpression::parse(&text).unwrap();
        assert_eq!(
            TruthTable::generate(&e),
            Err(ExprError::TooManyVariables { count: 17, max: 16 })
        );
    }

    #[test]
    fn test_from_outputs() {
        let table = TruthTable::from_outputs(vec!["P".into()], &[true, false]).unwrap();
        assert_eq!(table.rows()[0].inputs, [false]);
        assert!(table.rows()[0].output);
        assert_eq!(
            TruthTable::from_outputs(vec!["P".into()], &[true]),
            Err(ExprError::TableSize { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_records() {
        let e = BooleanExpression::parse("B | A").unwrap();
        let table = TruthTable::generate(&e).unwrap();
        let record = &table.records()[2];
        assert!(record.inputs["A"]);
        assert!(!record.inputs["B"]);
        assert!(record.output);
    }
}
