//! Canonical forms of a boolean function: PDNF, PCNF and the Zhegalkin
//! polynomial (algebraic normal form).
//!
//! Text produced here uses the canonical operator symbols and can be parsed back
//! with [`BooleanExpression::with_variables`] over the same variable list:
//!
//! - PDNF: `(A&!B) | (!A&B)`, or `0` when the function is never true.
//! - PCNF: `(A|B) & (!A|!B)`, or `1` when the function is never false.
//! - Zhegalkin: `A&B ⊕ A ⊕ 1`, or `0` for the zero function.

use log::debug;
use serde::Serialize;

use crate::error::ExprError;
use crate::expr::BooleanExpression;
use crate::parser::ParseConfig;
use crate::table::{Row, RowRecord, TruthTable};

fn literal(name: &str, positive: bool) -> String {
    if positive {
        name.to_string()
    } else {
        format!("!{}", name)
    }
}

fn term(variables: &[String], row: &Row, op: char, negate_true: bool) -> String {
    let literals: Vec<String> = variables
        .iter()
        .zip(row.inputs.iter())
        .map(|(name, &value)| literal(name, value != negate_true))
        .collect();
    format!("({})", literals.join(&op.to_string()))
}

/// Perfect disjunctive normal form: one AND-term per true row.
pub fn pdnf(table: &TruthTable) -> String {
    if table.variables().is_empty() {
        return constant(table.minterms().next().is_some());
    }
    let terms: Vec<String> = table
        .minterms()
        .map(|row| term(table.variables(), row, '&', false))
        .collect();
    if terms.is_empty() {
        return "0".to_string();
    }
    terms.join(" | ")
}

/// Perfect conjunctive normal form: one OR-clause per false row.
pub fn pcnf(table: &TruthTable) -> String {
    if table.variables().is_empty() {
        return constant(table.maxterms().next().is_none());
    }
    let clauses: Vec<String> = table
        .maxterms()
        .map(|row| term(table.variables(), row, '|', true))
        .collect();
    if clauses.is_empty() {
        return "1".to_string();
    }
    clauses.join(" & ")
}

fn constant(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Coefficients of the Zhegalkin polynomial, indexed by monomial.
///
/// Row 0 of the XOR triangle is the output column; row `k + 1` holds the XOR of
/// adjacent entries of row `k`. Coefficient `i` is the first entry of row `i`.
pub fn zhegalkin_coefficients(table: &TruthTable) -> Vec<bool> {
    let mut row = table.outputs();
    let mut coefficients = Vec::with_capacity(row.len());
    while let Some(&first) = row.first() {
        coefficients.push(first);
        row = row.windows(2).map(|w| w[0] ^ w[1]).collect();
    }
    coefficients
}

/// Variables taking part in monomial `index`.
///
/// Bit weights are big-endian, like the truth table rows: variable `j` of `n` has
/// weight `2^(n-1-j)`.
pub fn monomial(variables: &[String], index: usize) -> Vec<&str> {
    let n = variables.len();
    (0..n)
        .filter(|&j| (index >> (n - 1 - j)) & 1 == 1)
        .map(|j| variables[j].as_str())
        .collect()
}

/// Render the polynomial as text that parses back to the same function.
///
/// `^` binds tighter than `&`, so a product of several variables is parenthesized
/// whenever it is one term among many.
pub fn zhegalkin(table: &TruthTable) -> String {
    let monomials: Vec<Vec<&str>> = zhegalkin_coefficients(table)
        .into_iter()
        .enumerate()
        .filter(|&(_, c)| c)
        .map(|(i, _)| monomial(table.variables(), i))
        .collect();
    let single = monomials.len() == 1;
    let terms: Vec<String> = monomials
        .into_iter()
        .map(|vars| match vars.len() {
            0 => "1".to_string(),
            1 => vars[0].to_string(),
            _ if single => vars.join("&"),
            _ => format!("({})", vars.join("&")),
        })
        .collect();
    if terms.is_empty() {
        return "0".to_string();
    }
    terms.join(" ⊕ ")
}

/// Everything derived from one expression.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub expression: String,
    pub variables: Vec<String>,
    pub truth_table: Vec<RowRecord>,
    pub pdnf: String,
    pub pcnf: String,
    pub zhegalkin: String,
}

impl Analysis {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn analyze(text: &str) -> Result<Analysis, ExprError> {
    analyze_with(text, ParseConfig::default())
}

pub fn analyze_with(text: &str, config: ParseConfig) -> Result<Analysis, ExprError> {
    let expr = BooleanExpression::parse_with(text, config)?;
    let table = TruthTable::generate(&expr)?;
    let analysis = Analysis {
        expression: expr.normalized().to_string(),
        variables: expr.variables().to_vec(),
        truth_table: table.records(),
        pdnf: pdnf(&table),
        pcnf: pcnf(&table),
        zhegalkin: zhegalkin(&table),
    };
    debug!("analyze('{}'): pdnf = {}", text, analysis.pdnf);
    Ok(analysis)
}
