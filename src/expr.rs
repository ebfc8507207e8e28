use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::debug;

use crate::ast::Expr;
use crate::error::ExprError;
use crate::lexer::{normalize, tokenize, variables, Spanned};
use crate::parser::{ParseConfig, Parser};

/// A parsed boolean expression over an ordered list of variables.
#[derive(Debug, Clone)]
pub struct BooleanExpression {
    source: String,
    normalized: String,
    variables: Vec<String>,
    tree: Expr,
}

// Constructors
impl BooleanExpression {
    /// Parse `text`; its variables are the distinct identifiers it uses, sorted.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        Self::parse_with(text, ParseConfig::default())
    }

    pub fn parse_with(text: &str, config: ParseConfig) -> Result<Self, ExprError> {
        let tokens = tokenize(text)?;
        let vars = variables(&tokens);
        if vars.is_empty() {
            return Err(ExprError::NoVariables);
        }
        Self::build(text, &tokens, vars, config)
    }

    /// Parse `text` over a caller-chosen variable list.
    ///
    /// The expression may use any subset of `vars` (including none, as with the
    /// constants `0` and `1`); a name outside the list is an error.
    pub fn with_variables(text: &str, vars: &[String]) -> Result<Self, ExprError> {
        Self::with_variables_and_config(text, vars, ParseConfig::default())
    }

    pub fn with_variables_and_config(text: &str, vars: &[String], config: ParseConfig) -> Result<Self, ExprError> {
        let tokens = tokenize(text)?;
        Self::build(text, &tokens, vars.to_vec(), config)
    }

    fn build(
        text: &str,
        tokens: &[Spanned],
        variables: Vec<String>,
        config: ParseConfig,
    ) -> Result<Self, ExprError> {
        let tree = Parser::new(tokens, &variables, config).parse()?;
        let normalized = normalize(text)?;
        debug!("parsed '{}' over {:?}", normalized, variables);
        Ok(Self {
            source: text.to_string(),
            normalized,
            variables,
            tree,
        })
    }
}

// Getters
impl BooleanExpression {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expression with canonical operator symbols.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }
}

impl BooleanExpression {
    /// Evaluate with `values[i]` bound to `variables()[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is shorter than the variable list.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        assert!(
            values.len() >= self.variables.len(),
            "expected {} values, got {}",
            self.variables.len(),
            values.len()
        );
        self.tree.eval(values)
    }

    /// Evaluate row `index` of the big-endian enumeration: the first variable is
    /// the most significant bit.
    pub fn evaluate_index(&self, index: usize) -> bool {
        self.evaluate(&assignment(index, self.variables.len()))
    }

    pub fn evaluate_named(&self, values: &BTreeMap<String, bool>) -> Result<bool, ExprError> {
        let values = self
            .variables
            .iter()
            .map(|v| values.get(v).copied().ok_or_else(|| ExprError::UnknownVariable(v.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.tree.eval(&values))
    }
}

/// Big-endian assignment for row `index` over `n` variables.
pub fn assignment(index: usize, n: usize) -> Vec<bool> {
    (0..n).map(|j| (index >> (n - 1 - j)) & 1 == 1).collect()
}

impl Display for BooleanExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_parse_extracts_sorted_variables() {
        let e = BooleanExpression::parse("C or A and not B").unwrap();
        assert_eq!(e.variables(), ["A", "B", "C"]);
        assert_eq!(e.normalized(), "C|A&!B");
        assert_eq!(e.source(), "C or A and not B");
    }

    #[test]
    fn test_no_variables() {
        assert_eq!(BooleanExpression::parse("1 & 0").unwrap_err(), ExprError::NoVariables);
        assert_eq!(BooleanExpression::parse("   ").unwrap_err(), ExprError::NoVariables);
    }

    #[test]
    fn test_with_variables_allows_constants() {
        let vars = vec!["A".to_string(), "B".to_string()];
        let e = BooleanExpression::with_variables("0", &vars).unwrap();
        assert!(!e.evaluate(&[true, true]));
        let e = BooleanExpression::with_variables("B", &vars).unwrap();
        assert!(e.evaluate(&[false, true]));
        assert!(matches!(
            BooleanExpression::with_variables("C", &vars),
            Err(ExprError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_evaluate_index_is_big_endian() {
        let e = BooleanExpression::parse("A & !B").unwrap();
        let outputs: Vec<_> = (0..4).map(|i| e.evaluate_index(i)).collect();
        assert_eq!(outputs, [false, false, true, false]);
        assert_eq!(assignment(2, 2), [true, false]);
        assert_eq!(assignment(1, 3), [false, false, true]);
    }

    #[test]
    fn test_evaluate_named() {
        let e = BooleanExpression::parse("A -> B").unwrap();
        let mut values = BTreeMap::new();
        values.insert("A".to_string(), true);
        assert_eq!(e.evaluate_named(&values), Err(ExprError::UnknownVariable("B".into())));
        values.insert("B".to_string(), false);
        assert_eq!(e.evaluate_named(&values), Ok(false));
    }
}
