use std::fmt::{Display, Formatter};

use crate::lexer::Operator;

/// Boolean expression tree.
///
/// Variables are indices into the variable list the expression was parsed
/// against, so evaluation is a plain slice lookup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    Const(bool),
    Var(usize),
    Not(Box<Expr>),
    Binary(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn var(index: usize) -> Self {
        Expr::Var(index)
    }

    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn binary(op: Operator, lhs: Self, rhs: Self) -> Self {
        debug_assert_ne!(op, Operator::Not);
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::binary(Operator::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::binary(Operator::Or, lhs, rhs)
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Self::binary(Operator::Xor, lhs, rhs)
    }
}

/// Apply a binary operator to two evaluated operands.
pub fn apply(op: Operator, a: bool, b: bool) -> bool {
    match op {
        Operator::And => a && b,
        Operator::Or => a || b,
        Operator::Xor => a ^ b,
        Operator::Impl => !a || b,
        Operator::Eq => a == b,
        Operator::Nand => !(a && b),
        Operator::Nor => !(a || b),
        Operator::Not => unreachable!("NOT is unary"),
    }
}

impl Expr {
    /// Evaluate with `values[i]` bound to variable `i`.
    ///
    /// # Panics
    ///
    /// Panics if a variable index is out of range for `values`.
    pub fn eval(&self, values: &[bool]) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(i) => values[*i],
            Expr::Not(inner) => !inner.eval(values),
            Expr::Binary(op, lhs, rhs) => apply(*op, lhs.eval(values), rhs.eval(values)),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Var(_) => 1,
            Expr::Not(inner) => 1 + inner.size(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }

    /// Render with the given variable names, fully parenthesized.
    pub fn display<'a>(&'a self, names: &'a [String]) -> ExprDisplay<'a> {
        ExprDisplay { expr: self, names }
    }
}

pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    names: &'a [String],
}

impl Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.expr {
            Expr::Const(value) => write!(f, "{}", *value as u8),
            Expr::Var(i) => match self.names.get(*i) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "x{}", i),
            },
            Expr::Not(inner) => write!(f, "!{}", inner.display(self.names)),
            Expr::Binary(op, lhs, rhs) => {
                write!(f, "({}{}{})", lhs.display(self.names), op, rhs.display(self.names))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval() {
        // x0 & (x1 | !x2)
        let e = Expr::and(Expr::var(0), Expr::or(Expr::var(1), Expr::not(Expr::var(2))));
        assert!(e.eval(&[true, false, false]));
        assert!(!e.eval(&[true, false, true]));
        assert!(!e.eval(&[false, true, true]));
        assert_eq!(e.size(), 6);
    }

    #[test]
    fn test_derived_operators() {
        let table = |op| {
            [(false, false), (false, true), (true, false), (true, true)]
                .iter()
                .map(|&(a, b)| apply(op, a, b))
                .collect::<Vec<_>>()
        };
        assert_eq!(table(Operator::Impl), [true, true, false, true]);
        assert_eq!(table(Operator::Eq), [true, false, false, true]);
        assert_eq!(table(Operator::Nand), [true, true, true, false]);
        assert_eq!(table(Operator::Nor), [true, false, false, false]);
        assert_eq!(table(Operator::Xor), [false, true, true, false]);
    }

    #[test]
    fn test_display() {
        let names = vec!["A".to_string(), "B".to_string()];
        let e = Expr::binary(Operator::Impl, Expr::not(Expr::var(0)), Expr::constant(true));
        assert_eq!(e.display(&names).to_string(), "(!A→1)");
        assert_eq!(Expr::xor(Expr::var(1), Expr::var(5)).display(&names).to_string(), "(B^x5)");
    }
}
