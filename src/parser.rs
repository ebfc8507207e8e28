//! Precedence-climbing parser for boolean expressions.
//!
//! Binding strength, loosest to tightest:
//!
//! | level | operator | chains            |
//! |-------|----------|-------------------|
//! | 0     | `≡`      | [`ParseConfig`]   |
//! | 1     | `→`      | [`ParseConfig`]   |
//! | 2     | `\|`     | left              |
//! | 3     | `↓`      | [`ParseConfig`]   |
//! | 4     | `&`      | left              |
//! | 5     | `↑`      | [`ParseConfig`]   |
//! | 6     | `^`      | left              |
//!
//! `!` binds tighter than every binary operator.

use log::debug;

use crate::ast::Expr;
use crate::error::ExprError;
use crate::lexer::{Operator, Spanned, Token};

const LEVELS: [Operator; 7] = [
    Operator::Eq,
    Operator::Impl,
    Operator::Or,
    Operator::Nor,
    Operator::And,
    Operator::Nand,
    Operator::Xor,
];

/// How a chain like `A → B → C` groups.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Associativity {
    /// `(A → B) → C`
    Left,
    /// `A → (B → C)`
    #[default]
    Right,
    /// Refuse chains; the user must parenthesize.
    Reject,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ParseConfig {
    /// Grouping for chains of `≡`, `→`, `↑` and `↓`.
    pub chain: Associativity,
}

fn is_associative(op: Operator) -> bool {
    matches!(op, Operator::And | Operator::Or | Operator::Xor)
}

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    variables: &'a [String],
    config: ParseConfig,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned], variables: &'a [String], config: ParseConfig) -> Self {
        Self {
            tokens,
            pos: 0,
            variables,
            config,
        }
    }

    /// Parse the whole token stream as one expression.
    pub fn parse(mut self) -> Result<Expr, ExprError> {
        let expr = self.binary(0)?;
        if let Some(spanned) = self.peek() {
            return Err(match spanned.token {
                Token::RParen => ExprError::UnbalancedParen { pos: spanned.pos },
                _ => ExprError::UnexpectedToken {
                    found: spanned.token.to_string(),
                    pos: spanned.pos,
                },
            });
        }
        debug!("parsed {} tokens into {} nodes", self.tokens.len(), expr.size());
        Ok(expr)
    }

    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let spanned = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(spanned)
    }

    fn eat(&mut self, op: Operator) -> bool {
        match self.peek() {
            Some(Spanned { token: Token::Op(o), .. }) if *o == op => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn binary(&mut self, level: usize) -> Result<Expr, ExprError> {
        let Some(&op) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut operands = vec![self.binary(level + 1)?];
        while self.eat(op) {
            operands.push(self.binary(level + 1)?);
        }

        let associativity = if is_associative(op) || operands.len() <= 2 {
            Associativity::Left
        } else {
            self.config.chain
        };

        match associativity {
            Associativity::Left => {
                let mut operands = operands.into_iter();
                let first = operands.next().ok_or(ExprError::UnexpectedEnd)?;
                Ok(operands.fold(first, |acc, rhs| Expr::binary(op, acc, rhs)))
            }
            Associativity::Right => {
                let mut operands = operands.into_iter().rev();
                let last = operands.next().ok_or(ExprError::UnexpectedEnd)?;
                Ok(operands.fold(last, |acc, lhs| Expr::binary(op, lhs, acc)))
            }
            Associativity::Reject => Err(ExprError::AmbiguousChain { op: op.symbol() }),
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.eat(Operator::Not) {
            return Ok(Expr::not(self.unary()?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        let spanned = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match &spanned.token {
            Token::Const(value) => Ok(Expr::constant(*value)),
            Token::Var(name) => self
                .variables
                .iter()
                .position(|v| v == name)
                .map(Expr::var)
                .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
            Token::LParen => {
                let inner = self.binary(0)?;
                match self.next() {
                    Some(Spanned { token: Token::RParen, .. }) => Ok(inner),
                    _ => Err(ExprError::UnbalancedParen { pos: spanned.pos }),
                }
            }
            token => Err(ExprError::UnexpectedToken {
                found: token.to_string(),
                pos: spanned.pos,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::lexer::{tokenize, variables};

    fn parse_with(text: &str, chain: Associativity) -> Result<String, ExprError> {
        let tokens = tokenize(text)?;
        let vars = variables(&tokens);
        let expr = Parser::new(&tokens, &vars, ParseConfig { chain }).parse()?;
        Ok(expr.display(&vars).to_string())
    }

    fn parse(text: &str) -> String {
        parse_with(text, Associativity::default()).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse("A | B & C"), "(A|(B&C))");
        assert_eq!(parse("A & B ^ C"), "(A&(B^C))");
        assert_eq!(parse("A ^ B & C"), "((A^B)&C)");
        assert_eq!(parse("A | B ^ C"), "(A|(B^C))");
        assert_eq!(parse("A nand B ^ C"), "(A↑(B^C))");
        assert_eq!(parse("A -> B | C"), "(A→(B|C))");
        assert_eq!(parse("A = B -> C"), "(A≡(B→C))");
        assert_eq!(parse("!A & B"), "(!A&B)");
        assert_eq!(parse("!(A & B)"), "!(A&B)");
        assert_eq!(parse("A nand B & C"), "((A↑B)&C)");
        assert_eq!(parse("A nor B | C"), "((A↓B)|C)");
    }

    #[test]
    fn test_associative_ops_fold_left() {
        assert_eq!(parse("A & B & C"), "((A&B)&C)");
        assert_eq!(parse("A | B | C | D"), "(((A|B)|C)|D)");
        assert_eq!(parse("A ^ B ^ C"), "((A^B)^C)");
    }

    #[test]
    fn test_chain_associativity() {
        assert_eq!(parse("A -> B -> C"), "(A→(B→C))");
        assert_eq!(parse_with("A -> B -> C", Associativity::Left).unwrap(), "((A→B)→C)");
        assert_eq!(
            parse_with("A nand B nand C", Associativity::Reject),
            Err(ExprError::AmbiguousChain { op: '↑' })
        );
        // Two operands are never a chain.
        assert_eq!(parse_with("A = B", Associativity::Reject).unwrap(), "(A≡B)");
        assert_eq!(parse_with("(A → B) → C", Associativity::Reject).unwrap(), "((A→B)→C)");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_with("(A & B", Associativity::Right), Err(ExprError::UnbalancedParen { pos: 0 }));
        assert_eq!(parse_with("A & B)", Associativity::Right), Err(ExprError::UnbalancedParen { pos: 5 }));
        assert_eq!(parse_with("A &", Associativity::Right), Err(ExprError::UnexpectedEnd));
        assert!(matches!(
            parse_with("A B", Associativity::Right),
            Err(ExprError::UnexpectedToken { pos: 2, .. })
        ));
        assert!(matches!(
            parse_with("& B", Associativity::Right),
            Err(ExprError::UnexpectedToken { pos: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_variable() {
        let tokens = tokenize("A & Z").unwrap();
        let vars = vec!["A".to_string(), "B".to_string()];
        let err = Parser::new(&tokens, &vars, ParseConfig::default()).parse().unwrap_err();
        assert_eq!(err, ExprError::UnknownVariable("Z".into()));
    }
}
