//! Tokenizer for boolean expressions.
//!
//! Every operator accepts several spellings (symbolic and textual); the lexer maps
//! them all onto one canonical [`Operator`]. Symbolic spellings are matched
//! longest-first. Textual keywords are recognized only in all-lowercase or
//! all-uppercase form; any other identifier is a variable.

use std::fmt::{Display, Formatter};

use logos::{Lexer, Logos};

use crate::error::ExprError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Xor,
    Impl,
    Eq,
    Nand,
    Nor,
}

impl Operator {
    /// Canonical single-character spelling.
    pub fn symbol(self) -> char {
        match self {
            Operator::Not => '!',
            Operator::And => '&',
            Operator::Or => '|',
            Operator::Xor => '^',
            Operator::Impl => '→',
            Operator::Eq => '≡',
            Operator::Nand => '↑',
            Operator::Nor => '↓',
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn constant(lex: &mut Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

#[derive(Logos, Debug, Clone, Eq, PartialEq)]
#[logos(skip r"\s+")]
pub enum Token {
    #[regex(r"\p{L}[\p{L}\p{N}_]*", |lex| lex.slice().to_string())]
    Var(String),

    #[regex(r"[0-9]+", constant)]
    Const(bool),

    #[token("!", |_| Operator::Not)]
    #[token("¬", |_| Operator::Not)]
    #[token("~", |_| Operator::Not)]
    #[token("not", |_| Operator::Not)]
    #[token("NOT", |_| Operator::Not)]
    #[token("&", |_| Operator::And)]
    #[token("•", |_| Operator::And)]
    #[token("∧", |_| Operator::And)]
    #[token("*", |_| Operator::And)]
    #[token("and", |_| Operator::And)]
    #[token("AND", |_| Operator::And)]
    #[token("|", |_| Operator::Or)]
    #[token("∨", |_| Operator::Or)]
    #[token("+", |_| Operator::Or)]
    #[token("or", |_| Operator::Or)]
    #[token("OR", |_| Operator::Or)]
    #[token("^", |_| Operator::Xor)]
    #[token("⊕", |_| Operator::Xor)]
    #[token("xor", |_| Operator::Xor)]
    #[token("XOR", |_| Operator::Xor)]
    #[token("->", |_| Operator::Impl)]
    #[token("=>", |_| Operator::Impl)]
    #[token("→", |_| Operator::Impl)]
    #[token("impl", |_| Operator::Impl)]
    #[token("IMPL", |_| Operator::Impl)]
    #[token("=", |_| Operator::Eq)]
    #[token("≡", |_| Operator::Eq)]
    #[token("<->", |_| Operator::Eq)]
    #[token("<=>", |_| Operator::Eq)]
    #[token("eq", |_| Operator::Eq)]
    #[token("EQ", |_| Operator::Eq)]
    #[token("↑", |_| Operator::Nand)]
    #[token("nand", |_| Operator::Nand)]
    #[token("NAND", |_| Operator::Nand)]
    #[token("↓", |_| Operator::Nor)]
    #[token("nor", |_| Operator::Nor)]
    #[token("NOR", |_| Operator::Nor)]
    Op(Operator),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Var(name) => write!(f, "{}", name),
            Token::Const(value) => write!(f, "{}", *value as u8),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub fn tokenize(text: &str) -> Result<Vec<Spanned>, ExprError> {
    let mut tokens = Vec::new();
    let mut lex = Token::lexer(text);

    while let Some(token) = lex.next() {
        let span = lex.span();
        // Spans are byte offsets; positions count characters.
        let pos = text[..span.start].chars().count();
        match token {
            Ok(token) => tokens.push(Spanned { token, pos }),
            Err(()) => {
                let slice = lex.slice();
                if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(ExprError::UnexpectedToken {
                        found: slice.to_string(),
                        pos,
                    });
                }
                let ch = slice.chars().next().unwrap_or_default();
                return Err(ExprError::UnexpectedChar { ch, pos });
            }
        }
    }

    Ok(tokens)
}

/// Rewrite an expression with canonical operator symbols and no whitespace.
pub fn normalize(text: &str) -> Result<String, ExprError> {
    let tokens = tokenize(text)?;
    let mut out = String::with_capacity(text.len());
    let mut prev_word = false;
    for Spanned { token, .. } in tokens.iter() {
        let word = matches!(token, Token::Var(_) | Token::Const(_));
        if word && prev_word {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        prev_word = word;
    }
    Ok(out)
}

/// Distinct variable names, sorted.
pub fn variables(tokens: &[Spanned]) -> Vec<String> {
    let mut vars: Vec<String> = tokens
        .iter()
        .filter_map(|t| match &t.token {
            Token::Var(name) => Some(name.clone()),
            _ => None,
        })
        .collect();
    vars.sort();
    vars.dedup();
    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(text: &str) -> Vec<Operator> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .filter_map(|t| match t.token {
                Token::Op(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_synonyms() {
        use Operator::*;
        assert_eq!(ops("a & b • c ∧ d * e and f AND g"), [And; 6]);
        assert_eq!(ops("a | b ∨ c + d or e OR f"), [Or; 5]);
        assert_eq!(ops("! ¬ ~ not NOT a"), [Not; 5]);
        assert_eq!(ops("a ^ b ⊕ c xor d XOR e"), [Xor; 4]);
        assert_eq!(ops("a -> b → c => d impl e IMPL f"), [Impl; 5]);
        assert_eq!(ops("a = b ≡ c <-> d <=> e eq f EQ g"), [Eq; 6]);
        assert_eq!(ops("a ↑ b nand c NAND d"), [Nand; 3]);
        assert_eq!(ops("a ↓ b nor c NOR d"), [Nor; 3]);
    }

    #[test]
    fn test_keyword_prefix_is_variable() {
        let tokens = tokenize("android | order").unwrap();
        assert_eq!(tokens[0].token, Token::Var("android".into()));
        assert_eq!(tokens[2].token, Token::Var("order".into()));
    }

    #[test]
    fn test_mixed_case_keyword_is_variable() {
        let tokens = tokenize("And Or").unwrap();
        assert_eq!(tokens[0].token, Token::Var("And".into()));
        assert_eq!(tokens[1].token, Token::Var("Or".into()));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("A and not B").unwrap(), "A&!B");
        assert_eq!(normalize("(x1 <=> y) -> z").unwrap(), "(x1≡y)→z");
        assert_eq!(normalize("a ∨ 1").unwrap(), "a|1");
    }

    #[test]
    fn test_variables_sorted_and_distinct() {
        let tokens = tokenize("C & A | B & A").unwrap();
        assert_eq!(variables(&tokens), ["A", "B", "C"]);
    }

    #[test]
    fn test_positions_and_errors() {
        let tokens = tokenize("A  →B").unwrap();
        assert_eq!(tokens[1].pos, 3);
        assert_eq!(tokens[2].pos, 4);
        assert_eq!(tokenize("A # B"), Err(ExprError::UnexpectedChar { ch: '#', pos: 2 }));
        assert_eq!(
            tokenize("A & 10"),
            Err(ExprError::UnexpectedToken {
                found: "10".into(),
                pos: 4
            })
        );
        assert_eq!(tokenize("¬A ? B"), Err(ExprError::UnexpectedChar { ch: '?', pos: 3 }));
    }
}
