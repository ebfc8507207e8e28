use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to tokenize, parse or evaluate a boolean expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("No variables found in expression")]
    NoVariables,

    #[error("Too many variables: {count} (at most {max} are supported)")]
    TooManyVariables { count: usize, max: usize },

    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected token '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unbalanced parenthesis at position {pos}")]
    UnbalancedParen { pos: usize },

    #[error("Chained '{op}' is ambiguous; parenthesize it or pick an associativity")]
    AmbiguousChain { op: char },

    #[error("Truth table needs {expected} outputs, got {found}")]
    TableSize { expected: usize, found: usize },

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown component type: {0}")]
    UnknownComponentKind(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Component '{component}' has no pin '{pin}'")]
    MissingPin { component: String, pin: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Expression error: {0}")]
    Expression(#[from] ExprError),

    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingPin {
            component: "comp_0".into(),
            pin: "in7".into(),
        };
        assert_eq!(err.to_string(), "Component 'comp_0' has no pin 'in7'");
    }

    #[test]
    fn test_expr_error_wraps() {
        let err: Error = ExprError::NoVariables.into();
        assert!(matches!(err, Error::Expression(ExprError::NoVariables)));
        assert!(err.to_string().contains("No variables"));
    }
}
