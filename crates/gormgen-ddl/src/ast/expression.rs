//! Expression AST types.
//!
//! Column defaults and `ON UPDATE` values are the only expressions a DDL
//! statement needs to expose in structured form; anything richer is kept as
//! source text.

use core::fmt;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Blob literal.
    Blob(Vec<u8>),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl fmt::Display for Literal {
    /// Prints the value the way MySQL reports it in
    /// `information_schema.COLUMNS.COLUMN_DEFAULT`: strings unquoted,
    /// booleans as `1`/`0`, NULL as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Blob(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02X}")?;
                }
                Ok(())
            }
            Self::Boolean(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Null => Ok(()),
        }
    }
}

/// A function call, or a bare niladic function such as `CURRENT_TIMESTAMP`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name, as written.
    pub name: String,
    /// Arguments.
    pub args: Vec<Expr>,
}

/// A default / `ON UPDATE` expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value, including a signed number (`-1`).
    Literal(Literal),
    /// Function call.
    Function(FunctionCall),
    /// Any other expression, kept as source text (e.g. `(uuid() + 1)`).
    Raw(String),
}

impl Expr {
    /// Returns the function name if this is a function call.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function(call) => Some(&call.name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Integer(-3).to_string(), "-3");
        assert_eq!(Literal::Float(0.5).to_string(), "0.5");
        assert_eq!(Literal::String(String::from("abc")).to_string(), "abc");
        assert_eq!(Literal::Boolean(true).to_string(), "1");
        assert_eq!(Literal::Boolean(false).to_string(), "0");
        assert_eq!(Literal::Null.to_string(), "");
        assert_eq!(Literal::Blob(vec![0xAB, 0x01]).to_string(), "0xAB01");
    }

    #[test]
    fn test_function_name() {
        let now = Expr::Function(FunctionCall {
            name: String::from("CURRENT_TIMESTAMP"),
            args: vec![],
        });
        assert_eq!(now.function_name(), Some("CURRENT_TIMESTAMP"));
        assert_eq!(Expr::Literal(Literal::Null).function_name(), None);
        assert_eq!(Expr::Raw(String::from("(1 + 1)")).function_name(), None);
    }
}
