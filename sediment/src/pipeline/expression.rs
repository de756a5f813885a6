use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};

/// A value-producing expression evaluated against a document.
///
/// Evaluation yields `Option<Value>`; `None` means the expression is
/// undefined for the document (a field path that does not resolve), which
/// projection and accumulators treat differently from an explicit null.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal(Value),
    /// A field path lookup, dot paths allowed.
    Field(String),
    /// String concatenation of the parts.
    Concat(Vec<Expr>),
}

impl Expr {
    /// Creates a literal expression.
    pub fn literal<T: Into<Value>>(value: T) -> Self {
        Expr::Literal(value.into())
    }

    /// Creates a field path expression.
    pub fn field(path: &str) -> Self {
        Expr::Field(path.to_string())
    }

    /// Creates a concatenation expression.
    pub fn concat(parts: Vec<Expr>) -> Self {
        Expr::Concat(parts)
    }

    /// Evaluates the expression against a document.
    ///
    /// `Concat` yields `Null` when any part is undefined or null, and fails
    /// with [ErrorKind::TypeMismatch] when a part yields a non-string.
    pub fn evaluate(&self, doc: &Document) -> SedimentResult<Option<Value>> {
        match self {
            Expr::Literal(value) => Ok(Some(value.clone())),
            Expr::Field(path) => doc.lookup(path),
            Expr::Concat(parts) => {
                let mut joined = String::new();
                for part in parts {
                    match part.evaluate(doc)? {
                        None | Some(Value::Null) => return Ok(Some(Value::Null)),
                        Some(Value::String(s)) => joined.push_str(&s),
                        Some(other) => {
                            log::error!("concat part is not a string: {}", other);
                            return Err(SedimentError::new(
                                format!("concat part is not a string: {}", other),
                                ErrorKind::TypeMismatch,
                            ));
                        }
                    }
                }
                Ok(Some(Value::String(joined)))
            }
        }
    }
}
