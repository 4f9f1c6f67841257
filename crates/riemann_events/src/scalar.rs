use std::fmt;

use serde::{Deserialize, Serialize};

/// An interned-name-like identifier.
///
/// Carries the same text as a string but is a distinct type, so turning it into
/// a wire string is always an explicit step.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    /// Integers above `i64::MAX`, kept exact rather than narrowed to a float.
    UInt(u64),
    Float(f64),
}

impl Number {
    /// NaN and infinities have no faithful wire form.
    pub fn is_finite(self) -> bool {
        match self {
            Number::Float(v) => v.is_finite(),
            Number::Int(_) | Number::UInt(_) => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// The value an accessor on a [`SourceEvent`](crate::SourceEvent) hands back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "MaybeScalar")]
pub enum Scalar {
    Str(String),
    Symbol(Symbol),
    Number(Number),
    Bool(bool),
    #[default]
    Null,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScalarKind {
    Str,
    Symbol,
    Number,
    Bool,
    Null,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Str => "string",
            ScalarKind::Symbol => "symbol",
            ScalarKind::Number => "number",
            ScalarKind::Bool => "boolean",
            ScalarKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl Scalar {
    pub fn symbol(name: impl Into<String>) -> Self {
        Scalar::Symbol(Symbol::new(name))
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Str(_) => ScalarKind::Str,
            Scalar::Symbol(_) => ScalarKind::Symbol,
            Scalar::Number(_) => ScalarKind::Number,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Null => ScalarKind::Null,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<Symbol> for Scalar {
    fn from(value: Symbol) -> Self {
        Scalar::Symbol(value)
    }
}

impl From<Number> for Scalar {
    fn from(value: Number) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(Number::Int(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(Number::UInt(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(Number::Float(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// JSON shape of a scalar: `{"symbol": "name"}` marks a symbol, everything
/// else maps onto the matching JSON primitive.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Symbol { symbol: String },
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

#[derive(Deserialize)]
#[serde(transparent)]
struct MaybeScalar(Option<ScalarRepr>);

impl From<MaybeScalar> for Scalar {
    fn from(MaybeScalar(repr): MaybeScalar) -> Self {
        match repr {
            None => Scalar::Null,
            Some(ScalarRepr::Symbol { symbol }) => Scalar::symbol(symbol),
            Some(ScalarRepr::Str(v)) => Scalar::Str(v),
            Some(ScalarRepr::Int(v)) => Scalar::Number(Number::Int(v)),
            Some(ScalarRepr::UInt(v)) => Scalar::Number(Number::UInt(v)),
            Some(ScalarRepr::Float(v)) => Scalar::Number(Number::Float(v)),
            Some(ScalarRepr::Bool(v)) => Scalar::Bool(v),
        }
    }
}
