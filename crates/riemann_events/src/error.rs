use std::fmt;

use thiserror::Error;

use crate::scalar::ScalarKind;

/// Which part of an event a value was read from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Host,
    Service,
    State,
    Description,
    Time,
    Ttl,
    Tag,
    AttributeKey,
    AttributeValue,
    Key,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Host => "host",
            Field::Service => "service",
            Field::State => "state",
            Field::Description => "description",
            Field::Time => "time",
            Field::Ttl => "ttl",
            Field::Tag => "tag",
            Field::AttributeKey => "attribute key",
            Field::AttributeValue => "attribute value",
            Field::Key => "key",
            Field::Value => "value",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum NormalizeError {
    #[error("unsupported value type for {field}: {kind}")]
    UnsupportedValue { field: Field, kind: ScalarKind },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid normalizer config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error, Clone)]
pub enum LineRecordError {
    #[error("I/O error while reading event stream")]
    Io,
    #[error("invalid UTF-8 in event stream")]
    InvalidUtf8,
    #[error("line too long (observed_bytes={observed_bytes}, max_line_bytes={max_line_bytes})")]
    LineTooLong {
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    #[error("failed to decode event: {summary}")]
    Decode { summary: String },
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

#[derive(Debug, Clone)]
pub struct LineRecord<T> {
    /// 1-based line number in the underlying reader.
    pub line_number: usize,
    pub outcome: Result<T, LineRecordError>,
}

#[derive(Debug, Error)]
pub enum ForwardError<E: std::error::Error + 'static> {
    #[error("sink rejected event from line {line_number}: {source}")]
    Sink { line_number: usize, source: E },
}
