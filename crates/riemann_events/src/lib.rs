#![forbid(unsafe_code)]
//! Normalization of loosely-typed telemetry events into Riemann wire events.
//!
//! Upstream producers hand over anything implementing [`SourceEvent`], whose
//! accessors may answer with strings, symbols, numbers or nothing at all. The
//! [`EventNormalizer`] turns that into a [`WireEvent`] in which every present
//! field is a plain string or number:
//! - Attributes become ordered `(String, String)` pairs.
//! - Symbols become their name; strings pass through; absent stays absent.
//! - Values with no textual rule are refused, never guessed at.
//!
//! [`EventIngestor`] and [`forward`] wire a newline-delimited JSON stream to an
//! [`EventSink`] for callers that have no event source of their own.

mod config;
mod error;
mod ingest;
mod normalize;
mod reader;
mod record;
mod scalar;
mod sink;
mod source;
mod wire;

pub use config::{NormalizeConfig, ScalarPolicy};
pub use error::{ConfigError, Field, ForwardError, LineRecord, LineRecordError, NormalizeError};
pub use ingest::EventIngestor;
pub use normalize::{normalize_attributes, normalize_event, EventNormalizer};
pub use record::EventRecord;
pub use scalar::{Number, Scalar, ScalarKind, Symbol};
pub use sink::{forward, EventSink, ForwardStats};
pub use source::SourceEvent;
pub use wire::{Attribute, WireEvent};
