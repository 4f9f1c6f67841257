use tracing::debug;

use crate::config::{NormalizeConfig, ScalarPolicy};
use crate::error::{Field, NormalizeError};
use crate::scalar::{Number, Scalar};
use crate::source::SourceEvent;
use crate::wire::{Attribute, WireEvent};

/// Converts source events into [`WireEvent`]s.
///
/// Holds only its configuration, so a single instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventNormalizer {
    policy: ScalarPolicy,
}

impl EventNormalizer {
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            policy: config.scalar_policy,
        }
    }

    pub fn with_policy(policy: ScalarPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScalarPolicy {
        self.policy
    }

    /// Turns every key and value into its textual form, one pair per input
    /// pair, in input order.
    pub fn normalize_attributes<I, K, V>(
        &self,
        attributes: I,
    ) -> Result<Vec<Attribute>, NormalizeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Scalar>,
        V: Into<Scalar>,
    {
        attributes
            .into_iter()
            .map(|(key, value)| {
                Ok(Attribute {
                    key: self.attribute_text(key.into(), Field::AttributeKey)?,
                    value: self.attribute_text(value.into(), Field::AttributeValue)?,
                })
            })
            .collect()
    }

    pub fn normalize_event<E>(&self, event: &E) -> Result<WireEvent, NormalizeError>
    where
        E: SourceEvent + ?Sized,
    {
        let tags = event
            .tags()
            .into_iter()
            .map(|tag| match self.text(tag, Field::Tag)? {
                Some(tag) => Ok(tag),
                None => Err(unsupported(Field::Tag, &Scalar::Null)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let wire = WireEvent {
            host: self.text(event.host(), Field::Host)?,
            service: self.text(event.service(), Field::Service)?,
            state: self.text(event.state(), Field::State)?,
            description: self.text(event.description(), Field::Description)?,
            time: number(event.time(), Field::Time)?,
            ttl: number(event.ttl(), Field::Ttl)?,
            tags,
            attributes: self.normalize_attributes(event.attributes())?,
            key: name(event.key(), Field::Key)?,
            value: number(event.value(), Field::Value)?,
        };

        debug!(
            host = wire.host.as_deref(),
            service = wire.service.as_deref(),
            attributes = wire.attributes.len(),
            tags = wire.tags.len(),
            "normalized event"
        );
        Ok(wire)
    }

    fn attribute_text(&self, scalar: Scalar, field: Field) -> Result<String, NormalizeError> {
        match self.text(scalar, field)? {
            Some(text) => Ok(text),
            None => Err(unsupported(field, &Scalar::Null)),
        }
    }

    /// Textual form of a string-typed field; `Null` stays absent.
    fn text(&self, scalar: Scalar, field: Field) -> Result<Option<String>, NormalizeError> {
        let kind = scalar.kind();
        match scalar {
            Scalar::Str(s) => Ok(Some(s)),
            Scalar::Symbol(sym) => Ok(Some(sym.into_string())),
            Scalar::Null => Ok(None),
            Scalar::Number(n) if !n.is_finite() => {
                Err(NormalizeError::UnsupportedValue { field, kind })
            }
            Scalar::Number(_) | Scalar::Bool(_) if self.policy == ScalarPolicy::Strict => {
                Err(NormalizeError::UnsupportedValue { field, kind })
            }
            Scalar::Number(n) => Ok(Some(n.to_string())),
            Scalar::Bool(b) => Ok(Some(b.to_string())),
        }
    }
}

/// Text-only fields: strings and symbols, never numbers regardless of policy.
fn name(scalar: Scalar, field: Field) -> Result<Option<String>, NormalizeError> {
    match scalar {
        Scalar::Str(s) => Ok(Some(s)),
        Scalar::Symbol(sym) => Ok(Some(sym.into_string())),
        Scalar::Null => Ok(None),
        other => Err(unsupported(field, &other)),
    }
}

/// Numeric fields pass through untouched; anything else breaks the source
/// contract.
fn number(scalar: Scalar, field: Field) -> Result<Option<Number>, NormalizeError> {
    match scalar {
        Scalar::Number(n) if n.is_finite() => Ok(Some(n)),
        Scalar::Null => Ok(None),
        other => Err(unsupported(field, &other)),
    }
}

fn unsupported(field: Field, scalar: &Scalar) -> NormalizeError {
    NormalizeError::UnsupportedValue {
        field,
        kind: scalar.kind(),
    }
}

/// [`EventNormalizer::normalize_attributes`] with the default policy.
pub fn normalize_attributes<I, K, V>(attributes: I) -> Result<Vec<Attribute>, NormalizeError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Scalar>,
    V: Into<Scalar>,
{
    EventNormalizer::default().normalize_attributes(attributes)
}

/// [`EventNormalizer::normalize_event`] with the default policy.
pub fn normalize_event<E>(event: &E) -> Result<WireEvent, NormalizeError>
where
    E: SourceEvent + ?Sized,
{
    EventNormalizer::default().normalize_event(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{ScalarKind, Symbol};

    #[test]
    fn canonical_policy_renders_numbers_and_booleans() {
        let attrs = normalize_attributes([
            (Scalar::from("count"), Scalar::from(42_i64)),
            (Scalar::from("ratio"), Scalar::from(1.5)),
            (Scalar::Bool(true), Scalar::from("flag")),
        ])
        .unwrap();
        assert_eq!(
            attrs,
            vec![
                Attribute::new("count", "42"),
                Attribute::new("ratio", "1.5"),
                Attribute::new("true", "flag"),
            ]
        );
    }

    #[test]
    fn strict_policy_refuses_numbers() {
        let normalizer = EventNormalizer::with_policy(ScalarPolicy::Strict);
        let err = normalizer
            .normalize_attributes([("count", 42_i64)])
            .unwrap_err();
        assert_eq!(
            err,
            NormalizeError::UnsupportedValue {
                field: Field::AttributeValue,
                kind: ScalarKind::Number,
            }
        );
    }

    #[test]
    fn strict_policy_still_accepts_symbols() {
        let normalizer = EventNormalizer::with_policy(ScalarPolicy::Strict);
        let attrs = normalizer
            .normalize_attributes([(Symbol::new("env"), "prod")])
            .unwrap();
        assert_eq!(attrs, vec![Attribute::new("env", "prod")]);
    }

    #[test]
    fn null_attribute_key_is_refused() {
        let err = normalize_attributes([(Scalar::Null, Scalar::from("v"))]).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::UnsupportedValue {
                field: Field::AttributeKey,
                kind: ScalarKind::Null,
            }
        );
    }

    #[test]
    fn non_finite_floats_are_refused_as_text() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = normalize_attributes([("x", value)]).unwrap_err();
            assert_eq!(
                err,
                NormalizeError::UnsupportedValue {
                    field: Field::AttributeValue,
                    kind: ScalarKind::Number,
                }
            );
        }
    }

    #[test]
    fn non_finite_floats_are_refused_as_numbers() {
        assert_eq!(
            number(Scalar::from(f64::NAN), Field::Value),
            Err(NormalizeError::UnsupportedValue {
                field: Field::Value,
                kind: ScalarKind::Number,
            })
        );
        assert_eq!(
            number(Scalar::from(f64::INFINITY), Field::Time),
            Err(NormalizeError::UnsupportedValue {
                field: Field::Time,
                kind: ScalarKind::Number,
            })
        );
        assert_eq!(
            number(Scalar::from(u64::MAX), Field::Time),
            Ok(Some(Number::UInt(u64::MAX)))
        );
    }

    #[test]
    fn key_accepts_only_strings_and_symbols() {
        assert_eq!(
            name(Scalar::symbol("api.latency"), Field::Key),
            Ok(Some("api.latency".to_string()))
        );
        assert_eq!(name(Scalar::Null, Field::Key), Ok(None));
        assert_eq!(
            name(Scalar::from(42_i64), Field::Key),
            Err(NormalizeError::UnsupportedValue {
                field: Field::Key,
                kind: ScalarKind::Number,
            })
        );
    }

    #[test]
    fn numeric_fields_reject_text() {
        assert_eq!(
            number(Scalar::from(7_i64), Field::Ttl),
            Ok(Some(Number::Int(7)))
        );
        assert_eq!(number(Scalar::Null, Field::Ttl), Ok(None));
        assert_eq!(
            number(Scalar::symbol("soon"), Field::Time),
            Err(NormalizeError::UnsupportedValue {
                field: Field::Time,
                kind: ScalarKind::Symbol,
            })
        );
    }
}
