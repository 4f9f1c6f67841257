use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::scalar::Scalar;
use crate::source::SourceEvent;

/// A source event decoded from one JSON object.
///
/// Scalars use the encoding described on [`Scalar`]; `{"symbol": "name"}`
/// marks a symbol. Attributes are either a JSON object or an array of
/// `[key, value]` pairs, the latter being the only way to send symbol keys.
/// Every object entry is kept in document order, repeated keys included.
/// `null` tags or attributes read as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub host: Scalar,
    pub service: Scalar,
    pub state: Scalar,
    pub description: Scalar,
    pub time: Scalar,
    pub ttl: Scalar,
    #[serde(deserialize_with = "tags_from_json")]
    pub tags: Vec<Scalar>,
    #[serde(deserialize_with = "attributes_from_json")]
    pub attributes: Vec<(Scalar, Scalar)>,
    pub key: Scalar,
    pub value: Scalar,
}

impl EventRecord {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn tags_from_json<'de, D>(deserializer: D) -> Result<Vec<Scalar>, D::Error>
where
    D: de::Deserializer<'de>,
{
    Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?.unwrap_or_default())
}

fn attributes_from_json<'de, D>(deserializer: D) -> Result<Vec<(Scalar, Scalar)>, D::Error>
where
    D: de::Deserializer<'de>,
{
    deserializer.deserialize_any(AttributesVisitor)
}

struct AttributesVisitor;

impl<'de> Visitor<'de> for AttributesVisitor {
    type Value = Vec<(Scalar, Scalar)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an array of [key, value] pairs")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(pair) = seq.next_element::<(Scalar, Scalar)>()? {
            pairs.push(pair);
        }
        Ok(pairs)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Scalar>()? {
            pairs.push((Scalar::Str(key), value));
        }
        Ok(pairs)
    }
}

impl SourceEvent for EventRecord {
    fn host(&self) -> Scalar {
        self.host.clone()
    }

    fn service(&self) -> Scalar {
        self.service.clone()
    }

    fn state(&self) -> Scalar {
        self.state.clone()
    }

    fn description(&self) -> Scalar {
        self.description.clone()
    }

    fn time(&self) -> Scalar {
        self.time.clone()
    }

    fn ttl(&self) -> Scalar {
        self.ttl.clone()
    }

    fn tags(&self) -> Vec<Scalar> {
        self.tags.clone()
    }

    fn attributes(&self) -> Vec<(Scalar, Scalar)> {
        self.attributes.clone()
    }

    fn key(&self) -> Scalar {
        self.key.clone()
    }

    fn value(&self) -> Scalar {
        self.value.clone()
    }
}
