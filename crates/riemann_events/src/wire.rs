use serde::Serialize;

use crate::scalar::Number;

/// A single Riemann attribute; both halves are plain strings.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Strictly-typed event handed to the transport.
///
/// Every present field is a plain string or number. Absent fields stay `None`
/// and are skipped when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WireEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Number>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "metric", skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
}

impl WireEvent {
    /// Attribute pairs as borrowed tuples, in wire order.
    pub fn attribute_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|attr| (attr.key.as_str(), attr.value.as_str()))
    }
}
