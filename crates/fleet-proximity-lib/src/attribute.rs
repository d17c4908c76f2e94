//! Plain attribute values decoded from the typed DynamoDB wire representation.
//!
//! Stream images and point-get results both arrive as maps of typed values
//! (`{"S": "..."}`, `{"N": "..."}`, ...). The pipeline works on [`Attributes`],
//! a plain map from attribute name to [`Attribute`].
//!
//! Numbers keep their exact decimal text. Conversion to `f64` happens only when
//! a caller asks for it, so decoding itself can never round or fail.

use std::collections::BTreeMap;
use std::fmt;

use serde_dynamo::{AttributeValue, Item};

/// Decoded attribute set for one record, ordered by attribute name.
pub type Attributes = BTreeMap<String, Attribute>;

/// A decimal number stored as its exact wire text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The number exactly as it was stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse to `f64`. Precision beyond `f64` is silently dropped.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Binary(Vec<u8>),
    List(Vec<Attribute>),
    Map(Attributes),
    StringSet(Vec<String>),
    NumberSet(Vec<Number>),
    BinarySet(Vec<Vec<u8>>),
}

impl Attribute {
    /// String payload, if this is a string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Textual form of a scalar that may hold a decimal, either `S` or `N`.
    pub fn decimal_text(&self) -> Option<&str> {
        match self {
            Attribute::String(s) => Some(s.as_str()),
            Attribute::Number(n) => Some(n.as_str()),
            _ => None,
        }
    }

    /// Short name of the wire type, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Attribute::String(_) => "S",
            Attribute::Number(_) => "N",
            Attribute::Bool(_) => "BOOL",
            Attribute::Null => "NULL",
            Attribute::Binary(_) => "B",
            Attribute::List(_) => "L",
            Attribute::Map(_) => "M",
            Attribute::StringSet(_) => "SS",
            Attribute::NumberSet(_) => "NS",
            Attribute::BinarySet(_) => "BS",
        }
    }
}

impl From<AttributeValue> for Attribute {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::S(s) => Attribute::String(s),
            AttributeValue::N(n) => Attribute::Number(Number(n)),
            AttributeValue::Bool(b) => Attribute::Bool(b),
            AttributeValue::Null(_) => Attribute::Null,
            AttributeValue::B(bytes) => Attribute::Binary(bytes),
            AttributeValue::L(items) => {
                Attribute::List(items.into_iter().map(Attribute::from).collect())
            }
            AttributeValue::M(map) => Attribute::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Attribute::from(v)))
                    .collect(),
            ),
            AttributeValue::Ss(set) => Attribute::StringSet(set),
            AttributeValue::Ns(set) => Attribute::NumberSet(set.into_iter().map(Number).collect()),
            AttributeValue::Bs(set) => Attribute::BinarySet(set),
        }
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::String(value.to_string())
    }
}

/// Decode a typed stream image into plain attributes.
pub fn from_item(item: &Item) -> Attributes {
    item.iter()
        .map(|(name, value)| (name.clone(), Attribute::from(value.clone())))
        .collect()
}
