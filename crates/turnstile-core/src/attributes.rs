//! Principal attribute values.
//!
//! Attribute resolution happens outside this crate; what arrives here is a
//! name-to-value mapping where a value is either a single scalar or a
//! collection of scalars. The tagged `AttributeValue` type makes that
//! distinction explicit, with a normalization step producing the distinct
//! value set used for matching.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// ---------------------------------------------------------------------------
// AttributeValue — single scalar or distinct collection
// ---------------------------------------------------------------------------

/// The value of one principal attribute.
///
/// All comparisons against attribute values are exact and case-sensitive;
/// no trimming, normalization, or case-folding happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A single scalar value.
    Single(String),
    /// A collection of values, held as its distinct elements.
    Multi(BTreeSet<String>),
}

impl AttributeValue {
    pub fn single(value: impl Into<String>) -> Self {
        AttributeValue::Single(value.into())
    }

    /// Builds a `Multi` value from a collection, keeping distinct elements.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Normalizes the value to its distinct-element set for matching.
    /// A `Single` value becomes a one-element set.
    pub fn distinct_values(&self) -> BTreeSet<&str> {
        match self {
            AttributeValue::Single(v) => BTreeSet::from([v.as_str()]),
            AttributeValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Single(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Single(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(vs: Vec<String>) -> Self {
        AttributeValue::from_values(vs)
    }
}

// ---------------------------------------------------------------------------
// PrincipalAttributes — per-call attribute mapping for one principal
// ---------------------------------------------------------------------------

/// The attributes resolved for an authenticated principal, supplied per
/// call and never retained. Keys are case-sensitive attribute names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAttributes(HashMap<String, AttributeValue>);

impl PrincipalAttributes {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<HashMap<String, AttributeValue>> for PrincipalAttributes {
    fn from(map: HashMap<String, AttributeValue>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for PrincipalAttributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
