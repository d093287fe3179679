//! Loosely-typed source records and the array boundary check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, json_type_name};
use crate::fields::{FieldChain, first_non_empty};

/// One row from an upstream source, as an open field-name to value mapping.
///
/// Upstream schemas disagree on field naming, so logical fields are read
/// through a [`FieldChain`] rather than by a fixed name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps an existing JSON object.
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw value stored under `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Resolves a logical field: the first non-empty candidate in chain order.
    pub fn lookup(&self, chain: &FieldChain) -> Option<&Value> {
        first_non_empty(self, chain)
    }

    /// Returns the underlying map.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Converts a JSON value into a record array, failing fast on shape errors.
///
/// This is the only place the engine rejects input: `value` must be an array
/// and each element an object. `what` names the collection in the error.
pub fn records_from_value(value: &Value, what: &'static str) -> Result<Vec<RawRecord>, Error> {
    let Value::Array(items) = value else {
        return Err(Error::NotAnArray {
            what,
            found: json_type_name(value),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(RawRecord(map.clone())),
            other => Err(Error::NotAnObject {
                what,
                index,
                found: json_type_name(other),
            }),
        })
        .collect()
}
