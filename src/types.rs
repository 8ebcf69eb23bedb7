use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default location the console returns to after any filter-state change.
pub const MANAGE_PATH: &str = "/ace/manage";

/// Page size bounds accepted by `set_page_size`.
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Opaque identifier of one alert row. Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(id: impl Into<String>) -> Self {
        AlertId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        AlertId(s.to_string())
    }
}

impl From<String> for AlertId {
    fn from(s: String) -> Self {
        AlertId(s)
    }
}

/// Comma-join identifiers, the wire convention for single-field submission.
pub fn join_ids(ids: &[AlertId]) -> String {
    ids.iter()
        .map(AlertId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// One entry contributed by a filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    /// Compound row, e.g. an observable type/value pair
    List(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Scalar(s.to_string())
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Filter name to the ordered entries of every row with that name.
///
/// Names keep the order in which they were first seen; entries keep row
/// order. The server displays filters in this order after the round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMapping {
    entries: Vec<(String, Vec<FilterValue>)>,
}

impl FilterMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values list for `name`, created empty on first use.
    pub fn values_mut(&mut self, name: &str) -> &mut Vec<FilterValue> {
        let pos = match self.entries.iter().position(|(n, _)| n == name) {
            Some(pos) => pos,
            None => {
                self.entries.push((name.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    pub fn push(&mut self, name: &str, value: FilterValue) {
        self.values_mut(name).push(value);
    }

    pub fn get(&self, name: &str) -> Option<&[FilterValue]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FilterValue])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for FilterMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilterMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = FilterMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of filter names to value lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = FilterMapping::new();
                while let Some((name, values)) = access.next_entry::<String, Vec<FilterValue>>()? {
                    mapping.values_mut(&name).extend(values);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Payload of the `add_filter` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAddition {
    pub name: String,
    pub values: Vec<FilterValue>,
}
