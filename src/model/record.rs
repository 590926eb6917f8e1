//! Date record types produced by record assembly.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One structured fact, e.g. a single submission deadline.
///
/// Either field may be empty: a name without a date yet, or a date that
/// arrived with no open name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Label of the entry (e.g. "Abstract submission")
    pub name: String,

    /// Date value as reported by the extraction service
    pub date: String,
}

impl Record {
    /// Create a record.
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }

    /// A record opened by a name, waiting for its date.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    /// A record holding only a date.
    pub fn dated(date: impl Into<String>) -> Self {
        Self::new("", date)
    }

    /// Whether the record still has no date.
    pub fn is_open(&self) -> bool {
        self.date.is_empty()
    }
}

/// Records sharing one date-type label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateGroup {
    /// Date-type label (key with its trailing "Name" stripped)
    pub date_type: String,

    /// Records in input order
    pub records: Vec<Record>,
}

/// Date-type groups in order of first appearance.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateGroups {
    groups: Vec<DateGroup>,
}

impl DateGroups {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the records of a date-type.
    pub fn get(&self, date_type: &str) -> Option<&[Record]> {
        self.groups
            .iter()
            .find(|g| g.date_type == date_type)
            .map(|g| g.records.as_slice())
    }

    /// Get the records of a date-type, creating an empty group on first sight.
    pub fn entry(&mut self, date_type: &str) -> &mut Vec<Record> {
        let index = match self.groups.iter().position(|g| g.date_type == date_type) {
            Some(index) => index,
            None => {
                self.groups.push(DateGroup {
                    date_type: date_type.to_string(),
                    records: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].records
    }

    /// Date-type labels in first-seen order.
    pub fn date_types(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.date_type.as_str())
    }

    /// Iterate over groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, DateGroup> {
        self.groups.iter()
    }

    /// Number of date-types.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no date-types.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

impl<'a> IntoIterator for &'a DateGroups {
    type Item = &'a DateGroup;
    type IntoIter = std::slice::Iter<'a, DateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for DateGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.date_type, &group.records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DateGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = DateGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from date-type to a list of records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = DateGroups::new();
                while let Some((date_type, records)) = access.next_entry::<String, Vec<Record>>()? {
                    groups.entry(&date_type).extend(records);
                }
                Ok(groups)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}
