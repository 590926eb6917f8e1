//! Assembly of date records from a flat key/value stream.
//!
//! The extraction service answers with ordered `[key, value]` pairs such as
//! `["submissionName", "Full papers"]` followed by `["submission", "May 1"]`.
//! A key ending in `Name` opens a record for its date-type; any other key
//! fills the date of the most recently opened record, or stands alone when
//! there is none to fill.

use crate::error::{Error, Result};
use crate::model::{DateGroups, Record};

/// Suffix marking a key whose value is a record name.
pub const NAME_SUFFIX: &str = "Name";

/// Date-type label of a key: the key without its trailing `Name`.
pub fn date_type(key: &str) -> &str {
    key.strip_suffix(NAME_SUFFIX).unwrap_or(key)
}

/// Stateful reducer turning key/value pairs into grouped records.
///
/// Every pushed pair either opens a new record or fills exactly one existing
/// record; nothing is dropped.
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    groups: DateGroups,
    consumed: usize,
}

impl RecordAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one pair.
    pub fn push(&mut self, key: &str, value: &str) {
        self.consumed += 1;
        let records = self.groups.entry(date_type(key));

        if key.ends_with(NAME_SUFFIX) {
            records.push(Record::named(value));
            return;
        }

        match records.last_mut() {
            Some(last) if last.is_open() => last.date = value.to_string(),
            _ => records.push(Record::dated(value)),
        }
    }

    /// Consume pairs in order.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            self.push(key.as_ref(), value.as_ref());
        }
    }

    /// Number of pairs consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Groups assembled so far.
    pub fn groups(&self) -> &DateGroups {
        &self.groups
    }

    /// Finish assembly.
    pub fn finish(self) -> DateGroups {
        log::debug!(
            "Assembled {} pairs into {} records across {} date-types",
            self.consumed,
            self.groups.record_count(),
            self.groups.len()
        );
        self.groups
    }
}

/// Assemble grouped records from ordered key/value pairs.
pub fn assemble_records<I, K, V>(pairs: I) -> DateGroups
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut assembler = RecordAssembler::new();
    assembler.extend(pairs);
    assembler.finish()
}

/// Decode a JSON payload holding an array of `[key, value]` string pairs.
pub fn parse_pairs(payload: &str) -> Result<Vec<(String, String)>> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| Error::InvalidResponse(format!("not JSON: {}", e)))?;

    serde_json::from_value(value).map_err(|e| {
        Error::InvalidResponse(format!("expected an array of [key, value] string pairs: {}", e))
    })
}

/// Decode a JSON pairs payload and assemble it.
pub fn records_from_json(payload: &str) -> Result<DateGroups> {
    Ok(assemble_records(parse_pairs(payload)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_type_strips_trailing_suffix_only() {
        assert_eq!(date_type("startName"), "start");
        assert_eq!(date_type("start"), "start");
        assert_eq!(date_type("NameChange"), "NameChange");
        assert_eq!(date_type("Name"), "");
    }

    #[test]
    fn test_name_then_date_pairs() {
        let groups = assemble_records([
            ("startName", "A"),
            ("start", "2024-01-01"),
            ("startName", "B"),
            ("start", "2024-02-01"),
        ]);
        assert_eq!(
            groups.get("start").unwrap(),
            &[Record::new("A", "2024-01-01"), Record::new("B", "2024-02-01")]
        );
    }

    #[test]
    fn test_date_fills_latest_open_name_only() {
        let groups = assemble_records([("endName", "A"), ("endName", "B"), ("end", "May 1")]);
        assert_eq!(
            groups.get("end").unwrap(),
            &[Record::named("A"), Record::new("B", "May 1")]
        );
    }

    #[test]
    fn test_second_date_stands_alone() {
        let groups = assemble_records([("endName", "A"), ("end", "May 1"), ("end", "May 2")]);
        assert_eq!(
            groups.get("end").unwrap(),
            &[Record::new("A", "May 1"), Record::dated("May 2")]
        );
    }

    #[test]
    fn test_incremental_push_matches_fold() {
        let pairs = [("aName", "x"), ("b", "1"), ("a", "2")];
        let mut assembler = RecordAssembler::new();
        for (k, v) in pairs {
            assembler.push(k, v);
        }
        assert_eq!(assembler.consumed(), 3);
        assert_eq!(assembler.groups().len(), 2);
        assert_eq!(assembler.finish(), assemble_records(pairs));
    }

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(r#"[["startName","A"],["start","2024"]]"#).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("startName".to_string(), "A".to_string()),
                ("start".to_string(), "2024".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_pairs_rejects_bad_payloads() {
        for payload in ["not json", r#"{"a":"b"}"#, r#"[["a"]]"#, r#"[["a", 1]]"#, r#"[["a","b","c"]]"#] {
            assert!(
                matches!(parse_pairs(payload), Err(Error::InvalidResponse(_))),
                "payload accepted: {}",
                payload
            );
        }
    }

    #[test]
    fn test_empty_payload_gives_no_groups() {
        assert!(records_from_json("[]").unwrap().is_empty());
    }
}
