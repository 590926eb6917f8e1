//! Integration tests for record assembly.

use cfptext::render::to_json;
use cfptext::{
    assemble_records, records_from_json, DateGroups, Error, JsonFormat, Record, RecordAssembler,
};

#[test]
fn test_paired_names_and_dates() {
    let groups = records_from_json(
        r#"[["startName","A"],["start","2024-01-01"],["startName","B"],["start","2024-02-01"]]"#,
    )
    .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups.get("start").unwrap(),
        &[Record::new("A", "2024-01-01"), Record::new("B", "2024-02-01")]
    );
}

#[test]
fn test_unmatched_names_keep_empty_dates() {
    let groups = records_from_json(r#"[["startName","A"],["startName","B"]]"#).unwrap();
    assert_eq!(
        groups.get("start").unwrap(),
        &[Record::new("A", ""), Record::new("B", "")]
    );
}

#[test]
fn test_unmatched_date_stands_alone() {
    let groups = records_from_json(r#"[["start","2024-01-01"]]"#).unwrap();
    assert_eq!(groups.get("start").unwrap(), &[Record::new("", "2024-01-01")]);
}

#[test]
fn test_date_types_in_first_seen_order() {
    let groups = assemble_records([
        ("submissionName", "Full papers"),
        ("notificationName", "Acceptance"),
        ("submission", "May 1"),
        ("cameraReady", "July 1"),
        ("notification", "June 1"),
        ("submissionName", "Short papers"),
        ("submission", "May 15"),
    ]);

    let order: Vec<&str> = groups.date_types().collect();
    assert_eq!(order, vec!["submission", "notification", "cameraReady"]);

    assert_eq!(
        groups.get("submission").unwrap(),
        &[
            Record::new("Full papers", "May 1"),
            Record::new("Short papers", "May 15")
        ]
    );
    assert_eq!(
        groups.get("notification").unwrap(),
        &[Record::new("Acceptance", "June 1")]
    );
    assert_eq!(groups.get("cameraReady").unwrap(), &[Record::dated("July 1")]);
}

#[test]
fn test_every_pair_is_accounted_for() {
    let pairs = [
        ("aName", "1"),
        ("a", "2"),
        ("a", "3"),
        ("bName", "4"),
        ("aName", "5"),
        ("b", "6"),
        ("c", "7"),
    ];
    let groups = assemble_records(pairs);

    // Each pair either opened a record or filled one.
    let names = pairs.iter().filter(|(k, _)| k.ends_with("Name")).count();
    let standalone_dates = groups
        .iter()
        .flat_map(|group| &group.records)
        .filter(|record| record.name.is_empty())
        .count();
    assert_eq!(groups.record_count(), names + standalone_dates);

    let values: usize = groups
        .iter()
        .flat_map(|group| &group.records)
        .map(|r| usize::from(!r.name.is_empty()) + usize::from(!r.date.is_empty()))
        .sum();
    assert_eq!(values, pairs.len());
}

#[test]
fn test_assembler_matches_one_shot_fold() {
    let pairs = vec![
        ("endName".to_string(), "Workshop".to_string()),
        ("end".to_string(), "Sep 9".to_string()),
        ("end".to_string(), "Sep 10".to_string()),
    ];

    let mut assembler = RecordAssembler::new();
    for (key, value) in &pairs {
        assembler.push(key, value);
    }
    assert_eq!(assembler.consumed(), 3);
    assert_eq!(assembler.finish(), assemble_records(pairs));
}

#[test]
fn test_invalid_payloads() {
    assert!(matches!(records_from_json("{oops"), Err(Error::InvalidResponse(_))));
    assert!(matches!(
        records_from_json(r#"[{"key":"startName","value":"A"}]"#),
        Err(Error::InvalidResponse(_))
    ));
    assert!(matches!(records_from_json("null"), Err(Error::InvalidResponse(_))));
}

#[test]
fn test_json_output_keeps_order() {
    let groups = assemble_records([
        ("zetaName", "Z"),
        ("zeta", "1"),
        ("alphaName", "A"),
        ("alpha", "2"),
    ]);

    let json = to_json(&groups, JsonFormat::Compact).unwrap();
    assert_eq!(
        json,
        r#"{"zeta":[{"name":"Z","date":"1"}],"alpha":[{"name":"A","date":"2"}]}"#
    );

    let back: DateGroups = serde_json::from_str(&json).unwrap();
    assert_eq!(back, groups);
}

#[test]
fn test_empty_input() {
    let groups = assemble_records(Vec::<(String, String)>::new());
    assert!(groups.is_empty());
    assert_eq!(to_json(&groups, JsonFormat::Compact).unwrap(), "{}");
}
