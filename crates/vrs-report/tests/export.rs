use vrs_model::{Gender, ParsedRecord};
use vrs_report::{ExportFormat, export_records, write_csv, write_json};

fn sample() -> Vec<ParsedRecord> {
    let mut first = ParsedRecord::new(1);
    first.voter_id = Some("111".into());
    first.voter_name = "Ram Shrestha".into();
    first.age = Some(34);
    first.gender = Gender::Male;
    first.surname = "Shrestha".into();
    first.caste = "Janajati".into();
    first.is_newar = true;
    first.original_data.insert("Name".into(), "Ram Shrestha".into());
    first.original_data.insert("age".into(), "34".into());

    let mut second = ParsedRecord::new(2);
    second.voter_name = "Sita".into();
    second.original_data.insert("Remarks".into(), "moved".into());
    vec![first, second]
}

#[test]
fn csv_has_normalized_then_original_columns() {
    let mut out = Vec::new();
    write_csv(&mut out, &sample()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(header[0], "rowNumber");
    assert_eq!(header[1], "serialNumber");
    assert_eq!(header[20], "isNewar");
    assert_eq!(header[21], "classificationSource");
    assert_eq!(&header[22..], &["Name", "original:age", "Remarks"]);

    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first[2], "111");
    assert_eq!(first[3], "Ram Shrestha");
    assert_eq!(first[4], "34");
    assert_eq!(first[5], "male");
    assert_eq!(first[20], "true");
    assert_eq!(&first[22..], &["Ram Shrestha", "34", ""]);

    let second: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(second[4], "");
    assert_eq!(&second[22..], &["", "", "moved"]);
}

#[test]
fn json_export_is_camel_case_array() {
    let mut out = Vec::new();
    write_json(&mut out, &sample()[1..]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["voterName"], "Sita");
    assert_eq!(value[0]["classificationSource"], "auto");
    assert_eq!(value[0]["originalData"]["Remarks"], "moved");
}

#[test]
fn export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.csv");
    export_records(&path, &sample(), "CSV".parse::<ExportFormat>().unwrap()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!("xml".parse::<ExportFormat>().is_err());
}
