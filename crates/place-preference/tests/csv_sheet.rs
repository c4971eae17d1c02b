use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use place_preference::workflows::preference::sheet::SHEET_COLUMNS;
use place_preference::workflows::preference::{
    CsvSheet, EmployeeRecordStore, FixtureDirectory, EmployeeId, OptionSetId, Section,
    SheetIntakeService, SheetWriter, Slot, SubmissionPayload,
};

fn scratch_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "place-preference-{name}-{}.csv",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

async fn technical_payload() -> SubmissionPayload {
    let directory = FixtureDirectory::standard();
    let mut store = EmployeeRecordStore::new();
    store
        .load(&directory, &EmployeeId("E003".to_string()))
        .await
        .expect("fixture employee loads");
    store
        .set_slot(Section::Foreign, Slot::Place1, "Tokyo")
        .expect("slot one");
    store
        .set_slot(Section::Foreign, Slot::Place2, "Berlin")
        .expect("slot two");
    store
        .set_slot(Section::Foreign, Slot::Place3, "Dubai")
        .expect("slot three");

    let submitted_at = Utc
        .with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    SubmissionPayload::build_at(store.active().expect("record loaded"), submitted_at)
        .expect("selection complete")
}

#[tokio::test]
async fn csv_sheet_writes_header_once() {
    let path = scratch_path("header");
    let sheet = CsvSheet::new(&path);
    let payload = technical_payload().await;

    sheet.append(&payload).expect("first append");
    sheet.append(&payload).expect("second append");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .expect("sheet readable");
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    let _ = fs::remove_file(&path);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].iter().collect::<Vec<_>>(), SHEET_COLUMNS.to_vec());
    assert_eq!(
        rows[1].iter().collect::<Vec<_>>(),
        vec![
            "E003",
            "Technical",
            "N/A",
            "N/A",
            "N/A",
            "N/A",
            "direct",
            "Tokyo",
            "Berlin",
            "Dubai",
            "2025-06-01T08:00:00.000Z",
        ]
    );
    assert_eq!(rows[1], rows[2]);
}

#[tokio::test]
async fn intake_refuses_tampered_payload_before_writing() {
    let path = scratch_path("tampered");
    let service = SheetIntakeService::new(Arc::new(CsvSheet::new(&path)));

    let mut wire = serde_json::to_value(technical_payload().await).expect("payload serializes");
    wire["section1_option"] = serde_json::json!(OptionSetId::Option1.as_str());
    let tampered: SubmissionPayload = serde_json::from_value(wire).expect("payload deserializes");

    assert!(service.accept(&tampered).is_err());
    assert!(!path.exists(), "nothing appended for a rejected payload");
}
