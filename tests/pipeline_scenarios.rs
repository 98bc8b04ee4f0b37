use std::io::{Cursor, Read};

use report_splitter::error::{ErrorKind, PipelineError, ReadError};
use report_splitter::export::CollisionPolicy;
use report_splitter::ingestion::{ExcelReader, TableReader};
use report_splitter::pipeline::{split_report, Pipeline, PipelineOptions, PipelineRequest};
use report_splitter::types::{Schema, Table};
use rust_xlsxwriter::Workbook;
use zip::ZipArchive;

const HEADER: [&str; 5] = ["id", "FleeName", "FinalStatus", "sync time", "planDeliveryDate"];

/// Build a single-sheet report; `rows` are `(FleeName, FinalStatus)` pairs.
fn report(rows: &[(&str, &str)]) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Deliveries").unwrap();

    for (col, h) in HEADER.iter().enumerate() {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    for (idx0, (flee, status)) in rows.iter().enumerate() {
        let r = idx0 as u32 + 1;
        ws.write_number(r, 0, r).unwrap();
        if !flee.is_empty() {
            ws.write_string(r, 1, *flee).unwrap();
        }
        ws.write_string(r, 2, *status).unwrap();
        ws.write_string(r, 3, "08:00").unwrap();
        ws.write_string(r, 4, "2024-03-05").unwrap();
    }
    wb.save_to_buffer().unwrap()
}

fn entry_names(archive: &[u8]) -> Vec<String> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

fn entry_table(archive: &[u8], name: &str) -> Table {
    let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut bytes = Vec::new();
    zip.by_name(name).unwrap().read_to_end(&mut bytes).unwrap();
    ExcelReader.read(&bytes, "FleeName").unwrap()
}

#[test]
fn scenario_a_zero_rows_is_empty() {
    let err = split_report(&report(&[]), "x").unwrap_err();
    assert!(matches!(err, PipelineError::Read(ReadError::Empty)));
    assert_eq!(err.kind(), ErrorKind::Empty);
}

#[test]
fn scenario_b_missing_group_column() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "FinalStatus").unwrap();
    ws.write_string(1, 0, "DELIVERED").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let err = split_report(&bytes, "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingColumn);
    assert!(err.user_message().contains("FleeName"));
}

#[test]
fn scenario_c_trimmed_keys_share_a_group() {
    let bytes = report(&[
        ("CourierX", "Delivered"),
        ("CourierY", "IN_TRANSIT"),
        (" CourierX ", "delivered"),
        ("CourierZ", "RETURNED"),
        ("CourierY", "pending"),
    ]);
    let out = split_report(&bytes, "march").unwrap();

    assert_eq!(out.total_rows, 2);
    assert_eq!(out.group_keys, vec!["CourierX"]);
    assert_eq!(entry_names(&out.archive), vec!["CourierX.xlsx"]);
    assert_eq!(entry_table(&out.archive, "CourierX.xlsx").row_count(), 2);
}

#[test]
fn scenario_d_empty_key_is_undefined() {
    let out = split_report(&report(&[("", "DELIVERED"), ("A", "DELIVERED")]), "x").unwrap();
    assert_eq!(out.group_keys, vec!["undefined", "A"]);
    assert_eq!(entry_names(&out.archive), vec!["undefined.xlsx", "A.xlsx"]);
}

#[test]
fn scenario_e_no_delivered_rows() {
    let err = split_report(&report(&[("A", "IN_TRANSIT"), ("B", "IN_TRANSIT")]), "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatches);
    assert!(matches!(
        err,
        PipelineError::NoMatches { ref column, ref wanted } if column == "FinalStatus" && wanted == "DELIVERED"
    ));
}

#[test]
fn scenario_f_three_groups_in_first_seen_order() {
    let bytes = report(&[
        ("Gamma", "DELIVERED"),
        ("Alpha", "DELIVERED"),
        ("Gamma", "DELIVERED"),
        ("Beta/North", "DELIVERED"),
        ("Alpha", "DELIVERED"),
    ]);
    let out = split_report(&bytes, "Weekly: all couriers").unwrap();

    assert_eq!(out.group_keys, vec!["Gamma", "Alpha", "Beta/North"]);
    let names = entry_names(&out.archive);
    assert_eq!(names, vec!["Gamma.xlsx", "Alpha.xlsx", "Beta_North.xlsx"]);
    assert!(names
        .iter()
        .all(|n| !n.contains(['<', '>', ':', '"', '/', '\\', '|', '?', '*'])));
    assert_eq!(out.archive_name, "Weekly_ all couriers.zip");

    let rows: usize = out.groups.iter().map(|g| g.rows).sum();
    assert_eq!(rows, out.total_rows);
}

#[test]
fn exported_tables_drop_excluded_columns_only() {
    let out = split_report(&report(&[("A", "DELIVERED"), ("A", " delivered ")]), "x").unwrap();
    let t = entry_table(&out.archive, "A.xlsx");

    assert_eq!(t.sheet, "Deliveries");
    assert_eq!(t.schema, Schema::new(["id", "FleeName", "FinalStatus"]));
    assert_eq!(t.rows, vec![vec!["1", "A", "DELIVERED"], vec!["2", "A", " delivered "]]);
}

#[test]
fn unwritable_cell_fails_the_whole_run() {
    let long = "x".repeat(40_000);
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "FleeName").unwrap();
    ws.write_string(0, 1, "FinalStatus").unwrap();
    ws.write_string(0, 2, "note").unwrap();
    ws.write_string(1, 0, "A").unwrap();
    ws.write_string(1, 1, "DELIVERED").unwrap();
    ws.write_string(1, 2, "ok").unwrap();
    ws.write_string(2, 0, "B").unwrap();
    ws.write_string(2, 1, "DELIVERED").unwrap();
    ws.write_string(2, 2, "short").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    // Swap in an oversized note through a custom reader: the source workbook itself can't hold it.
    struct Oversized(Vec<u8>, String);
    impl TableReader for Oversized {
        fn read(&self, _payload: &[u8], required: &str) -> Result<Table, ReadError> {
            let mut t = ExcelReader.read(&self.0, required)?;
            t.rows[1][2] = self.1.clone();
            Ok(t)
        }
    }

    let pipeline = Pipeline::default().with_reader(Oversized(bytes, long));
    let err = pipeline.run(b"", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Write);
    assert!(matches!(err, PipelineError::Write { ref group, .. } if group == "B"));
}

#[test]
fn colliding_names_get_suffixes_by_default() {
    let out = split_report(&report(&[("A/B", "DELIVERED"), ("A:B", "DELIVERED")]), "x").unwrap();
    assert_eq!(out.group_keys, vec!["A/B", "A:B"]);
    assert_eq!(entry_names(&out.archive), vec!["A_B.xlsx", "A_B (2).xlsx"]);
}

#[test]
fn overwrite_policy_keeps_last_group() {
    let pipeline = Pipeline::new(PipelineOptions {
        collision_policy: CollisionPolicy::Overwrite,
        ..Default::default()
    });
    let bytes = report(&[("A/B", "DELIVERED"), ("A:B", "DELIVERED"), ("A:B", "DELIVERED")]);
    let out = pipeline.run(&bytes, "x").unwrap();

    assert_eq!(out.group_keys.len(), 2);
    assert_eq!(entry_names(&out.archive), vec!["A_B.xlsx"]);
    assert_eq!(entry_table(&out.archive, "A_B.xlsx").row_count(), 2);
}

#[test]
fn repeated_runs_are_identical() {
    let bytes = report(&[("A", "DELIVERED"), ("B", "DELIVERED")]);
    let a = split_report(&bytes, "x").unwrap();
    let b = split_report(&bytes, "x").unwrap();
    assert_eq!(a, b);
}

#[test]
fn request_runs_with_its_own_options() {
    let req = PipelineRequest {
        payload: report(&[("A", "RETURNED")]),
        label: "returns".to_string(),
        options: PipelineOptions {
            wanted_status: "returned".to_string(),
            ..Default::default()
        },
    };
    let out = req.run().unwrap();
    assert_eq!(out.group_keys, vec!["A"]);
    assert_eq!(out.archive_name, "returns.zip");

    let summary = out.summary();
    assert_eq!(summary.groups[0].file_name, "A.xlsx");
    assert!(summary.to_json_pretty().unwrap().contains("\"total_rows\": 1"));
}

#[test]
fn short_rows_from_a_custom_reader_are_padded_on_export() {
    struct Ragged;
    impl TableReader for Ragged {
        fn read(&self, _payload: &[u8], _required: &str) -> Result<Table, ReadError> {
            Ok(Table {
                sheet: "Sheet1".to_string(),
                schema: Schema::new(["FleeName", "FinalStatus", "sync time", "note"]),
                rows: vec![vec!["A".to_string(), "DELIVERED".to_string()]],
            })
        }
    }

    let out = Pipeline::default().with_reader(Ragged).run(b"", "x").unwrap();
    assert_eq!(out.group_keys, vec!["A"]);

    let t = entry_table(&out.archive, "A.xlsx");
    assert_eq!(t.schema, Schema::new(["FleeName", "FinalStatus", "note"]));
    assert_eq!(t.rows, vec![vec!["A", "DELIVERED", ""]]);
}
