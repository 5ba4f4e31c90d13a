//! Loading real files: xlsx written with rust_xlsxwriter, and CSV text.

use std::path::Path;

use chrono::NaiveDate;
use evalsheet_core::config::SheetLayout;
use evalsheet_core::model::{Judgment, TraineeKey};
use evalsheet_core::report::DetailSelector;
use evalsheet_core::{load_file, FilterSelection, SheetError};
use rust_xlsxwriter::Workbook;

const HEADER: [&str; 7] = [
    "Tipo de Documento",
    "Número de Documento",
    "Nombre",
    "Apellidos",
    "Competencia",
    "Resultado de Aprendizaje",
    "Juicio de Evaluación",
];

const BODY: [[&str; 7]; 4] = [
    ["CC", "100", "Ana María", "Pérez Gómez", "Comp1", "RA1", "APROBADO"],
    ["CC", "100", "Ana María", "Pérez Gómez", "Comp2", "RA2", "POR EVALUAR"],
    ["TI", "200", "Luis", "Rojas", "Comp1", "RA1", "NO APROBADO"],
    ["TI", "200", "Luis", "Rojas", "Comp2", "RA2", "APLAZADO"],
];

fn write_xlsx(path: &Path, header: &[&str]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Reporte de Juicios Evaluativos").unwrap();
    sheet.write_number(2, 2, 2758473.0).unwrap();
    sheet.write_string(5, 2, "ANALISIS Y DESARROLLO DE SOFTWARE").unwrap();
    sheet.write_string(6, 2, "EN EJECUCION").unwrap();
    sheet.write_number(7, 2, 45033.0).unwrap();
    sheet.write_string(8, 2, "16/10/2025").unwrap();

    for (c, label) in header.iter().enumerate() {
        sheet.write_string(12, c as u16, *label).unwrap();
    }
    for (r, row) in BODY.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(13 + r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn csv_text() -> String {
    let mut text = String::from("Reporte de Juicios Evaluativos\n\n,,2758473\n\n\n");
    text.push_str(",,ANALISIS Y DESARROLLO DE SOFTWARE\n,,EN EJECUCION\n,,2023-04-17\n,,16/10/2025\n\n\n\n");
    text.push_str(&HEADER.join(","));
    text.push('\n');
    for row in BODY {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

#[test]
fn loads_xlsx_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.xlsx");
    write_xlsx(&path, &HEADER);

    let sheet = load_file(&path, &SheetLayout::default()).unwrap();
    assert_eq!(sheet.metadata.cohort_id, "2758473");
    assert_eq!(sheet.metadata.start_date, NaiveDate::from_ymd_opt(2023, 4, 17).unwrap());
    assert_eq!(sheet.metadata.end_date, NaiveDate::from_ymd_opt(2025, 10, 16).unwrap());
    assert_eq!(sheet.records.len(), 4);
    assert_eq!(sheet.records[0].first_name, "Ana María");
    assert_eq!(sheet.records[3].judgment, Judgment::Other("APLAZADO".into()));
}

#[test]
fn xlsx_and_csv_load_the_same_records() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("cohort.xlsx");
    let csv = dir.path().join("cohort.csv");
    write_xlsx(&xlsx, &HEADER);
    std::fs::write(&csv, csv_text()).unwrap();

    let layout = SheetLayout::default();
    let from_xlsx = load_file(&xlsx, &layout).unwrap();
    let from_csv = load_file(&csv, &layout).unwrap();
    assert_eq!(from_xlsx, from_csv);
}

#[test]
fn xlsx_missing_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    let mut header = HEADER;
    header[6] = "Juicio";
    write_xlsx(&path, &header);

    let err = load_file(&path, &SheetLayout::default()).unwrap_err();
    let sheet_err = err.downcast_ref::<SheetError>().unwrap();
    assert_eq!(
        sheet_err,
        &SheetError::MissingColumns {
            columns: vec!["Juicio de Evaluación".into()]
        }
    );
}

#[test]
fn csv_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.csv");
    std::fs::write(&path, csv_text()).unwrap();
    let sheet = load_file(&path, &SheetLayout::default()).unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    let summary = sheet.summary_document(&FilterSelection::all(), now);
    assert_eq!(
        summary.sections[0].table.header,
        vec!["Trainee", "Pending", "Approved", "NotApproved", "Other", "Total"]
    );
    assert_eq!(summary.sections[0].table.rows[0], vec!["Ana María Pérez Gómez", "1", "1", "0", "0", "2"]);

    let key = TraineeKey::new("Luis", "Rojas");
    let detail = sheet.detail_document(&FilterSelection::all(), &DetailSelector::Trainee(key), now);
    assert_eq!(detail.file_stem, "reporte_Luis_Rojas_2758473");
    assert_eq!(detail.sections[0].table.rows.len(), 2);
}
