use labfill_interpret::{BiochemistryPanel, Sex, interpret};
use labfill_model::CellValue;

fn abnormal_export_row() -> Vec<(&'static str, CellValue)> {
    vec![
        ("TP", CellValue::Number(60.0)),
        ("ALB", CellValue::Number(30.0)),
        ("TBIL", CellValue::Number(35.0)),
        ("DBIL", CellValue::Number(20.0)),
        ("ALT", CellValue::Number(250.0)),
        ("AST", CellValue::Number(90.0)),
        ("ALP", CellValue::Number(200.0)),
        ("GGT", CellValue::Number(60.0)),
        ("GLU", CellValue::Text("7,2".to_string())),
        ("UREA", CellValue::Number(12.0)),
        ("CREA", CellValue::Number(150.0)),
        ("CHOL", CellValue::Number(6.4)),
        ("ID", CellValue::Text("PETROV IV 1980".to_string())),
    ]
}

#[test]
fn full_abnormal_panel() {
    let row = abnormal_export_row();
    let panel = BiochemistryPanel::from_columns(row.iter().map(|(c, v)| (*c, v)));

    let conclusion = interpret(Sex::Male, &panel);

    assert_eq!(conclusion.findings.len(), 11);
    insta::assert_snapshot!(
        conclusion.text(),
        @"hypoproteinemia, hypoalbuminemia, hyperbilirubinemia predominantly conjugated, ALT 6 to 7 times the upper limit (marked process activity), AST above normal, ALP above normal, GGT above normal, hyperglycemia, azotemia, hypercholesterolemia"
    );
}

#[test]
fn empty_panel_has_empty_text() {
    let panel = BiochemistryPanel::from_columns(std::iter::empty());
    assert_eq!(interpret(Sex::Female, &panel).text(), "");
}
