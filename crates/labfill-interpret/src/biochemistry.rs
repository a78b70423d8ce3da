//! Biochemistry reference limits and the rules applied to a panel.

use tracing::debug;

use labfill_model::CellValue;

use crate::finding::{Activity, Conclusion, Finding};
use crate::sex::Sex;

const TOTAL_PROTEIN_MIN: f64 = 66.0;
const ALBUMIN_MIN: f64 = 35.0;
const TOTAL_BILIRUBIN_MAX: f64 = 21.0;
const CONJUGATED_BILIRUBIN_MAX: f64 = 5.1;
const ALT_MAX: f64 = 41.0;
const AST_MAX: f64 = 37.0;
const GLUCOSE_MAX: f64 = 5.9;
const UREA_MAX: f64 = 8.3;
const CHOLESTEROL_MAX: f64 = 5.2;

/// Biochemistry values by analyte. `None` means not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiochemistryPanel {
    pub total_protein: Option<f64>,
    pub albumin: Option<f64>,
    pub total_bilirubin: Option<f64>,
    pub conjugated_bilirubin: Option<f64>,
    pub alt: Option<f64>,
    pub ast: Option<f64>,
    pub alkaline_phosphatase: Option<f64>,
    pub ggt: Option<f64>,
    pub glucose: Option<f64>,
    pub urea: Option<f64>,
    pub creatinine: Option<f64>,
    pub cholesterol: Option<f64>,
}

impl BiochemistryPanel {
    /// Builds a panel from `(column code, value)` pairs of the export.
    ///
    /// Recognised codes: TP, ALB, TBIL, DBIL, ALT, AST, ALP, GGT, GLU, UREA,
    /// CREA, CHOL. Zero and non-numeric values count as not measured.
    pub fn from_columns<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a CellValue)>,
    {
        let mut panel = Self::default();
        for (column, value) in values {
            let measured = if value.is_zero() { None } else { value.as_f64() };
            let slot = match column.trim().to_ascii_uppercase().as_str() {
                "TP" => &mut panel.total_protein,
                "ALB" => &mut panel.albumin,
                "TBIL" => &mut panel.total_bilirubin,
                "DBIL" => &mut panel.conjugated_bilirubin,
                "ALT" => &mut panel.alt,
                "AST" => &mut panel.ast,
                "ALP" => &mut panel.alkaline_phosphatase,
                "GGT" => &mut panel.ggt,
                "GLU" => &mut panel.glucose,
                "UREA" => &mut panel.urea,
                "CREA" => &mut panel.creatinine,
                "CHOL" => &mut panel.cholesterol,
                other => {
                    debug!(column = %other, "column has no interpretation rule");
                    continue;
                }
            };
            *slot = measured;
        }
        panel
    }
}

fn alp_max(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 128.0,
        Sex::Female => 98.0,
    }
}

fn ggt_max(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 49.0,
        Sex::Female => 32.0,
    }
}

fn creatinine_max(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 115.0,
        Sex::Female => 97.0,
    }
}

/// Applies the reference limits to `panel` in report order.
pub fn interpret(sex: Sex, panel: &BiochemistryPanel) -> Conclusion {
    let mut findings = Vec::new();
    let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);
    let below = |value: Option<f64>, limit: f64| value.is_some_and(|v| v < limit);

    if below(panel.total_protein, TOTAL_PROTEIN_MIN) {
        findings.push(Finding::Hypoproteinemia);
    }
    if below(panel.albumin, ALBUMIN_MIN) {
        findings.push(Finding::Hypoalbuminemia);
    }
    if above(panel.total_bilirubin, TOTAL_BILIRUBIN_MAX) {
        findings.push(Finding::Hyperbilirubinemia);
        if above(panel.conjugated_bilirubin, CONJUGATED_BILIRUBIN_MAX) {
            findings.push(Finding::PredominantlyConjugated);
        }
    }
    if let Some(alt) = panel.alt.filter(|v| *v > ALT_MAX) {
        let lower = (alt / ALT_MAX).floor() as u32;
        findings.push(Finding::AltElevated {
            lower,
            upper: lower + 1,
            activity: Activity::from_multiple(lower),
        });
    }
    if above(panel.ast, AST_MAX) {
        findings.push(Finding::AstElevated);
    }
    if above(panel.alkaline_phosphatase, alp_max(sex)) {
        findings.push(Finding::AlpElevated);
    }
    if above(panel.ggt, ggt_max(sex)) {
        findings.push(Finding::GgtElevated);
    }
    if above(panel.glucose, GLUCOSE_MAX) {
        findings.push(Finding::Hyperglycemia);
    }
    if above(panel.urea, UREA_MAX) || above(panel.creatinine, creatinine_max(sex)) {
        findings.push(Finding::Azotemia);
    }
    if above(panel.cholesterol, CHOLESTEROL_MAX) {
        findings.push(Finding::Hypercholesterolemia);
    }

    debug!(sex = %sex, findings = findings.len(), "biochemistry interpreted");
    Conclusion { findings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimal_zero_is_not_measured() {
        let protein = CellValue::Text("0,0".to_string());
        let urea = CellValue::Text("8,5".to_string());
        let panel = BiochemistryPanel::from_columns([("TP", &protein), ("UREA", &urea)]);
        assert_eq!(panel.total_protein, None);
        assert_eq!(panel.urea, Some(8.5));
        assert_eq!(interpret(Sex::Male, &panel).findings, vec![Finding::Azotemia]);
    }

    #[test]
    fn normal_panel_has_no_findings() {
        let panel = BiochemistryPanel {
            total_protein: Some(72.0),
            albumin: Some(42.0),
            total_bilirubin: Some(12.0),
            conjugated_bilirubin: Some(8.0),
            alt: Some(41.0),
            glucose: Some(5.9),
            ..Default::default()
        };
        assert!(interpret(Sex::Male, &panel).is_empty());
    }

    #[test]
    fn conjugated_needs_high_total_bilirubin() {
        let panel = BiochemistryPanel {
            total_bilirubin: Some(30.0),
            conjugated_bilirubin: Some(9.0),
            ..Default::default()
        };
        assert_eq!(
            interpret(Sex::Male, &panel).findings,
            vec![Finding::Hyperbilirubinemia, Finding::PredominantlyConjugated]
        );
    }

    #[test]
    fn alt_multiples_and_activity() {
        let conclusion = interpret(
            Sex::Female,
            &BiochemistryPanel {
                alt: Some(130.0),
                ..Default::default()
            },
        );
        assert_eq!(
            conclusion.findings,
            vec![Finding::AltElevated {
                lower: 3,
                upper: 4,
                activity: Activity::Moderate,
            }]
        );
    }

    #[test]
    fn sex_specific_limits() {
        let panel = BiochemistryPanel {
            alkaline_phosphatase: Some(110.0),
            ggt: Some(40.0),
            creatinine: Some(100.0),
            ..Default::default()
        };
        assert!(interpret(Sex::Male, &panel).is_empty());
        assert_eq!(
            interpret(Sex::Female, &panel).findings,
            vec![Finding::AlpElevated, Finding::GgtElevated, Finding::Azotemia]
        );
    }

    #[test]
    fn urea_alone_gives_azotemia() {
        let panel = BiochemistryPanel {
            urea: Some(9.1),
            creatinine: Some(80.0),
            ..Default::default()
        };
        assert_eq!(interpret(Sex::Male, &panel).findings, vec![Finding::Azotemia]);
    }

    #[test]
    fn zero_values_are_not_measured() {
        let zero = CellValue::ZERO;
        let low = CellValue::Number(50.0);
        let panel = BiochemistryPanel::from_columns([("TP", &zero), ("alb", &low)]);
        assert_eq!(panel.total_protein, None);
        assert_eq!(panel.albumin, Some(50.0));
        assert!(interpret(Sex::Male, &panel).is_empty());
    }
}
