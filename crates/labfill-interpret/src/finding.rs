//! Findings and the conclusion line built from them.

use std::fmt;

/// Process activity implied by how far ALT exceeds its upper limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Minimal,
    Mild,
    Moderate,
    Marked,
}

impl Activity {
    /// Grade for ALT lying between `multiple` and `multiple + 1` upper limits.
    pub fn from_multiple(multiple: u32) -> Self {
        match multiple {
            0 | 1 => Self::Minimal,
            2 => Self::Mild,
            3 | 4 => Self::Moderate,
            _ => Self::Marked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Marked => "marked",
        }
    }
}

/// A single abnormal result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Hypoproteinemia,
    Hypoalbuminemia,
    Hyperbilirubinemia,
    /// Qualifies a preceding [`Finding::Hyperbilirubinemia`].
    PredominantlyConjugated,
    AltElevated {
        lower: u32,
        upper: u32,
        activity: Activity,
    },
    AstElevated,
    AlpElevated,
    GgtElevated,
    Hyperglycemia,
    Azotemia,
    Hypercholesterolemia,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hypoproteinemia => f.write_str("hypoproteinemia"),
            Self::Hypoalbuminemia => f.write_str("hypoalbuminemia"),
            Self::Hyperbilirubinemia => f.write_str("hyperbilirubinemia"),
            Self::PredominantlyConjugated => f.write_str("predominantly conjugated"),
            Self::AltElevated {
                lower,
                upper,
                activity,
            } => write!(
                f,
                "ALT {lower} to {upper} times the upper limit ({} process activity)",
                activity.as_str()
            ),
            Self::AstElevated => f.write_str("AST above normal"),
            Self::AlpElevated => f.write_str("ALP above normal"),
            Self::GgtElevated => f.write_str("GGT above normal"),
            Self::Hyperglycemia => f.write_str("hyperglycemia"),
            Self::Azotemia => f.write_str("azotemia"),
            Self::Hypercholesterolemia => f.write_str("hypercholesterolemia"),
        }
    }
}

/// Ordered findings for one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conclusion {
    pub findings: Vec<Finding>,
}

impl Conclusion {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings joined into one line; a qualifier attaches to the finding before it.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            if !out.is_empty() {
                out.push_str(match finding {
                    Finding::PredominantlyConjugated => " ",
                    _ => ", ",
                });
            }
            out.push_str(&finding.to_string());
        }
        out
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
