//! Analysis profile registry.
//!
//! Profiles are static per session. The built-in set matches the analyzer
//! exports the clinic uses; a TOML file can replace it when an analyzer
//! names its columns differently.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::analysis::{AnalysisKind, AnalysisProfile, SearchMode, TargetColumn, TargetColumnList};
use crate::error::{ProfileError, Result};

/// Identity column of biochemistry exports ("SURNAME IO YYYY").
pub const DEFAULT_IDENTITY_COLUMN: &str = "ID";

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<AnalysisProfile>,
}

/// Analysis profiles keyed by kind.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<AnalysisKind, AnalysisProfile>,
}

impl ProfileRegistry {
    /// Builds a registry, rejecting duplicates and unusable profiles.
    pub fn new(profiles: Vec<AnalysisProfile>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            validate_profile(&profile)?;
            let kind = profile.kind;
            if map.insert(kind, profile).is_some() {
                return Err(ProfileError::Duplicate(kind));
            }
        }
        Ok(Self { profiles: map })
    }

    /// Profiles for the analyzer exports shipped with the application.
    pub fn builtin() -> Self {
        let profiles = [biochemistry_profile(), blood_count_profile()]
            .into_iter()
            .map(|p| (p.kind, p))
            .collect();
        Self { profiles }
    }

    /// Parses profiles from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ProfileFile = toml::from_str(content)?;
        Self::new(file.profiles)
    }

    /// Loads profiles from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            profile_count = registry.profiles.len(),
            "loaded analysis profiles"
        );
        Ok(registry)
    }

    pub fn get(&self, kind: AnalysisKind) -> Option<&AnalysisProfile> {
        self.profiles.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_profile(profile: &AnalysisProfile) -> Result<()> {
    if profile.targets.eligible_len() == 0 {
        return Err(ProfileError::NoEligibleColumns(profile.kind));
    }
    let has_identity = profile
        .identity_column
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());
    if profile.mode == SearchMode::Substring && !has_identity {
        return Err(ProfileError::MissingIdentityColumn(profile.kind));
    }
    Ok(())
}

fn biochemistry_profile() -> AnalysisProfile {
    AnalysisProfile {
        kind: AnalysisKind::Biochemistry,
        title: "Biochemical blood analysis".to_string(),
        mode: SearchMode::Substring,
        identity_column: Some(DEFAULT_IDENTITY_COLUMN.to_string()),
        targets: TargetColumnList::new(vec![
            TargetColumn::new("Total protein", "TP"),
            TargetColumn::new("Albumin", "ALB"),
            TargetColumn::new("Total bilirubin", "TBIL"),
            TargetColumn::new("Conjugated bilirubin", "DBIL"),
            TargetColumn::new("ALT", "ALT"),
            TargetColumn::new("AST", "AST"),
            TargetColumn::new("Alkaline phosphatase", "ALP"),
            TargetColumn::new("GGT", "GGT"),
            TargetColumn::new("Glucose", "GLU"),
            TargetColumn::new("Urea", "UREA"),
            TargetColumn::new("Creatinine", "CREA"),
            TargetColumn::new("Cholesterol", "CHOL"),
        ]),
    }
}

fn blood_count_profile() -> AnalysisProfile {
    AnalysisProfile {
        kind: AnalysisKind::BloodCount,
        title: "Complete blood count".to_string(),
        mode: SearchMode::SequentialValue,
        identity_column: None,
        targets: TargetColumnList::new(vec![
            TargetColumn::new("WBC", "WBC"),
            TargetColumn::new("RBC", "RBC"),
            TargetColumn::new("HGB", "HGB"),
            TargetColumn::new("HCT", "HCT"),
            TargetColumn::new("MCV", "MCV"),
            TargetColumn::new("MCH", "MCH"),
            TargetColumn::new("MCHC", "MCHC"),
            TargetColumn::new("PLT", "PLT"),
            TargetColumn::manual("ESR"),
        ]),
    }
}
