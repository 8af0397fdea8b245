//! Disease knowledge base
//!
//! Static table mapping a class label (the exact string the model was
//! trained against) to the human-facing diagnosis: display name, severity,
//! treatment and prevention advice.
//!
//! The table is built once at startup, either from the builtin records or
//! from a JSON file with the same shape `GET /classes` returns, and is
//! never mutated afterwards. Lookups never fail: labels missing from the
//! table resolve to a generic fallback record.

mod builtin;

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{LeafDiseaseError, Result};

/// How serious a diagnosed condition is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Moderate,
    Severe,
    Unknown,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::None => write!(f, "none"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Severe => write!(f, "severe"),
            Severity::Unknown => write!(f, "unknown"),
        }
    }
}

/// Diagnosis text for one class label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub severity: Severity,
    pub treatment: String,
    pub prevention: String,
}

impl DiseaseRecord {
    pub fn new(
        name: impl Into<String>,
        severity: Severity,
        treatment: impl Into<String>,
        prevention: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            severity,
            treatment: treatment.into(),
            prevention: prevention.into(),
        }
    }

    /// Record returned for a label the table does not know
    pub fn fallback(label: &str) -> Self {
        Self::new(
            label,
            Severity::Unknown,
            "Consult with local agricultural experts for proper diagnosis and treatment.",
            "Follow general good agricultural practices.",
        )
    }
}

/// Label list plus per-label diagnosis records
///
/// `classes` is ordered by model output index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    classes: Vec<String>,
    disease_info: BTreeMap<String, DiseaseRecord>,
}

impl KnowledgeBase {
    /// The builtin table for the 16-class leaf disease model
    pub fn builtin() -> Self {
        let entries = builtin::records();
        let classes = entries.iter().map(|(label, _)| label.to_string()).collect();
        let disease_info = entries
            .into_iter()
            .map(|(label, record)| (label.to_string(), record))
            .collect();

        Self {
            classes,
            disease_info,
        }
    }

    /// Build a knowledge base from explicit parts, validating them
    pub fn new(classes: Vec<String>, disease_info: BTreeMap<String, DiseaseRecord>) -> Result<Self> {
        let kb = Self {
            classes,
            disease_info,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// Load a knowledge base from a JSON file
    ///
    /// Expected shape: `{"classes": [label...], "disease_info": {label: record}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let kb: Self = serde_json::from_str(&content)?;
        kb.validate().map_err(|e| {
            LeafDiseaseError::Config(format!("knowledge base '{}': {}", path.display(), e))
        })?;
        Ok(kb)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(LeafDiseaseError::Config("class list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for label in &self.classes {
            if !seen.insert(label.as_str()) {
                return Err(LeafDiseaseError::Config(format!("duplicate class label '{}'", label)));
            }

            let record = self.disease_info.get(label).ok_or_else(|| {
                LeafDiseaseError::Config(format!("no disease record for class '{}'", label))
            })?;

            if record.name.trim().is_empty()
                || record.treatment.trim().is_empty()
                || record.prevention.trim().is_empty()
            {
                return Err(LeafDiseaseError::Config(format!(
                    "disease record for '{}' has empty name, treatment or prevention",
                    label
                )));
            }
        }

        Ok(())
    }

    /// Resolve a label to its record, falling back to a generic one
    pub fn lookup(&self, label: &str) -> DiseaseRecord {
        self.disease_info
            .get(label)
            .cloned()
            .unwrap_or_else(|| DiseaseRecord::fallback(label))
    }

    /// Whether the label has a dedicated record
    pub fn contains(&self, label: &str) -> bool {
        self.disease_info.contains_key(label)
    }

    /// Class labels in model output order
    pub fn labels(&self) -> &[String] {
        &self.classes
    }

    pub fn records(&self) -> &BTreeMap<String, DiseaseRecord> {
        &self.disease_info
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_sixteen_complete_records() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 16);
        assert_eq!(kb.records().len(), 16);
        assert!(kb.validate().is_ok());

        for label in kb.labels() {
            let record = kb.lookup(label);
            assert!(!record.treatment.is_empty(), "{} has no treatment", label);
            assert!(!record.prevention.is_empty(), "{} has no prevention", label);
        }
    }

    #[test]
    fn test_builtin_label_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.labels()[0], "Pepper__bell___Bacterial_spot");
        assert_eq!(kb.labels()[2], "PlantVillage");
        assert_eq!(kb.labels()[15], "Tomato_healthy");
    }

    #[test]
    fn test_lookup_known_label() {
        let kb = KnowledgeBase::builtin();
        let record = kb.lookup("Potato___Late_blight");
        assert_eq!(record.name, "Potato Late Blight");
        assert_eq!(record.severity, Severity::Severe);
    }

    #[test]
    fn test_lookup_unknown_label_falls_back() {
        let kb = KnowledgeBase::builtin();
        assert!(!kb.contains("Corn___Common_rust"));

        let record = kb.lookup("Corn___Common_rust");
        assert_eq!(record.name, "Corn___Common_rust");
        assert_eq!(record.severity, Severity::Unknown);
        assert!(!record.treatment.is_empty());
        assert!(!record.prevention.is_empty());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
        let parsed: Severity = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, Severity::None);
    }

    #[test]
    fn test_new_rejects_duplicates_and_missing_records() {
        let record = DiseaseRecord::new("Leaf", Severity::None, "rest", "water");
        let mut info = BTreeMap::new();
        info.insert("a".to_string(), record.clone());

        assert!(KnowledgeBase::new(vec!["a".into(), "a".into()], info.clone()).is_err());
        assert!(KnowledgeBase::new(vec!["a".into(), "b".into()], info.clone()).is_err());
        assert!(KnowledgeBase::new(Vec::new(), info.clone()).is_err());
        assert!(KnowledgeBase::new(vec!["a".into()], info).is_ok());
    }

    #[test]
    fn test_new_rejects_blank_text() {
        let mut info = BTreeMap::new();
        info.insert(
            "a".to_string(),
            DiseaseRecord::new("Leaf", Severity::Moderate, "spray", "  "),
        );
        assert!(KnowledgeBase::new(vec!["a".into()], info).is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.json");

        let kb = KnowledgeBase::builtin();
        std::fs::write(&path, serde_json::to_string_pretty(&kb).unwrap()).unwrap();

        let loaded = KnowledgeBase::from_json_file(&path).unwrap();
        assert_eq!(loaded.labels(), kb.labels());
        assert_eq!(loaded.lookup("Tomato_Leaf_Mold"), kb.lookup("Tomato_Leaf_Mold"));
    }

    #[test]
    fn test_json_file_invalid_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.json");
        std::fs::write(&path, r#"{"classes": ["x"], "disease_info": {}}"#).unwrap();

        let err = KnowledgeBase::from_json_file(&path).unwrap_err();
        assert!(matches!(err, LeafDiseaseError::Config(_)));
    }
}
