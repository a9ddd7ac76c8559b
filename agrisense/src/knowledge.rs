//! Static Knowledge Base
//!
//! Read-only lookup tables loaded once at startup: disease label to
//! explanatory text, verdict to explanatory text and asset key, crop name
//! to reference nutrient profile. Every table is validated for
//! completeness at load time, so no request can hit a missing key.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::disease::DISEASE_CLASSES;
use crate::error::{Error, Result};
use crate::fertilizer::{DeficiencyVerdict, NutrientProfile, VERDICT_KEYS};

/// Explanatory text and illustrative asset key for a verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictInfo {
    pub text: String,
    /// Illustrative asset key, e.g. "nhigh.jpg"
    pub asset: String,
}

/// One row of the fertilizer reference table
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    #[serde(rename = "Crop")]
    crop: String,
    #[serde(rename = "N")]
    n: i64,
    #[serde(rename = "P")]
    p: i64,
    #[serde(rename = "K")]
    k: i64,
}

/// The static lookup tables of the service
#[derive(Debug)]
pub struct KnowledgeBase {
    disease_texts: HashMap<String, String>,
    verdict_info: HashMap<DeficiencyVerdict, VerdictInfo>,
    profiles: HashMap<String, NutrientProfile>,
}

impl KnowledgeBase {
    /// Load and validate all tables. Any missing entry is fatal.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let disease_texts: HashMap<String, String> =
            serde_json::from_reader(open(&config.disease_info_path)?)?;
        let verdict_info: HashMap<DeficiencyVerdict, VerdictInfo> =
            serde_json::from_reader(open(&config.verdict_info_path)?)?;
        let profiles = parse_profiles(open(&config.fertilizer_table_path)?)?;

        let knowledge = Self::from_parts(disease_texts, verdict_info, profiles)?;
        info!(crops = knowledge.profiles.len(), "loaded knowledge base");
        Ok(knowledge)
    }

    /// Build from already-parsed tables, checking completeness.
    pub fn from_parts(
        disease_texts: HashMap<String, String>,
        verdict_info: HashMap<DeficiencyVerdict, VerdictInfo>,
        profiles: HashMap<String, NutrientProfile>,
    ) -> Result<Self> {
        for class in DISEASE_CLASSES {
            if !disease_texts.contains_key(class) {
                return Err(Error::ModelLoad(format!(
                    "disease explanation table is missing an entry for '{}'",
                    class
                )));
            }
        }
        for verdict in VERDICT_KEYS {
            if !verdict_info.contains_key(&verdict) {
                return Err(Error::ModelLoad(format!(
                    "verdict explanation table is missing an entry for '{}'",
                    verdict.key()
                )));
            }
        }
        if profiles.is_empty() {
            return Err(Error::ModelLoad(
                "fertilizer reference table has no rows".to_string(),
            ));
        }

        Ok(Self {
            disease_texts,
            verdict_info,
            profiles,
        })
    }

    /// Explanatory text for a disease label.
    ///
    /// Coverage is validated at load time; a miss here is an internal
    /// invariant violation, not a user error.
    pub fn disease_text(&self, label: &str) -> Result<&str> {
        self.disease_texts
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| Error::Internal(format!("no explanation for disease '{}'", label)))
    }

    /// Explanatory text and asset key for a verdict
    pub fn verdict_info(&self, verdict: DeficiencyVerdict) -> Result<&VerdictInfo> {
        self.verdict_info
            .get(&verdict)
            .ok_or_else(|| Error::Internal(format!("no explanation for verdict '{}'", verdict)))
    }

    /// Reference nutrient profile for a crop; absence is a lookup failure.
    pub fn profile(&self, crop: &str) -> Result<&NutrientProfile> {
        self.profiles
            .get(crop)
            .ok_or_else(|| Error::UnknownCrop(crop.to_string()))
    }
}

fn open(path: &std::path::Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| Error::ModelLoad(format!("cannot open {:?}: {}", path, e)))?;
    Ok(BufReader::new(file))
}

/// Parse the CSV reference table (columns Crop,N,P,K)
fn parse_profiles(reader: impl Read) -> Result<HashMap<String, NutrientProfile>> {
    let mut profiles = HashMap::new();
    let mut csv_reader = csv::Reader::from_reader(reader);

    for record in csv_reader.deserialize() {
        let record: ProfileRecord = record
            .map_err(|e| Error::ModelLoad(format!("fertilizer reference table: {}", e)))?;
        profiles.insert(
            record.crop,
            NutrientProfile {
                n: record.n,
                p: record.p,
                k: record.k,
            },
        );
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_disease_texts() -> HashMap<String, String> {
        DISEASE_CLASSES
            .iter()
            .map(|&class| (class.to_string(), format!("About {}", class)))
            .collect()
    }

    fn full_verdict_info() -> HashMap<DeficiencyVerdict, VerdictInfo> {
        VERDICT_KEYS
            .iter()
            .map(|&verdict| {
                (
                    verdict,
                    VerdictInfo {
                        text: format!("Advice for {}", verdict),
                        asset: format!("{}.jpg", verdict.key().to_lowercase()),
                    },
                )
            })
            .collect()
    }

    fn some_profiles() -> HashMap<String, NutrientProfile> {
        let mut profiles = HashMap::new();
        profiles.insert("rice".to_string(), NutrientProfile { n: 80, p: 40, k: 40 });
        profiles.insert("maize".to_string(), NutrientProfile { n: 80, p: 40, k: 20 });
        profiles
    }

    #[test]
    fn test_complete_tables_validate() {
        let knowledge =
            KnowledgeBase::from_parts(full_disease_texts(), full_verdict_info(), some_profiles())
                .unwrap();

        assert_eq!(knowledge.profile("rice").unwrap().n, 80);
        assert!(knowledge
            .disease_text("Apple___Apple_scab")
            .unwrap()
            .contains("Apple"));
        assert_eq!(
            knowledge.verdict_info(DeficiencyVerdict::NHigh).unwrap().asset,
            "nhigh.jpg"
        );
    }

    #[test]
    fn test_missing_disease_entry_is_fatal() {
        let mut texts = full_disease_texts();
        texts.remove("Tomato___healthy");

        let err = KnowledgeBase::from_parts(texts, full_verdict_info(), some_profiles())
            .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
        assert!(err.to_string().contains("Tomato___healthy"));
    }

    #[test]
    fn test_missing_verdict_entry_is_fatal() {
        let mut info = full_verdict_info();
        info.remove(&DeficiencyVerdict::KLow);

        let err = KnowledgeBase::from_parts(full_disease_texts(), info, some_profiles())
            .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
        assert!(err.to_string().contains("Klow"));
    }

    #[test]
    fn test_empty_profile_table_is_fatal() {
        let err =
            KnowledgeBase::from_parts(full_disease_texts(), full_verdict_info(), HashMap::new())
                .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_unknown_crop_lookup_fails() {
        let knowledge =
            KnowledgeBase::from_parts(full_disease_texts(), full_verdict_info(), some_profiles())
                .unwrap();

        let err = knowledge.profile("unobtainium").unwrap_err();
        assert!(matches!(err, Error::UnknownCrop(_)));
    }

    #[test]
    fn test_parse_profiles_from_csv() {
        let csv_bytes = "Crop,N,P,K\nrice,80,40,40\ncoffee,100,20,30\n".as_bytes();
        let profiles = parse_profiles(csv_bytes).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["coffee"], NutrientProfile { n: 100, p: 20, k: 30 });
    }

    #[test]
    fn test_parse_profiles_rejects_malformed_row() {
        let csv_bytes = "Crop,N,P,K\nrice,eighty,40,40\n".as_bytes();
        let err = parse_profiles(csv_bytes).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_verdict_table_deserializes_from_json() {
        let json = r#"{
            "NHigh": {"text": "too much nitrogen", "asset": "nhigh.jpg"},
            "Nlow": {"text": "not enough nitrogen", "asset": "nlow.jpg"}
        }"#;
        let table: HashMap<DeficiencyVerdict, VerdictInfo> = serde_json::from_str(json).unwrap();

        assert_eq!(table[&DeficiencyVerdict::NHigh].asset, "nhigh.jpg");
        assert_eq!(table[&DeficiencyVerdict::NLow].text, "not enough nitrogen");
    }
}
