use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

const CATALOG_JSON: &str = include_str!("../../assets/case_frameworks.json");

#[derive(Clone, Debug, Deserialize)]
pub struct Industry {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Framework {
    pub steps: Vec<String>,
    pub key_areas: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CaseType {
    /// Catalog key; filled in from the map key during deserialization.
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub duration: String,
    pub difficulty: String,
    pub description: String,
    pub when_used: String,
    pub framework: Framework,
    pub clarifying_questions: Vec<String>,
    pub common_pitfalls: Vec<String>,
    pub example_prompt: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ComboCase {
    pub name: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Deserialize)]
pub struct CaseCatalog {
    pub industries: Vec<Industry>,
    #[serde(deserialize_with = "case_types_in_order")]
    pub case_types: Vec<CaseType>,
    pub industry_relevance: HashMap<String, Vec<String>>,
    pub combo_cases: Vec<ComboCase>,
}

impl CaseCatalog {
    pub fn load() -> Result<Self> {
        serde_json::from_str(CATALOG_JSON).context("parsing bundled case framework catalog")
    }

    pub fn case_by_id(&self, id: &str) -> Option<&CaseType> {
        self.case_types.iter().find(|c| c.id == id)
    }

    /// Case type ids considered especially relevant for an industry.
    /// Unknown industries have no relevance data and return an empty slice.
    pub fn relevant_case_ids(&self, industry_id: &str) -> &[String] {
        self.industry_relevance
            .get(industry_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Deserialize the `case_types` map keeping document order. Weak-spot
/// reporting lists case types in catalog order, so the order the file was
/// authored in must survive parsing.
fn case_types_in_order<'de, D>(deserializer: D) -> Result<Vec<CaseType>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedCases;

    impl<'de> Visitor<'de> for OrderedCases {
        type Value = Vec<CaseType>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of case type id to case type")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut cases = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, mut case)) = map.next_entry::<String, CaseType>()? {
                case.id = id;
                cases.push(case);
            }
            Ok(cases)
        }
    }

    deserializer.deserialize_map(OrderedCases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = CaseCatalog::load().unwrap();
        assert!(!catalog.industries.is_empty());
        assert!(!catalog.case_types.is_empty());
        assert!(!catalog.combo_cases.is_empty());
    }

    #[test]
    fn case_types_keep_document_order() {
        let json = r#"{
            "industries": [],
            "case_types": {
                "zeta": {
                    "name": "Zeta", "category": "strategy", "duration": "20 min",
                    "difficulty": "Easy", "description": "", "when_used": "",
                    "framework": {"steps": [], "key_areas": []},
                    "clarifying_questions": [], "common_pitfalls": [],
                    "example_prompt": ""
                },
                "alpha": {
                    "name": "Alpha", "category": "strategy", "duration": "20 min",
                    "difficulty": "Easy", "description": "", "when_used": "",
                    "framework": {"steps": [], "key_areas": []},
                    "clarifying_questions": [], "common_pitfalls": [],
                    "example_prompt": ""
                }
            },
            "industry_relevance": {},
            "combo_cases": []
        }"#;
        let catalog: CaseCatalog = serde_json::from_str(json).unwrap();
        // Document order, not alphabetical
        assert_eq!(catalog.case_types[0].id, "zeta");
        assert_eq!(catalog.case_types[1].id, "alpha");
    }

    #[test]
    fn case_ids_are_filled_from_map_keys() {
        let catalog = CaseCatalog::load().unwrap();
        for case in &catalog.case_types {
            assert!(!case.id.is_empty());
            assert_eq!(catalog.case_by_id(&case.id).unwrap().name, case.name);
        }
    }

    #[test]
    fn relevance_ids_refer_to_real_cases() {
        let catalog = CaseCatalog::load().unwrap();
        for industry in &catalog.industries {
            for id in catalog.relevant_case_ids(&industry.id) {
                assert!(
                    catalog.case_by_id(id).is_some(),
                    "dangling relevance id {id}"
                );
            }
        }
    }

    #[test]
    fn unknown_industry_has_no_relevant_cases() {
        let catalog = CaseCatalog::load().unwrap();
        assert!(catalog.relevant_case_ids("atlantis").is_empty());
    }
}
