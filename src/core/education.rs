use serde::{Deserialize, Serialize};

use crate::core::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EducationCategory {
    #[serde(rename = "type", default)]
    pub category_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub indicators: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MitigationItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MitigationContent {
    #[serde(default)]
    pub individual: Vec<MitigationItem>,
    #[serde(default)]
    pub organization: Vec<MitigationItem>,
}

impl MitigationContent {
    pub fn is_empty(&self) -> bool {
        self.individual.is_empty() && self.organization.is_empty()
    }
}
