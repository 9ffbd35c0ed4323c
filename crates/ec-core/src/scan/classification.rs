use serde::{Deserialize, Serialize};

/// Three-way material disposition assigned to a scanned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Reusable,
    #[serde(rename = "Non-Reusable", alias = "NonReusable")]
    NonReusable,
    Hazardous,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Reusable => "Reusable",
            Classification::NonReusable => "Non-Reusable",
            Classification::Hazardous => "Hazardous",
        }
    }
}

/// Creative project idea attached to a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Result of one classification call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub classification: Classification,
    pub reason: String,
    pub material_name: String,
    pub impact_message: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Which branches the decision point offers for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecisionOptions {
    pub creative: bool,
    pub disposal: bool,
}

impl ClassificationResult {
    pub fn is_hazardous(&self) -> bool {
        self.classification == Classification::Hazardous
    }

    /// Hazardous items never reach the creative branch; disposal is always offered.
    pub fn decision_options(&self) -> DecisionOptions {
        DecisionOptions {
            creative: !self.is_hazardous(),
            disposal: true,
        }
    }
}
