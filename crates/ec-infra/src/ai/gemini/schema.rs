//! Response schemas sent with `generationConfig.responseSchema`.

use serde_json::{json, Value};

pub(crate) fn classification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "classification": {
                "type": "STRING",
                "enum": ["Reusable", "Non-Reusable", "Hazardous"]
            },
            "reason": { "type": "STRING" },
            "materialName": { "type": "STRING" },
            "impactMessage": { "type": "STRING" },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    }
                }
            }
        },
        "required": ["classification", "reason", "materialName", "impactMessage"]
    })
}

pub(crate) fn instruction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectName": { "type": "STRING" },
            "material": { "type": "STRING" },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "step": { "type": "INTEGER" },
                        "instruction": { "type": "STRING" },
                        "visualPrompt": { "type": "STRING" }
                    },
                    "required": ["step", "instruction", "visualPrompt"]
                }
            },
            "youtubeSearchQuery": { "type": "STRING" }
        },
        "required": ["projectName", "material", "steps", "youtubeSearchQuery"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_schema_enumerates_the_three_kinds() {
        let schema = classification_schema();
        assert_eq!(
            schema["properties"]["classification"]["enum"],
            json!(["Reusable", "Non-Reusable", "Hazardous"])
        );
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(!required.contains(&json!("suggestions")));
    }
}
