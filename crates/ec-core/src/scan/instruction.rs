use serde::Serialize;
use thiserror::Error;

use crate::scan::ToolSelection;

/// Project name used when the user does not pick one.
pub const DEFAULT_PROJECT_NAME: &str = "Upcycled Craft";

/// One generated craft step. `step` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReuseStep {
    pub step: u32,
    pub instruction: String,
    pub visual_prompt: String,
}

/// Step content before numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    pub instruction: String,
    pub visual_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    #[error("instruction set has no steps")]
    NoSteps,
}

/// Generated blueprint. Steps are numbered 1..=N with no gaps by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReuseInstruction {
    project_name: String,
    material: String,
    steps: Vec<ReuseStep>,
    search_query: String,
}

impl ReuseInstruction {
    /// Builds an instruction set, numbering the steps in the order given.
    pub fn from_ordered_steps(
        project_name: impl Into<String>,
        material: impl Into<String>,
        drafts: Vec<StepDraft>,
        search_query: impl Into<String>,
    ) -> Result<Self, InstructionError> {
        if drafts.is_empty() {
            return Err(InstructionError::NoSteps);
        }
        let steps = drafts
            .into_iter()
            .zip(1u32..)
            .map(|(draft, step)| ReuseStep {
                step,
                instruction: draft.instruction,
                visual_prompt: draft.visual_prompt,
            })
            .collect();
        Ok(Self {
            project_name: project_name.into(),
            material: material.into(),
            steps,
            search_query: search_query.into(),
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn steps(&self) -> &[ReuseStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Query for external video tutorials; passed through untouched.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }
}

/// Input of one "generate blueprint" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRequest {
    pub material_name: String,
    pub project_name: String,
    pub tools: ToolSelection,
}

impl InstructionRequest {
    pub fn new(material_name: impl Into<String>, project_name: Option<String>, tools: ToolSelection) -> Self {
        let project_name = project_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        Self {
            material_name: material_name.into(),
            project_name,
            tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Tool;

    fn drafts(n: usize) -> Vec<StepDraft> {
        (0..n)
            .map(|i| StepDraft {
                instruction: format!("do {i}"),
                visual_prompt: format!("picture {i}"),
            })
            .collect()
    }

    #[test]
    fn steps_are_numbered_contiguously_from_one() {
        for n in 1..6 {
            let instruction =
                ReuseInstruction::from_ordered_steps("Lamp", "PET Bottle", drafts(n), "q").unwrap();
            let numbers: Vec<u32> = instruction.steps().iter().map(|s| s.step).collect();
            let expected: Vec<u32> = (1..=n as u32).collect();
            assert_eq!(numbers, expected);
            assert_eq!(instruction.len(), n);
        }
    }

    #[test]
    fn empty_step_list_is_rejected() {
        assert_eq!(
            ReuseInstruction::from_ordered_steps("Lamp", "PET Bottle", Vec::new(), "q").unwrap_err(),
            InstructionError::NoSteps
        );
    }

    #[test]
    fn request_falls_back_to_default_project_name() {
        let tools = ToolSelection::new([Tool::Glue]).unwrap();
        let request = InstructionRequest::new("PET Bottle", Some("  ".into()), tools.clone());
        assert_eq!(request.project_name, DEFAULT_PROJECT_NAME);

        let request = InstructionRequest::new("PET Bottle", Some("Planter".into()), tools);
        assert_eq!(request.project_name, "Planter");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let instruction =
            ReuseInstruction::from_ordered_steps("Lamp", "PET Bottle", drafts(1), "bottle lamp diy")
                .unwrap();
        let value = serde_json::to_value(&instruction).unwrap();
        assert_eq!(value["projectName"], "Lamp");
        assert_eq!(value["searchQuery"], "bottle lamp diy");
        assert_eq!(value["steps"][0]["step"], 1);
        assert_eq!(value["steps"][0]["visualPrompt"], "picture 0");
    }
}
