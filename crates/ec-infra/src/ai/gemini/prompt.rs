//! Prompt text for the two generateContent calls.

use ec_core::scan::InstructionRequest;
use ec_core::Language;

pub(crate) fn classification_prompt(language: Language) -> String {
    format!(
        "Analyze this object for an upcycling and recycling app.

Classify it into exactly one category:
- 'Reusable': suitable for creative DIY crafts, upcycling projects or repurposing (for example plastic bottles, jars, cardboard).
- 'Non-Reusable': too small, soiled or structurally unfit for any reuse or upcycling.
- 'Hazardous': lab glassware, medical waste, chemical containers or electronic waste.

Policy: a plastic bottle or container (such as PET) may be single-use for drinking, but it is highly reusable for crafts like planters and lamps. Classify standard household plastic containers and bottles as 'Reusable' unless they are contaminated or hazardous.

Provide:
1. classification: 'Reusable', 'Non-Reusable' or 'Hazardous'.
2. reason: why it is good for upcycling, or why it is hazardous.
3. materialName: the common name of the item.
4. impactMessage: a short, encouraging environmental impact fact.
5. suggestions: an array of {{title, description}} creative project ideas.

Respond in {}. Return JSON.",
        language.prompt_name()
    )
}

pub(crate) fn instruction_prompt(request: &InstructionRequest, language: Language) -> String {
    format!(
        "Provide step-by-step instructions to make a \"{}\" from a \"{}\" using ONLY these tools: {}. \
Respond in {}. Return a JSON object with projectName, material, steps (step number, instruction, \
and a short visualPrompt describing an illustration of the step), and a youtubeSearchQuery for \
finding video tutorials.",
        request.project_name,
        request.material_name,
        request.tools.joined(),
        language.prompt_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::scan::{Tool, ToolSelection};

    #[test]
    fn classification_prompt_names_response_language() {
        assert!(classification_prompt(Language::Ta).ends_with("Respond in Tamil. Return JSON."));
        assert!(classification_prompt(Language::En).contains("'Hazardous'"));
    }

    #[test]
    fn instruction_prompt_lists_only_selected_tools() {
        let request = InstructionRequest::new(
            "PET Bottle",
            None,
            ToolSelection::new([Tool::Glue, Tool::Scissors]).unwrap(),
        );
        let prompt = instruction_prompt(&request, Language::En);
        assert!(prompt.contains("make a \"Upcycled Craft\" from a \"PET Bottle\""));
        assert!(prompt.contains("ONLY these tools: Scissors, Glue."));
        assert!(prompt.contains("Respond in English."));
    }
}
