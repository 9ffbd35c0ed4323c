//! Safe disposal guide.
//!
//! Static content, no network call. The guide is the fallback branch and is
//! built for every classification kind.

use serde::Serialize;

use crate::i18n::DisposalText;
use crate::language::Language;
use crate::scan::ClassificationResult;

/// One numbered disposal step. `number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisposalStep {
    pub number: u32,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisposalGuide {
    pub material_name: String,
    pub title: &'static str,
    pub steps: Vec<DisposalStep>,
    pub warning: &'static str,
    pub impact: &'static str,
    pub acknowledge: &'static str,
}

impl DisposalGuide {
    pub fn new(result: &ClassificationResult, lang: Language) -> Self {
        let text = DisposalText::for_language(lang);
        Self {
            material_name: result.material_name.clone(),
            title: text.title,
            steps: text
                .steps
                .iter()
                .copied()
                .zip(1u32..)
                .map(|(text, number)| DisposalStep { number, text })
                .collect(),
            warning: text.warning,
            impact: text.impact,
            acknowledge: text.btn,
        }
    }

    /// Text read aloud when the guide opens.
    pub fn narration(&self) -> String {
        let steps: Vec<&str> = self.steps.iter().map(|s| s.text).collect();
        format!("{}. {}", self.title, steps.join(" "))
    }
}
