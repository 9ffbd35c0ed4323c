use crate::language::Language;
use crate::scan::Classification;

/// Capture and decision screen.
#[derive(Debug, PartialEq, Eq)]
pub struct ScanText {
    pub title: &'static str,
    pub prompt: &'static str,
    pub sub: &'static str,
    pub analyzing: &'static str,
    pub fact: &'static str,
    pub question: &'static str,
    pub creative: &'static str,
    pub disposal: &'static str,
    pub safe: &'static str,
    pub warning: &'static str,
    pub non_reusable: &'static str,
    pub back: &'static str,
}

static EN: ScanText = ScanText {
    title: "Identify Material",
    prompt: "Snap or Upload Image",
    sub: "Take a clear photo",
    analyzing: "Analyzing...",
    fact: "Did you know?",
    question: "What would you like to do?",
    creative: "Creative Reuse",
    disposal: "Disposal Guide",
    safe: "Safe to reuse!",
    warning: "Hazardous material!",
    non_reusable: "Non-Reusable",
    back: "Back",
};

static TA: ScanText = ScanText {
    title: "பொருளை அடையாளம் காணவும்",
    prompt: "புகைப்படம் எடுக்கவும்",
    sub: "தெளிவான படத்தை எடுக்கவும்",
    analyzing: "ஆராய்கிறது...",
    fact: "உங்களுக்குத் தெரியுமா?",
    question: "நீங்கள் என்ன செய்ய விரும்புகிறீர்கள்?",
    creative: "படைப்பு மறுபயன்பாடு",
    disposal: "அகற்றும் வழிகாட்டி",
    safe: "மீண்டும் பயன்படுத்த பாதுகாப்பானது!",
    warning: "ஆபத்தான பொருள்!",
    non_reusable: "மீண்டும் பயன்படுத்த முடியாது",
    back: "பின்செல்",
};

impl ScanText {
    pub fn for_language(lang: Language) -> &'static ScanText {
        match lang {
            Language::En => &EN,
            Language::Ta => &TA,
        }
    }

    /// Status line shown above a classification card.
    pub fn headline(&self, classification: Classification) -> &'static str {
        match classification {
            Classification::Reusable => self.safe,
            Classification::NonReusable => self.non_reusable,
            Classification::Hazardous => self.warning,
        }
    }

    /// Narration for the classified screen.
    pub fn fact_narration(&self, impact_message: &str) -> String {
        format!("{}. {}", self.fact, impact_message)
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> Vec<&'static str> {
        vec![
            self.title,
            self.prompt,
            self.sub,
            self.analyzing,
            self.fact,
            self.question,
            self.creative,
            self.disposal,
            self.safe,
            self.warning,
            self.non_reusable,
            self.back,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_follows_classification() {
        let t = ScanText::for_language(Language::En);
        assert_eq!(t.headline(Classification::Reusable), "Safe to reuse!");
        assert_eq!(t.headline(Classification::Hazardous), "Hazardous material!");
        assert_eq!(t.headline(Classification::NonReusable), "Non-Reusable");
    }

    #[test]
    fn fact_narration_prefixes_label() {
        let t = ScanText::for_language(Language::En);
        assert_eq!(
            t.fact_narration("Recycling saves energy."),
            "Did you know?. Recycling saves energy."
        );
    }
}
