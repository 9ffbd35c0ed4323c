use crate::language::Language;

/// Safe disposal guide. The step list is fixed and identical for every
/// classification.
#[derive(Debug, PartialEq, Eq)]
pub struct DisposalText {
    pub title: &'static str,
    pub steps: [&'static str; 4],
    pub warning: &'static str,
    pub impact: &'static str,
    pub btn: &'static str,
    pub back: &'static str,
}

static EN: DisposalText = DisposalText {
    title: "Safe Disposal Guide",
    steps: [
        "Empty and Rinse the container.",
        "Remove caps and separate labels.",
        "Check for the recycling symbol (1-7).",
        "Place in the designated BLUE collection bin.",
    ],
    warning: "Environmental Warning",
    impact: "Improper disposal leads to microplastics in oceans and harms marine life.",
    btn: "Got it!",
    back: "Back",
};

static TA: DisposalText = DisposalText {
    title: "பாதுகாப்பான அகற்றும் வழிகாட்டி",
    steps: [
        "கொள்கலனை காலி செய்து துவைக்கவும்.",
        "மூடிகளை அகற்றி லேபிள்களை பிரிக்கவும்.",
        "மறுசுழற்சி சின்னத்தை (1-7) சரிபார்க்கவும்.",
        "குறிப்பிடப்பட்ட நீலநிற சேகரிப்பு தொட்டியில் போடவும்.",
    ],
    warning: "சுற்றுச்சூழல் எச்சரிக்கை",
    impact: "தவறான முறையில் அகற்றுவது கடல்களில் நுண் பிளாஸ்டிக்குகளை உருவாக்கி கடல் வாழ் உயிரினங்களுக்கு தீங்கு விளைவிக்கிறது.",
    btn: "சரி!",
    back: "பின்செல்",
};

impl DisposalText {
    pub fn for_language(lang: Language) -> &'static DisposalText {
        match lang {
            Language::En => &EN,
            Language::Ta => &TA,
        }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> Vec<&'static str> {
        let mut fields = vec![self.title, self.warning, self.impact, self.btn, self.back];
        fields.extend(self.steps);
        fields
    }
}
