use crate::language::Language;

/// Tool picker and stepper screen.
#[derive(Debug, PartialEq, Eq)]
pub struct CreativeText {
    pub tools: &'static str,
    pub btn: &'static str,
    pub step: &'static str,
    pub completed: &'static str,
    pub videos: &'static str,
    pub back: &'static str,
    pub select_tool: &'static str,
}

static EN: CreativeText = CreativeText {
    tools: "What tools do you have?",
    btn: "Get Blueprint",
    step: "Step",
    completed: "Project Done!",
    videos: "YouTube DIY Videos",
    back: "Back",
    select_tool: "Select at least one tool!",
};

static TA: CreativeText = CreativeText {
    tools: "உங்களிடம் என்ன கருவிகள் உள்ளன?",
    btn: "திட்டத்தைப் பெறுங்கள்",
    step: "படி",
    completed: "திட்டம் முடிந்தது!",
    videos: "யூடியூப் வீடியோக்கள்",
    back: "பின்செல்",
    select_tool: "குறைந்தது ஒரு கருவியைத் தேர்ந்தெடுக்கவும்!",
};

impl CreativeText {
    pub fn for_language(lang: Language) -> &'static CreativeText {
        match lang {
            Language::En => &EN,
            Language::Ta => &TA,
        }
    }

    /// "Step 2 / 5" style counter.
    pub fn step_counter(&self, index: usize, len: usize) -> String {
        format!("{} {} / {}", self.step, index + 1, len)
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> Vec<&'static str> {
        vec![
            self.tools,
            self.btn,
            self.step,
            self.completed,
            self.videos,
            self.back,
            self.select_tool,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_counter_is_one_based() {
        assert_eq!(CreativeText::for_language(Language::En).step_counter(0, 3), "Step 1 / 3");
        assert_eq!(CreativeText::for_language(Language::Ta).step_counter(2, 3), "படி 3 / 3");
    }
}
