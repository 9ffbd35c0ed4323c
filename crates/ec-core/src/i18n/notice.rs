use crate::language::Language;
use crate::scan::{AiFailure, ScanNotice};

/// Recovered-failure notices.
#[derive(Debug, PartialEq, Eq)]
pub struct NoticeText {
    pub image_unreadable: &'static str,
    pub classification_failed: &'static str,
    pub instructions_failed: &'static str,
    pub transport: &'static str,
    pub malformed: &'static str,
    pub retry: &'static str,
}

static EN: NoticeText = NoticeText {
    image_unreadable: "Could not read that image.",
    classification_failed: "Error analyzing image.",
    instructions_failed: "Could not create the blueprint.",
    transport: "The AI service could not be reached.",
    malformed: "The AI service sent an unexpected answer.",
    retry: "Try again",
};

static TA: NoticeText = NoticeText {
    image_unreadable: "அந்தப் படத்தைப் படிக்க முடியவில்லை.",
    classification_failed: "படத்தை ஆய்வு செய்வதில் பிழை.",
    instructions_failed: "திட்டத்தை உருவாக்க முடியவில்லை.",
    transport: "AI சேவையை அணுக முடியவில்லை.",
    malformed: "AI சேவையிலிருந்து எதிர்பாராத பதில் வந்தது.",
    retry: "மீண்டும் முயற்சிக்கவும்",
};

impl NoticeText {
    pub fn for_language(lang: Language) -> &'static NoticeText {
        match lang {
            Language::En => &EN,
            Language::Ta => &TA,
        }
    }

    fn cause(&self, cause: AiFailure) -> &'static str {
        match cause {
            AiFailure::Transport => self.transport,
            AiFailure::MalformedResponse => self.malformed,
        }
    }

    pub fn message(&self, notice: ScanNotice) -> String {
        match notice {
            ScanNotice::ImageUnreadable => self.image_unreadable.to_string(),
            ScanNotice::ClassificationFailed { cause } => {
                format!("{} {}", self.classification_failed, self.cause(cause))
            }
            ScanNotice::InstructionsFailed { cause } => {
                format!("{} {}", self.instructions_failed, self.cause(cause))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> Vec<&'static str> {
        vec![
            self.image_unreadable,
            self.classification_failed,
            self.instructions_failed,
            self.transport,
            self.malformed,
            self.retry,
        ]
    }
}
