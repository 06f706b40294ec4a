//! Small-talk detection and canned replies.
//!
//! Checked before the analysis pipeline runs. Patterns are anchored to the
//! whole message so that "hi, I have chest pain" is still analyzed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:hi|hello|hey|hiya|howdy|greetings|good (?:morning|afternoon|evening))(?: there)?[\s!.,]*$")
        .expect("greeting pattern is a valid regex")
});

static THANKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:thanks|thank you|thx|ty|cheers)(?: (?:so much|a lot|very much))?[\s!.,]*$")
        .expect("thanks pattern is a valid regex")
});

static FAREWELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:bye|goodbye|bye bye|see you|see ya|take care|good night)(?: later)?[\s!.,]*$")
        .expect("farewell pattern is a valid regex")
});

static CAPABILITIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:what can you do|what do you do|how does this work|how do you work|what are you|help)[\s?!.]*$")
        .expect("capabilities pattern is a valid regex")
});

/// Conversational messages that are answered without analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallTalk {
    Greeting,
    Thanks,
    Farewell,
    Capabilities,
}

impl SmallTalk {
    /// Returns the kind of small talk, or `None` when the message should be analyzed.
    pub fn detect(message: &str) -> Option<Self> {
        let text = message.trim().to_lowercase().replace('\u{2019}', "'");

        if GREETING.is_match(&text) {
            Some(SmallTalk::Greeting)
        } else if THANKS.is_match(&text) {
            Some(SmallTalk::Thanks)
        } else if FAREWELL.is_match(&text) {
            Some(SmallTalk::Farewell)
        } else if CAPABILITIES.is_match(&text) {
            Some(SmallTalk::Capabilities)
        } else {
            None
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            SmallTalk::Greeting => {
                "Hello! I'm your symptom guide. Tell me what you're experiencing - for example, \
                 \"I have a headache and a mild fever\" - and I'll share possible causes, \
                 how urgent it looks, and trusted sources to read."
            }
            SmallTalk::Thanks => {
                "You're welcome! I hope you feel better soon. If anything changes or new \
                 symptoms appear, just tell me. And please reach out to a healthcare provider \
                 if you're worried."
            }
            SmallTalk::Farewell => {
                "Take care! Remember to seek medical help if your symptoms get worse. \
                 I'm here whenever you need me."
            }
            SmallTalk::Capabilities => {
                "I can help you make sense of symptoms. Describe how you feel and I'll:\n\
                 - suggest conditions that are commonly associated with those symptoms\n\
                 - estimate how urgently you should seek care\n\
                 - offer self-care tips when it's safe to do so\n\
                 - link trusted medical sources\n\n\
                 I'm not a doctor, and my answers are not a diagnosis."
            }
        }
    }
}
