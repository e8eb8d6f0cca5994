use serde::{Deserialize, Serialize};

/// Discovery phases, visited strictly in order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatPhase {
    #[default]
    Intro,
    Background,
    Experiences,
    Projects,
    Skills,
    Complete,
}

impl ChatPhase {
    pub const ALL: [ChatPhase; 6] = [
        ChatPhase::Intro,
        ChatPhase::Background,
        ChatPhase::Experiences,
        ChatPhase::Projects,
        ChatPhase::Skills,
        ChatPhase::Complete,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// `None` once complete.
    pub fn next(self) -> Option<ChatPhase> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Percentage through the session; intro already counts as the first step.
    pub fn progress(self) -> f64 {
        (self.index() + 1) as f64 / Self::ALL.len() as f64 * 100.0
    }

    /// Banner shown once the phase is entered. Intro has none.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ChatPhase::Intro => None,
            ChatPhase::Background => {
                Some("Great start! Now let's dive deeper into your background...")
            }
            ChatPhase::Experiences => {
                Some("Excellent! Let's explore your work experiences in detail...")
            }
            ChatPhase::Projects => {
                Some("Fantastic! Now tell me about some projects you've worked on...")
            }
            ChatPhase::Skills => Some("Perfect! Let's identify and organize your skills..."),
            ChatPhase::Complete => {
                Some("Amazing work! Your profile is taking shape beautifully! 🎉")
            }
        }
    }
}
