use serde::{Deserialize, Serialize};

use crate::models::chat::ChatMessage;
use crate::models::portfolio::Portfolio;
use crate::models::resume::GeneratedResume;
use crate::view::View;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioAnalysis {
    pub completeness: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Everything the state container owns. Only `portfolio` and `resumes` are
/// mirrored to local storage; the rest is session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZcvState {
    pub portfolio: Portfolio,
    pub resumes: Vec<GeneratedResume>,

    pub chat_messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_focus: Option<String>,

    pub current_view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_resume_id: Option<String>,

    pub is_generating: bool,
    pub is_tailoring: bool,

    pub portfolio_analysis: PortfolioAnalysis,
}

impl ZcvState {
    pub fn resume(&self, id: &str) -> Option<&GeneratedResume> {
        self.resumes.iter().find(|r| r.id == id)
    }
}
