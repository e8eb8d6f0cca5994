use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::models::PortfolioAnalysis;
use crate::models::chat::ChatMessage;
use crate::models::portfolio::{
    Achievement, DetailedEducation, DetailedExperience, DetailedProject, Portfolio, Skill,
};
use crate::models::resume::GeneratedResume;
use crate::view::View;

/// Partial update addressed at one record. `data` is shallow-merged into the
/// existing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPatch {
    pub id: String,
    pub data: Value,
}

/// Every state transition the container accepts.
/// Wire form: `{"type": "ADD_SKILL", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZcvAction {
    LoadPortfolio(Portfolio),
    UpdatePortfolio(Value),
    /// Field-level merge into `personalInfo`.
    PatchPersonalInfo(Value),
    /// Field-level merge into `professionalSummary`.
    PatchSummary(Value),

    AddExperience(DetailedExperience),
    UpdateExperience(RecordPatch),
    DeleteExperience(String),

    AddProject(DetailedProject),
    UpdateProject(RecordPatch),
    DeleteProject(String),

    AddEducation(DetailedEducation),
    UpdateEducation(RecordPatch),
    DeleteEducation(String),

    AddSkill(Skill),
    UpdateSkill(RecordPatch),
    DeleteSkill(String),

    AddAchievement(Achievement),
    UpdateAchievement(RecordPatch),
    DeleteAchievement(String),

    AddResume(GeneratedResume),
    UpdateResume(RecordPatch),
    DeleteResume(String),
    SelectResume(String),
    RecordDownload(String),

    AddChatMessage(ChatMessage),
    ClearChat,

    SetView(View),
    SetFocus(String),
    SetGenerating(bool),
    SetTailoring(bool),
    UpdateAnalysis(PortfolioAnalysis),

    ExportPortfolio,
    ImportPortfolio(Portfolio),
}

impl ZcvAction {
    pub fn name(&self) -> &'static str {
        match self {
            ZcvAction::LoadPortfolio(_) => "LOAD_PORTFOLIO",
            ZcvAction::UpdatePortfolio(_) => "UPDATE_PORTFOLIO",
            ZcvAction::PatchPersonalInfo(_) => "PATCH_PERSONAL_INFO",
            ZcvAction::PatchSummary(_) => "PATCH_SUMMARY",
            ZcvAction::AddExperience(_) => "ADD_EXPERIENCE",
            ZcvAction::UpdateExperience(_) => "UPDATE_EXPERIENCE",
            ZcvAction::DeleteExperience(_) => "DELETE_EXPERIENCE",
            ZcvAction::AddProject(_) => "ADD_PROJECT",
            ZcvAction::UpdateProject(_) => "UPDATE_PROJECT",
            ZcvAction::DeleteProject(_) => "DELETE_PROJECT",
            ZcvAction::AddEducation(_) => "ADD_EDUCATION",
            ZcvAction::UpdateEducation(_) => "UPDATE_EDUCATION",
            ZcvAction::DeleteEducation(_) => "DELETE_EDUCATION",
            ZcvAction::AddSkill(_) => "ADD_SKILL",
            ZcvAction::UpdateSkill(_) => "UPDATE_SKILL",
            ZcvAction::DeleteSkill(_) => "DELETE_SKILL",
            ZcvAction::AddAchievement(_) => "ADD_ACHIEVEMENT",
            ZcvAction::UpdateAchievement(_) => "UPDATE_ACHIEVEMENT",
            ZcvAction::DeleteAchievement(_) => "DELETE_ACHIEVEMENT",
            ZcvAction::AddResume(_) => "ADD_RESUME",
            ZcvAction::UpdateResume(_) => "UPDATE_RESUME",
            ZcvAction::DeleteResume(_) => "DELETE_RESUME",
            ZcvAction::SelectResume(_) => "SELECT_RESUME",
            ZcvAction::RecordDownload(_) => "RECORD_DOWNLOAD",
            ZcvAction::AddChatMessage(_) => "ADD_CHAT_MESSAGE",
            ZcvAction::ClearChat => "CLEAR_CHAT",
            ZcvAction::SetView(_) => "SET_VIEW",
            ZcvAction::SetFocus(_) => "SET_FOCUS",
            ZcvAction::SetGenerating(_) => "SET_GENERATING",
            ZcvAction::SetTailoring(_) => "SET_TAILORING",
            ZcvAction::UpdateAnalysis(_) => "UPDATE_ANALYSIS",
            ZcvAction::ExportPortfolio => "EXPORT_PORTFOLIO",
            ZcvAction::ImportPortfolio(_) => "IMPORT_PORTFOLIO",
        }
    }

    /// True when the action can change the mirrored data (`portfolio`, `resumes`).
    pub fn touches_saved_data(&self) -> bool {
        !matches!(
            self,
            ZcvAction::SelectResume(_)
                | ZcvAction::AddChatMessage(_)
                | ZcvAction::ClearChat
                | ZcvAction::SetView(_)
                | ZcvAction::SetFocus(_)
                | ZcvAction::SetGenerating(_)
                | ZcvAction::SetTailoring(_)
                | ZcvAction::UpdateAnalysis(_)
                | ZcvAction::ExportPortfolio
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_format() {
        let action: ZcvAction = serde_json::from_value(serde_json::json!({
            "type": "UPDATE_SKILL",
            "payload": { "id": "Rust", "data": { "proficiency": "expert" } }
        }))
        .unwrap();
        match action {
            ZcvAction::UpdateSkill(patch) => {
                assert_eq!(patch.id, "Rust");
                assert_eq!(patch.data["proficiency"], "expert");
            }
            other => panic!("unexpected action {}", other.name()),
        }
    }

    #[test]
    fn test_unit_action_without_payload() {
        let action: ZcvAction =
            serde_json::from_value(serde_json::json!({ "type": "CLEAR_CHAT" })).unwrap();
        assert!(matches!(action, ZcvAction::ClearChat));
        assert!(!action.touches_saved_data());
    }

    #[test]
    fn test_add_payload_without_id() {
        let action: ZcvAction = serde_json::from_value(serde_json::json!({
            "type": "ADD_EXPERIENCE",
            "payload": { "title": "Engineer", "company": "Acme" }
        }))
        .unwrap();
        assert_eq!(action.name(), "ADD_EXPERIENCE");
        assert!(action.touches_saved_data());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result: Result<ZcvAction, _> =
            serde_json::from_value(serde_json::json!({ "type": "SET_ROLE", "payload": "sde" }));
        assert!(result.is_err());
    }
}
