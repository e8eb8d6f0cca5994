//! The reducer: applies one `ZcvAction` to `ZcvState`.
//!
//! Every action is validated before anything is written, so a rejected action
//! leaves the state untouched. Portfolio mutations always end in `touch_portfolio`,
//! which bumps `updatedAt` and recomputes completeness and analysis.

use std::collections::HashSet;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::context::actions::{RecordPatch, ZcvAction};
use crate::context::completeness::{analyze_portfolio, calculate_completeness};
use crate::context::models::ZcvState;
use crate::context::validation::{compact_list, validate_skill_name};
use crate::errors::AppError;
use crate::models::portfolio::{
    Achievement, DetailedEducation, DetailedExperience, DetailedProject, Portfolio, Skill,
};
use crate::models::resume::GeneratedResume;

/// A record living in one of the ordered collections, addressed by `key()`.
pub trait Keyed: Clone + Serialize + DeserializeOwned {
    const KIND: &'static str;

    fn key(&self) -> &str;

    /// Prepares a freshly added record. Records with generated ids get a new one.
    fn assign_key(&mut self) -> Result<(), AppError>;

    /// Puts the original key back after a patch is merged. Skills may be
    /// renamed, so theirs is a no-op.
    fn restore_key(&mut self, key: &str);

    fn normalize(&mut self) {}
}

macro_rules! impl_keyed_by_id {
    ($ty:ty, $kind:literal) => {
        impl_keyed_by_id!($ty, $kind, |_record: &mut $ty| {});
    };
    ($ty:ty, $kind:literal, $normalize:expr) => {
        impl Keyed for $ty {
            const KIND: &'static str = $kind;

            fn key(&self) -> &str {
                &self.id
            }

            fn assign_key(&mut self) -> Result<(), AppError> {
                self.id = Uuid::new_v4().to_string();
                Ok(())
            }

            fn restore_key(&mut self, key: &str) {
                self.id = key.to_string();
            }

            fn normalize(&mut self) {
                let normalize: fn(&mut $ty) = $normalize;
                normalize(self);
            }
        }
    };
}

impl_keyed_by_id!(DetailedExperience, "experience", |exp: &mut DetailedExperience| {
    compact_list(&mut exp.achievements);
    compact_list(&mut exp.technologies);
    compact_list(&mut exp.responsibilities);
    compact_list(&mut exp.metrics);
});
impl_keyed_by_id!(DetailedProject, "project", |proj: &mut DetailedProject| {
    compact_list(&mut proj.technologies);
    compact_list(&mut proj.outcomes);
    compact_list(&mut proj.metrics);
});
impl_keyed_by_id!(DetailedEducation, "education");
impl_keyed_by_id!(Achievement, "achievement", |ach: &mut Achievement| {
    compact_list(&mut ach.skills);
});
impl_keyed_by_id!(GeneratedResume, "resume");

impl Keyed for Skill {
    const KIND: &'static str = "skill";

    fn key(&self) -> &str {
        &self.name
    }

    fn assign_key(&mut self) -> Result<(), AppError> {
        validate_skill_name(&self.name)?;
        self.name = self.name.trim().to_string();
        Ok(())
    }

    fn restore_key(&mut self, _key: &str) {}

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        compact_list(&mut self.acquired_from);
        compact_list(&mut self.projects);
    }
}

/// Shallow-merges the keys of `patch` into the serialized form of `current`,
/// mirroring `{ ...current, ...patch }`.
pub fn merge_patch<T: Serialize + DeserializeOwned>(current: &T, patch: Value) -> Result<T, AppError> {
    let Value::Object(patch) = patch else {
        return Err(AppError::Validation(
            "Update payload must be a JSON object".to_string(),
        ));
    };
    let mut merged = serde_json::to_value(current)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize record: {e}")))?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(patch);
    }
    serde_json::from_value(merged)
        .map_err(|e| AppError::Validation(format!("Invalid update payload: {e}")))
}

fn ensure_unique<T: Keyed>(records: &[T], key: &str, skip: Option<usize>) -> Result<(), AppError> {
    let clash = records
        .iter()
        .enumerate()
        .any(|(i, r)| Some(i) != skip && r.key() == key);
    if clash {
        return Err(AppError::Conflict(format!(
            "A {} named '{}' already exists",
            T::KIND,
            key
        )));
    }
    Ok(())
}

fn position<T: Keyed>(records: &[T], key: &str) -> Result<usize, AppError> {
    records
        .iter()
        .position(|r| r.key() == key)
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", T::KIND, key)))
}

/// Gives a fresh key to every record whose key is empty or repeats an earlier
/// one. Used when whole collections arrive at once.
fn assign_missing_keys<T: Keyed>(records: &mut [T]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for record in records.iter_mut() {
        if record.key().is_empty() || seen.contains(record.key()) {
            record.assign_key()?;
        }
        seen.insert(record.key().to_string());
    }
    Ok(())
}

pub fn add_record<T: Keyed>(records: &mut Vec<T>, mut record: T) -> Result<(), AppError> {
    record.assign_key()?;
    record.normalize();
    ensure_unique(records, record.key(), None)?;
    records.push(record);
    Ok(())
}

pub fn update_record<T: Keyed>(records: &mut [T], patch: RecordPatch) -> Result<(), AppError> {
    let index = position(records, &patch.id)?;
    let mut updated = merge_patch(&records[index], patch.data)?;
    updated.restore_key(&patch.id);
    updated.normalize();
    if updated.key().is_empty() {
        return Err(AppError::Validation(format!("{} key must not be empty", T::KIND)));
    }
    ensure_unique(records, updated.key(), Some(index))?;
    records[index] = updated;
    Ok(())
}

pub fn delete_record<T: Keyed>(records: &mut Vec<T>, key: &str) -> Result<(), AppError> {
    let index = position(records, key)?;
    records.remove(index);
    Ok(())
}

impl ZcvState {
    /// Applies a single action. On error the state is unchanged.
    pub fn apply(&mut self, action: ZcvAction) -> Result<(), AppError> {
        debug!("Applying action {}", action.name());
        match action {
            ZcvAction::LoadPortfolio(portfolio) | ZcvAction::ImportPortfolio(portfolio) => {
                self.replace_portfolio(portfolio)?;
            }
            ZcvAction::UpdatePortfolio(partial) => {
                let merged: Portfolio = merge_patch(&self.portfolio, partial)?;
                let created_at = self.portfolio.created_at;
                self.replace_portfolio(merged)?;
                self.portfolio.created_at = created_at;
                self.touch_portfolio();
            }
            ZcvAction::PatchPersonalInfo(patch) => {
                self.portfolio.personal_info = merge_patch(&self.portfolio.personal_info, patch)?;
                self.touch_portfolio();
            }
            ZcvAction::PatchSummary(patch) => {
                self.portfolio.professional_summary =
                    merge_patch(&self.portfolio.professional_summary, patch)?;
                self.touch_portfolio();
            }

            ZcvAction::AddExperience(r) => self.edit(|p| add_record(&mut p.experiences, r))?,
            ZcvAction::UpdateExperience(patch) => {
                self.edit(|p| update_record(&mut p.experiences, patch))?
            }
            ZcvAction::DeleteExperience(id) => {
                self.edit(|p| delete_record(&mut p.experiences, &id))?
            }

            ZcvAction::AddProject(r) => self.edit(|p| add_record(&mut p.projects, r))?,
            ZcvAction::UpdateProject(patch) => self.edit(|p| update_record(&mut p.projects, patch))?,
            ZcvAction::DeleteProject(id) => self.edit(|p| delete_record(&mut p.projects, &id))?,

            ZcvAction::AddEducation(r) => self.edit(|p| add_record(&mut p.education, r))?,
            ZcvAction::UpdateEducation(patch) => {
                self.edit(|p| update_record(&mut p.education, patch))?
            }
            ZcvAction::DeleteEducation(id) => self.edit(|p| delete_record(&mut p.education, &id))?,

            ZcvAction::AddSkill(r) => self.edit(|p| add_record(&mut p.skills, r))?,
            ZcvAction::UpdateSkill(patch) => self.edit(|p| update_record(&mut p.skills, patch))?,
            ZcvAction::DeleteSkill(name) => self.edit(|p| delete_record(&mut p.skills, &name))?,

            ZcvAction::AddAchievement(r) => self.edit(|p| add_record(&mut p.achievements, r))?,
            ZcvAction::UpdateAchievement(patch) => {
                self.edit(|p| update_record(&mut p.achievements, patch))?
            }
            ZcvAction::DeleteAchievement(id) => {
                self.edit(|p| delete_record(&mut p.achievements, &id))?
            }

            // Resumes arrive fully formed (generated, duplicated or restored),
            // so their ids are kept; only collisions are refused.
            ZcvAction::AddResume(resume) => {
                if resume.id.is_empty() {
                    return Err(AppError::Validation("Resume id must not be empty".into()));
                }
                ensure_unique(&self.resumes, &resume.id, None)?;
                self.resumes.push(resume);
            }
            ZcvAction::UpdateResume(patch) => {
                let index = position(&self.resumes, &patch.id)?;
                let mut updated = merge_patch(&self.resumes[index], patch.data)?;
                updated.restore_key(&patch.id);
                self.resumes[index] = updated;
            }
            ZcvAction::DeleteResume(id) => {
                delete_record(&mut self.resumes, &id)?;
                if self.selected_resume_id.as_deref() == Some(id.as_str()) {
                    self.selected_resume_id = None;
                }
            }
            ZcvAction::SelectResume(id) => {
                position(&self.resumes, &id)?;
                self.selected_resume_id = Some(id);
            }
            ZcvAction::RecordDownload(id) => {
                let index = position(&self.resumes, &id)?;
                let resume = &mut self.resumes[index];
                resume.download_count = resume.download_count.saturating_add(1);
            }

            ZcvAction::AddChatMessage(message) => self.chat_messages.push(message),
            ZcvAction::ClearChat => self.chat_messages.clear(),

            ZcvAction::SetView(view) => self.current_view = view,
            ZcvAction::SetFocus(focus) => self.current_focus = Some(focus),
            ZcvAction::SetGenerating(flag) => {
                if flag && self.is_generating {
                    return Err(AppError::Conflict(
                        "A resume is already being generated".to_string(),
                    ));
                }
                self.is_generating = flag;
            }
            ZcvAction::SetTailoring(flag) => {
                if flag && self.is_tailoring {
                    return Err(AppError::Conflict(
                        "A resume is already being tailored".to_string(),
                    ));
                }
                self.is_tailoring = flag;
            }
            ZcvAction::UpdateAnalysis(analysis) => self.portfolio_analysis = analysis,

            ZcvAction::ExportPortfolio => {}
        }
        Ok(())
    }

    /// Runs a collection edit against a copy of the portfolio and commits it
    /// only on success.
    fn edit<F>(&mut self, f: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Portfolio) -> Result<(), AppError>,
    {
        let mut draft = self.portfolio.clone();
        f(&mut draft)?;
        self.portfolio = draft;
        self.touch_portfolio();
        Ok(())
    }

    fn replace_portfolio(&mut self, mut portfolio: Portfolio) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for skill in &mut portfolio.skills {
            skill.normalize();
            validate_skill_name(&skill.name)?;
            if !seen.insert(skill.name.clone()) {
                return Err(AppError::Conflict(format!(
                    "Duplicate skill '{}' in portfolio",
                    skill.name
                )));
            }
        }
        assign_missing_keys(&mut portfolio.experiences)?;
        assign_missing_keys(&mut portfolio.projects)?;
        assign_missing_keys(&mut portfolio.education)?;
        assign_missing_keys(&mut portfolio.achievements)?;
        portfolio.completeness = calculate_completeness(&portfolio);
        self.portfolio_analysis = analyze_portfolio(&portfolio);
        self.portfolio = portfolio;
        Ok(())
    }

    fn touch_portfolio(&mut self) {
        self.portfolio.updated_at = Utc::now();
        self.portfolio.completeness = calculate_completeness(&self.portfolio);
        self.portfolio_analysis = analyze_portfolio(&self.portfolio);
    }
}
