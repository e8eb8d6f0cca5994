use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::context::actions::{RecordPatch, ZcvAction};
use crate::context::completeness::{score_sections, SectionScore};
use crate::context::models::{PortfolioAnalysis, ZcvState};
use crate::context::reducer::Keyed;
use crate::errors::AppError;
use crate::models::portfolio::Portfolio;
use crate::state::AppState;

/// The editable record collections of a portfolio, as named in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioSection {
    Experiences,
    Projects,
    Education,
    Skills,
    Achievements,
}

impl FromStr for PortfolioSection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experiences" => Ok(Self::Experiences),
            "projects" => Ok(Self::Projects),
            "education" => Ok(Self::Education),
            "skills" => Ok(Self::Skills),
            "achievements" => Ok(Self::Achievements),
            other => Err(AppError::NotFound(format!(
                "Unknown portfolio section '{other}'"
            ))),
        }
    }
}

fn parse<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Validation(format!("Invalid {what}: {e}")))
}

fn to_values<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect()
}

fn find_value<T: Keyed>(records: &[T], key: &str) -> Option<Value> {
    records
        .iter()
        .find(|r| r.key() == key)
        .and_then(|r| serde_json::to_value(r).ok())
}

fn last_value<T: Keyed>(records: &[T]) -> Option<Value> {
    records.last().and_then(|r| serde_json::to_value(r).ok())
}

impl PortfolioSection {
    fn add(self, value: Value) -> Result<ZcvAction, AppError> {
        Ok(match self {
            Self::Experiences => ZcvAction::AddExperience(parse(value, "experience")?),
            Self::Projects => ZcvAction::AddProject(parse(value, "project")?),
            Self::Education => ZcvAction::AddEducation(parse(value, "education")?),
            Self::Skills => ZcvAction::AddSkill(parse(value, "skill")?),
            Self::Achievements => ZcvAction::AddAchievement(parse(value, "achievement")?),
        })
    }

    fn update(self, patch: RecordPatch) -> ZcvAction {
        match self {
            Self::Experiences => ZcvAction::UpdateExperience(patch),
            Self::Projects => ZcvAction::UpdateProject(patch),
            Self::Education => ZcvAction::UpdateEducation(patch),
            Self::Skills => ZcvAction::UpdateSkill(patch),
            Self::Achievements => ZcvAction::UpdateAchievement(patch),
        }
    }

    fn delete(self, key: String) -> ZcvAction {
        match self {
            Self::Experiences => ZcvAction::DeleteExperience(key),
            Self::Projects => ZcvAction::DeleteProject(key),
            Self::Education => ZcvAction::DeleteEducation(key),
            Self::Skills => ZcvAction::DeleteSkill(key),
            Self::Achievements => ZcvAction::DeleteAchievement(key),
        }
    }

    fn find(self, portfolio: &Portfolio, key: &str) -> Option<Value> {
        match self {
            Self::Experiences => find_value(&portfolio.experiences, key),
            Self::Projects => find_value(&portfolio.projects, key),
            Self::Education => find_value(&portfolio.education, key),
            Self::Skills => find_value(&portfolio.skills, key),
            Self::Achievements => find_value(&portfolio.achievements, key),
        }
    }

    fn last(self, portfolio: &Portfolio) -> Option<Value> {
        match self {
            Self::Experiences => last_value(&portfolio.experiences),
            Self::Projects => last_value(&portfolio.projects),
            Self::Education => last_value(&portfolio.education),
            Self::Skills => last_value(&portfolio.skills),
            Self::Achievements => last_value(&portfolio.achievements),
        }
    }

    /// Lists the section. `filter` narrows skills by category and
    /// achievements by type; other sections ignore it.
    fn list(self, portfolio: &Portfolio, filter: Option<&str>) -> Vec<Value> {
        let filter = filter.filter(|f| !f.is_empty() && *f != "all");
        match self {
            Self::Experiences => to_values(&portfolio.experiences),
            Self::Projects => to_values(&portfolio.projects),
            Self::Education => to_values(&portfolio.education),
            Self::Skills => {
                let skills: Vec<_> = portfolio
                    .skills
                    .iter()
                    .filter(|s| filter.map_or(true, |f| s.category.as_str() == f))
                    .collect();
                to_values(&skills)
            }
            Self::Achievements => {
                let achievements: Vec<_> = portfolio
                    .achievements
                    .iter()
                    .filter(|a| filter.map_or(true, |f| a.achievement_type.as_str() == f))
                    .collect();
                to_values(&achievements)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/state
pub async fn handle_get_state(State(state): State<AppState>) -> Json<ZcvState> {
    Json(state.store.snapshot().await)
}

/// POST /api/v1/actions
/// Dispatches any action and returns the resulting state.
pub async fn handle_dispatch(
    State(state): State<AppState>,
    Json(action): Json<ZcvAction>,
) -> Result<Json<ZcvState>, AppError> {
    let next = state.store.dispatch_with(action, ZcvState::clone).await?;
    Ok(Json(next))
}

// ────────────────────────────────────────────────────────────────────────────
// Portfolio
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub analysis: PortfolioAnalysis,
    pub sections: Vec<SectionScore>,
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<Portfolio> {
    Json(state.store.read(|s| s.portfolio.clone()).await)
}

/// GET /api/v1/portfolio/analysis
pub async fn handle_get_analysis(State(state): State<AppState>) -> Json<AnalysisResponse> {
    let response = state
        .store
        .read(|s| AnalysisResponse {
            analysis: s.portfolio_analysis.clone(),
            sections: score_sections(&s.portfolio),
        })
        .await;
    Json(response)
}

/// PATCH /api/v1/portfolio/personal-info
/// Merges the given fields into the current personal info.
pub async fn handle_patch_personal_info(
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<Portfolio>, AppError> {
    let portfolio = state
        .store
        .dispatch_with(ZcvAction::PatchPersonalInfo(patch), |s| s.portfolio.clone())
        .await?;
    Ok(Json(portfolio))
}

/// PATCH /api/v1/portfolio/summary
pub async fn handle_patch_summary(
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<Portfolio>, AppError> {
    let portfolio = state
        .store
        .dispatch_with(ZcvAction::PatchSummary(patch), |s| s.portfolio.clone())
        .await?;
    Ok(Json(portfolio))
}

#[derive(Debug, Deserialize)]
pub struct SectionQuery {
    pub filter: Option<String>,
}

/// GET /api/v1/portfolio/:section
pub async fn handle_list_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let section: PortfolioSection = section.parse()?;
    let records = state
        .store
        .read(|s| section.list(&s.portfolio, query.filter.as_deref()))
        .await;
    Ok(Json(records))
}

/// POST /api/v1/portfolio/:section
/// Returns the stored record with its assigned id.
pub async fn handle_add_record(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let section: PortfolioSection = section.parse()?;
    let created = state
        .store
        .dispatch_with(section.add(body)?, |s| section.last(&s.portfolio))
        .await?;
    Ok((StatusCode::CREATED, Json(created.unwrap_or(Value::Null))))
}

/// PATCH /api/v1/portfolio/:section/:id
/// Skills are addressed by name; a patch may rename one.
pub async fn handle_update_record(
    State(state): State<AppState>,
    Path((section, key)): Path<(String, String)>,
    Json(data): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let section: PortfolioSection = section.parse()?;
    let new_key = match (section, data.get("name").and_then(Value::as_str)) {
        (PortfolioSection::Skills, Some(name)) => name.trim().to_string(),
        _ => key.clone(),
    };
    let updated = state
        .store
        .dispatch_with(
            section.update(RecordPatch { id: key, data }),
            |s| section.find(&s.portfolio, &new_key),
        )
        .await?;
    Ok(Json(updated.unwrap_or(Value::Null)))
}

/// DELETE /api/v1/portfolio/:section/:id
pub async fn handle_delete_record(
    State(state): State<AppState>,
    Path((section, key)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let section: PortfolioSection = section.parse()?;
    state.store.dispatch(section.delete(key)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Export / import
// ────────────────────────────────────────────────────────────────────────────

pub fn export_filename(portfolio: &Portfolio) -> String {
    let name = portfolio.personal_info.name.trim();
    let stem: String = if name.is_empty() {
        "portfolio".to_string()
    } else {
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    };
    format!("{stem}_{}.json", Utc::now().format("%Y-%m-%d"))
}

/// GET /api/v1/portfolio/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let portfolio = state
        .store
        .dispatch_with(ZcvAction::ExportPortfolio, |s| s.portfolio.clone())
        .await?;
    let body = serde_json::to_string_pretty(&portfolio)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
    let filename = export_filename(&portfolio);
    info!("Exporting portfolio as {filename}");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/portfolio/import
/// Accepts the raw contents of an exported file.
pub async fn handle_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Portfolio>, AppError> {
    let invalid = || AppError::Validation("Import failed: Invalid file format".to_string());
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected import: {e}");
        invalid()
    })?;
    if !value.is_object() {
        return Err(invalid());
    }
    let portfolio: Portfolio = serde_json::from_value(value).map_err(|e| {
        warn!("Rejected import: {e}");
        invalid()
    })?;
    let imported = state
        .store
        .dispatch_with(ZcvAction::ImportPortfolio(portfolio), |s| s.portfolio.clone())
        .await?;
    Ok(Json(imported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_names() {
        assert_eq!(
            "skills".parse::<PortfolioSection>().unwrap(),
            PortfolioSection::Skills
        );
        assert!(matches!(
            "hobbies".parse::<PortfolioSection>(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_export_filename() {
        let mut p = Portfolio::default();
        assert!(export_filename(&p).starts_with("portfolio_"));
        p.personal_info.name = "Ada Lovelace".into();
        let name = export_filename(&p);
        assert!(name.starts_with("Ada_Lovelace_"));
        assert!(name.ends_with(".json"));
    }

    #[tokio::test]
    async fn test_import_rejects_non_portfolio() {
        let state = AppState::for_tests();
        let err = handle_import(State(state.clone()), Bytes::from_static(b"not json"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Import failed: Invalid file format");

        let err = handle_import(State(state), Bytes::from_static(b"[1, 2]"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_personal_info_patch_merges_fields() {
        let state = AppState::for_tests();
        handle_patch_personal_info(State(state.clone()), Json(json!({ "name": "Ada" })))
            .await
            .unwrap();
        let Json(p) = handle_patch_personal_info(
            State(state),
            Json(json!({ "email": "ada@example.com" })),
        )
        .await
        .unwrap();
        assert_eq!(p.personal_info.name, "Ada");
        assert_eq!(p.personal_info.email, "ada@example.com");
        assert_eq!(p.completeness, 10);
    }

    #[tokio::test]
    async fn test_skill_rename_returns_renamed_record() {
        let state = AppState::for_tests();
        handle_add_record(
            State(state.clone()),
            Path("skills".to_string()),
            Json(json!({ "name": "Rust", "category": "programming" })),
        )
        .await
        .unwrap();
        let Json(updated) = handle_update_record(
            State(state.clone()),
            Path(("skills".to_string(), "Rust".to_string())),
            Json(json!({ "name": "Rust 2021" })),
        )
        .await
        .unwrap();
        assert_eq!(updated["name"], "Rust 2021");
        assert_eq!(updated["category"], "programming");
    }

    #[tokio::test]
    async fn test_list_section_filters_by_category() {
        let state = AppState::for_tests();
        for (name, category) in [("Rust", "programming"), ("Docker", "tool")] {
            handle_add_record(
                State(state.clone()),
                Path("skills".to_string()),
                Json(json!({ "name": name, "category": category })),
            )
            .await
            .unwrap();
        }
        let Json(tools) = handle_list_section(
            State(state.clone()),
            Path("skills".to_string()),
            Query(SectionQuery {
                filter: Some("tool".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "Docker");

        let Json(all) = handle_list_section(
            State(state),
            Path("skills".to_string()),
            Query(SectionQuery {
                filter: Some("all".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 2);
    }
}
