//! Axum route handlers for the Generation API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::catalog::{self, ResumeTemplate, TargetRole, ROLES, TEMPLATES};
use crate::generation::content_selector::{
    can_proceed, ContentCategory, ContentSelection, WizardStep,
};
use crate::generation::generator::{generate_resume, GenerateRequest};
use crate::generation::jd_tailoring::{analyze, tailor_resume, AnalyzeRequest, JdAnalysis, TailorRequest};
use crate::models::resume::GeneratedResume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub roles: &'static [TargetRole],
    pub templates: &'static [ResumeTemplate],
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub recommended: Vec<&'static ResumeTemplate>,
    pub others: Vec<&'static ResumeTemplate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCheckRequest {
    pub step: WizardStep,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub content: ContentSelection,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOp {
    Toggle,
    SelectAll,
    ClearAll,
}

#[derive(Debug, Deserialize)]
pub struct SelectionEditRequest {
    #[serde(default)]
    pub content: ContentSelection,
    pub category: ContentCategory,
    pub op: SelectionOp,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCheckResponse {
    pub can_proceed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<WizardStep>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/catalog
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        roles: ROLES,
        templates: TEMPLATES,
    })
}

/// GET /api/v1/resumes/templates?role=
///
/// Splits the templates into those recommended for the role and the rest.
pub async fn handle_templates(Query(query): Query<TemplateQuery>) -> Json<TemplatesResponse> {
    let recommended = catalog::recommended_templates(&query.role);
    let others = TEMPLATES
        .iter()
        .filter(|t| !recommended.iter().any(|r| r.id == t.id))
        .collect();
    Json(TemplatesResponse {
        recommended,
        others,
    })
}

/// POST /api/v1/resumes/wizard/check
pub async fn handle_step_check(Json(req): Json<StepCheckRequest>) -> Json<StepCheckResponse> {
    let ok = can_proceed(req.step, &req.role, &req.template, &req.content);
    Json(StepCheckResponse {
        can_proceed: ok,
        next: if ok { req.step.next() } else { None },
    })
}

/// POST /api/v1/resumes/wizard/selection
///
/// Applies one edit to the caller's selection. Select-all draws on the
/// current portfolio.
pub async fn handle_edit_selection(
    State(state): State<AppState>,
    Json(req): Json<SelectionEditRequest>,
) -> Result<Json<ContentSelection>, AppError> {
    let mut selection = req.content;
    match req.op {
        SelectionOp::Toggle => {
            let key = req
                .key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| AppError::Validation("Toggle needs a key".to_string()))?;
            selection.toggle(req.category, key);
        }
        SelectionOp::SelectAll => {
            state
                .store
                .read(|s| selection.select_all(req.category, &s.portfolio))
                .await;
        }
        SelectionOp::ClearAll => selection.clear_all(req.category),
    }
    Ok(Json(selection))
}

/// POST /api/v1/resumes/generate
///
/// Responds once the resume is stored; the generation delay is part of the
/// request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GeneratedResume>), AppError> {
    let resume = generate_resume(&state.store, state.config.generation_delay, request).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// POST /api/v1/resumes/jd/analyze
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<JdAnalysis>, AppError> {
    let analysis = analyze(state.config.jd_analysis_delay, &request).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/resumes/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<(StatusCode, Json<GeneratedResume>), AppError> {
    let resume = tailor_resume(&state.store, state.config.generation_delay, request).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}
