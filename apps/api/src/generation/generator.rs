//! Resume Generation: turns a role, a template and a content selection into
//! a stored `GeneratedResume`.
//!
//! Flow: validate selection → set generating → wait → build bullets + LaTeX →
//!       ADD_RESUME → clear generating → switch to the resume manager.
//!
//! Bullets are lifted from the portfolio as written; nothing is rephrased.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::actions::ZcvAction;
use crate::context::store::ZcvStore;
use crate::errors::AppError;
use crate::generation::catalog;
use crate::generation::content_selector::ContentSelection;
use crate::generation::latex::{
    render_latex, selected_experiences, selected_projects, EXPERIENCE_ITEMS, PROJECT_OUTCOMES,
};
use crate::models::portfolio::Portfolio;
use crate::models::resume::{GeneratedResume, ResumeType};
use crate::view::View;

/// Sections every generated resume lists, in order.
pub const RESUME_SECTIONS: [&str; 3] = ["experience", "projects", "skills"];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for role-based generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub role: String,
    pub template: String,
    #[serde(default)]
    pub content: ContentSelection,
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

/// First three achievements of each selected experience, then each selected
/// project's description followed by its first two outcomes.
pub fn mock_bullets(portfolio: &Portfolio, selection: &ContentSelection) -> Vec<String> {
    let mut bullets = Vec::new();
    for exp in selected_experiences(portfolio, selection) {
        bullets.extend(exp.achievements.iter().take(EXPERIENCE_ITEMS).cloned());
    }
    for proj in selected_projects(portfolio, selection) {
        bullets.push(proj.description.clone());
        bullets.extend(proj.outcomes.iter().take(PROJECT_OUTCOMES).cloned());
    }
    bullets
}

/// `<person>_<label>_<YYYY-MM-DD>`.
pub fn resume_name(portfolio: &Portfolio, label: &str, now: DateTime<Utc>) -> String {
    let person = portfolio.personal_info.name.trim();
    let person = if person.is_empty() { "resume" } else { person };
    format!("{person}_{label}_{}", now.format("%Y-%m-%d"))
}

/// Fields shared by every generated resume. The caller fills in type,
/// targeting and name.
pub fn resume_from_selection(
    portfolio: &Portfolio,
    template: &str,
    selection: &ContentSelection,
    now: DateTime<Utc>,
) -> GeneratedResume {
    GeneratedResume {
        id: Uuid::new_v4().to_string(),
        template: template.to_string(),
        sections: RESUME_SECTIONS.iter().map(|s| s.to_string()).collect(),
        emphasis: selection.skills.clone(),
        latex: render_latex(portfolio, selection),
        bullets: mock_bullets(portfolio, selection),
        selected_experiences: selection.experiences.clone(),
        selected_projects: selection.projects.clone(),
        selected_skills: selection.skills.clone(),
        created_at: now,
        updated_at: now,
        download_count: 0,
        version: 1,
        ..Default::default()
    }
}

pub fn validate_request(portfolio: &Portfolio, request: &GenerateRequest) -> Result<(), AppError> {
    if catalog::role(&request.role).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown target role '{}'",
            request.role
        )));
    }
    if catalog::template(&request.template).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown template '{}'",
            request.template
        )));
    }
    if !request.content.has_core_content() {
        return Err(AppError::Validation(
            "Select at least one experience or project".to_string(),
        ));
    }
    request.content.validate_against(portfolio)
}

pub fn build_role_resume(
    portfolio: &Portfolio,
    request: &GenerateRequest,
    now: DateTime<Utc>,
) -> Result<GeneratedResume, AppError> {
    validate_request(portfolio, request)?;
    Ok(GeneratedResume {
        name: resume_name(portfolio, &request.role, now),
        resume_type: ResumeType::RoleBased,
        target_role: Some(request.role.clone()),
        ..resume_from_selection(portfolio, &request.template, &request.content, now)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full generation flow against the store and returns the stored
/// resume. The generating flag is cleared on every exit path.
pub async fn generate_resume(
    store: &ZcvStore,
    delay: Duration,
    request: GenerateRequest,
) -> Result<GeneratedResume, AppError> {
    store
        .read(|s| validate_request(&s.portfolio, &request))
        .await?;

    info!(
        "Generating {} resume with template {}",
        request.role, request.template
    );
    // Refused with a conflict while another generation holds the flag.
    store.dispatch(ZcvAction::SetGenerating(true)).await?;
    tokio::time::sleep(delay).await;

    let outcome = async {
        // The portfolio may have changed during the wait; build from the latest.
        let resume = store
            .read(|s| build_role_resume(&s.portfolio, &request, Utc::now()))
            .await?;
        store.dispatch(ZcvAction::AddResume(resume.clone())).await?;
        Ok::<_, AppError>(resume)
    }
    .await;

    store.dispatch(ZcvAction::SetGenerating(false)).await?;
    let resume = match outcome {
        Ok(resume) => resume,
        Err(e) => {
            warn!("Resume generation failed: {e}");
            return Err(e);
        }
    };
    store.dispatch(ZcvAction::SetView(View::ResumeManager)).await?;

    info!("Generated resume {} ({} bullets)", resume.name, resume.bullets.len());
    Ok(resume)
}
