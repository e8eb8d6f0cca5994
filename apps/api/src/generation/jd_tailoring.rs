//! JD Tailoring: job-description analysis and tailored resume builds.
//!
//! The analysis is a fixed canned report; only company and position are read
//! from the posting itself, and only from its first non-blank line.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::actions::ZcvAction;
use crate::context::store::ZcvStore;
use crate::errors::AppError;
use crate::generation::catalog::{self, ROLES};
use crate::generation::content_selector::{ContentCategory, ContentSelection};
use crate::generation::generator::{resume_from_selection, resume_name};
use crate::models::portfolio::Portfolio;
use crate::models::resume::{GeneratedResume, ResumeType};
use crate::view::View;

const DEFAULT_TAILORED_TEMPLATE: &str = "modern";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JdAnalysis {
    pub keywords: Vec<String>,
    pub requirements: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub job_description: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub content: ContentSelection,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn require_text(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Company after " at " / " @ ", position by catalog title, both taken from
/// the first non-blank line.
pub fn extract_company_and_position(text: &str) -> (Option<String>, Option<String>) {
    let Some(first) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return (None, None);
    };
    let lower = first.to_ascii_lowercase();

    let position = ROLES
        .iter()
        .find(|r| lower.contains(&r.title.to_ascii_lowercase()))
        .map(|r| r.title.to_string());

    let company = [" at ", " @ "]
        .iter()
        .find_map(|sep| lower.find(sep).map(|idx| &first[idx + sep.len()..]))
        .map(|rest| {
            let rest = rest.split(" - ").next().unwrap_or_default();
            rest.split([',', '|', '('])
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .filter(|c| !c.is_empty());

    (company, position)
}

pub fn analyze_job_description(text: &str) -> Result<JdAnalysis, AppError> {
    require_text(text)?;
    let (company, position) = extract_company_and_position(text);
    Ok(JdAnalysis {
        keywords: owned(&[
            "React",
            "Node.js",
            "TypeScript",
            "AWS",
            "Microservices",
            "Agile",
        ]),
        requirements: owned(&[
            "5+ years of full-stack development experience",
            "Strong proficiency in React and Node.js",
            "Experience with cloud platforms (AWS/Azure)",
            "Knowledge of microservices architecture",
            "Excellent problem-solving skills",
        ]),
        suggestions: owned(&[
            "Emphasize your React and Node.js project experience",
            "Highlight cloud platform usage experience",
            "Showcase microservices architecture projects",
            "Quantify your technical achievements and impact",
        ]),
        company,
        position,
    })
}

/// Builds the tailored resume. An empty selection falls back to every
/// experience, project and skill in the portfolio.
pub fn build_tailored_resume(
    portfolio: &Portfolio,
    request: &TailorRequest,
    now: DateTime<Utc>,
) -> Result<GeneratedResume, AppError> {
    require_text(&request.job_description)?;

    let template = request
        .template
        .as_deref()
        .unwrap_or(DEFAULT_TAILORED_TEMPLATE);
    if catalog::template(template).is_none() {
        return Err(AppError::Validation(format!("Unknown template '{template}'")));
    }

    let mut selection = request.content.clone();
    if !selection.has_core_content() {
        selection.select_all(ContentCategory::Experiences, portfolio);
        selection.select_all(ContentCategory::Projects, portfolio);
        if selection.skills.is_empty() {
            selection.select_all(ContentCategory::Skills, portfolio);
        }
    }
    if !selection.has_core_content() {
        return Err(AppError::Validation(
            "Add an experience or project before tailoring a resume".to_string(),
        ));
    }
    selection.validate_against(portfolio)?;

    let (found_company, found_position) = extract_company_and_position(&request.job_description);
    let pick = |given: &Option<String>, found: Option<String>| {
        given
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or(found)
    };
    let company = pick(&request.company, found_company);
    let position = pick(&request.position, found_position);

    let label = company
        .as_deref()
        .or(position.as_deref())
        .unwrap_or("tailored")
        .replace(' ', "-");

    Ok(GeneratedResume {
        name: resume_name(portfolio, &label, now),
        resume_type: ResumeType::JdTailored,
        target_role: position,
        target_company: company,
        job_description: Some(request.job_description.trim().to_string()),
        ..resume_from_selection(portfolio, template, &selection, now)
    })
}

/// Waits the analysis delay, then returns the report.
pub async fn analyze(delay: Duration, request: &AnalyzeRequest) -> Result<JdAnalysis, AppError> {
    require_text(&request.job_description)?;
    tokio::time::sleep(delay).await;
    analyze_job_description(&request.job_description)
}

/// Sets the tailoring flag around the build and stores the result. The flag is
/// cleared on every exit path.
pub async fn tailor_resume(
    store: &ZcvStore,
    delay: Duration,
    request: TailorRequest,
) -> Result<GeneratedResume, AppError> {
    require_text(&request.job_description)?;

    store.dispatch(ZcvAction::SetTailoring(true)).await?;
    tokio::time::sleep(delay).await;

    let outcome = async {
        let resume = store
            .read(|s| build_tailored_resume(&s.portfolio, &request, Utc::now()))
            .await?;
        store.dispatch(ZcvAction::AddResume(resume.clone())).await?;
        Ok::<_, AppError>(resume)
    }
    .await;

    store.dispatch(ZcvAction::SetTailoring(false)).await?;
    let resume = outcome?;
    store.dispatch(ZcvAction::SetView(View::ResumeManager)).await?;

    info!(
        "Tailored resume {} for {}",
        resume.name,
        resume.target_company.as_deref().unwrap_or("unnamed company")
    );
    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::TimeZone;

    use crate::models::portfolio::{DetailedExperience, PersonalInfo};
    use crate::persistence::MemoryStore;

    fn portfolio() -> Portfolio {
        let mut p = Portfolio::default();
        p.personal_info = PersonalInfo {
            name: "Ada".into(),
            ..Default::default()
        };
        p.experiences.push(DetailedExperience {
            id: "e1".into(),
            achievements: vec!["Shipped 3 services".into()],
            ..Default::default()
        });
        p
    }

    fn tailor(jd: &str) -> TailorRequest {
        TailorRequest {
            job_description: jd.into(),
            company: None,
            position: None,
            template: None,
            content: ContentSelection::default(),
        }
    }

    #[test]
    fn test_extraction_from_first_line() {
        let (company, position) =
            extract_company_and_position("\n  Senior Software Engineer at Google, Zurich\nWe use Go");
        assert_eq!(company.as_deref(), Some("Google"));
        assert_eq!(position.as_deref(), Some("Software Engineer"));

        assert_eq!(extract_company_and_position("   \n "), (None, None));
        let (company, _) = extract_company_and_position("Engineer at Node.js Inc - Remote");
        assert_eq!(company.as_deref(), Some("Node.js Inc"));
        let (company, _) = extract_company_and_position("Data Scientist at Coca-Cola (Atlanta)");
        assert_eq!(company.as_deref(), Some("Coca-Cola"));
        let (company, position) = extract_company_and_position("Join our team");
        assert!(company.is_none() && position.is_none());
    }

    #[test]
    fn test_analysis_is_fixed() {
        let analysis = analyze_job_description("Data Scientist @ Acme").unwrap();
        assert_eq!(analysis.keywords.len(), 6);
        assert_eq!(analysis.requirements.len(), 5);
        assert_eq!(analysis.suggestions.len(), 4);
        assert_eq!(analysis.company.as_deref(), Some("Acme"));
        assert_eq!(analysis.position.as_deref(), Some("Data Scientist"));
        assert!(analyze_job_description("  ").is_err());
    }

    #[test]
    fn test_tailored_resume_uses_extracted_targets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let resume = build_tailored_resume(
            &portfolio(),
            &tailor("Software Engineer at Google\nMore text"),
            now,
        )
        .unwrap();
        assert_eq!(resume.resume_type, ResumeType::JdTailored);
        assert_eq!(resume.name, "Ada_Google_2024-05-01");
        assert_eq!(resume.target_company.as_deref(), Some("Google"));
        assert_eq!(resume.target_role.as_deref(), Some("Software Engineer"));
        assert_eq!(resume.template, "modern");
        assert_eq!(resume.selected_experiences, vec!["e1"]);
        assert!(resume.job_description.unwrap().ends_with("More text"));
    }

    #[test]
    fn test_given_targets_override_extraction() {
        let now = Utc::now();
        let mut req = tailor("Software Engineer at Google");
        req.company = Some("Initech".into());
        let resume = build_tailored_resume(&portfolio(), &req, now).unwrap();
        assert_eq!(resume.target_company.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_tailoring_needs_content() {
        let err = build_tailored_resume(&Portfolio::default(), &tailor("Any role"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_tailor_flow_clears_flag() {
        let store = ZcvStore::new(Arc::new(MemoryStore::default()));
        store
            .dispatch(ZcvAction::LoadPortfolio(portfolio()))
            .await
            .unwrap();
        tailor_resume(&store, Duration::ZERO, tailor("DevOps Engineer at Acme"))
            .await
            .unwrap();
        let state = store.snapshot().await;
        assert!(!state.is_tailoring);
        assert_eq!(state.resumes.len(), 1);
        assert_eq!(state.resumes[0].resume_type, ResumeType::JdTailored);

        let empty = ZcvStore::new(Arc::new(MemoryStore::default()));
        assert!(tailor_resume(&empty, Duration::ZERO, tailor("Role"))
            .await
            .is_err());
        assert!(!empty.read(|s| s.is_tailoring).await);
    }

    #[tokio::test]
    async fn test_tailor_rejected_while_tailoring() {
        let store = ZcvStore::new(Arc::new(MemoryStore::default()));
        store
            .dispatch(ZcvAction::LoadPortfolio(portfolio()))
            .await
            .unwrap();
        store.dispatch(ZcvAction::SetTailoring(true)).await.unwrap();
        let err = tailor_resume(&store, Duration::ZERO, tailor("DevOps Engineer at Acme"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.read(|s| s.resumes.is_empty()).await);
        assert!(store.read(|s| s.is_tailoring).await);
    }
}
