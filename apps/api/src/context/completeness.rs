use serde::{Deserialize, Serialize};

use crate::context::models::PortfolioAnalysis;
use crate::context::validation::{is_filled, unquantified_achievements};
use crate::models::portfolio::Portfolio;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PersonalInfo,
    ProfessionalSummary,
    Experience,
    Projects,
    Education,
    Skills,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "Personal info",
            Section::ProfessionalSummary => "Professional summary",
            Section::Experience => "Work experience",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Skills => "Skills",
        }
    }
}

/// Points earned by one section, with the criteria still unmet.
#[derive(Debug, Clone, Serialize)]
pub struct SectionScore {
    pub section: Section,
    pub earned: u32,
    pub max: u32,
    pub missing: Vec<&'static str>,
}

impl SectionScore {
    fn from_criteria(section: Section, criteria: &[(&'static str, u32, bool)]) -> Self {
        let mut earned = 0;
        let mut max = 0;
        let mut missing = Vec::new();
        for &(label, points, met) in criteria {
            max += points;
            if met {
                earned += points;
            } else {
                missing.push(label);
            }
        }
        Self {
            section,
            earned,
            max,
            missing,
        }
    }
}

/// Scores each section. Weights total 100:
/// personal info 20, summary 20, experience 25, projects 15, education 10, skills 10.
pub fn score_sections(portfolio: &Portfolio) -> Vec<SectionScore> {
    let info = &portfolio.personal_info;
    let summary = &portfolio.professional_summary;

    vec![
        SectionScore::from_criteria(
            Section::PersonalInfo,
            &[
                ("name", 5, is_filled(&info.name)),
                ("email", 5, is_filled(&info.email)),
                ("phone", 5, is_filled(&info.phone)),
                ("location", 5, is_filled(&info.location)),
            ],
        ),
        SectionScore::from_criteria(
            Section::ProfessionalSummary,
            &[
                ("headline", 5, is_filled(&summary.headline)),
                ("elevator pitch", 5, is_filled(&summary.elevator_pitch)),
                ("career objective", 5, is_filled(&summary.career_objective)),
                ("value proposition", 5, is_filled(&summary.value_proposition)),
            ],
        ),
        SectionScore::from_criteria(
            Section::Experience,
            &[
                ("at least one experience", 15, !portfolio.experiences.is_empty()),
                (
                    "achievements for an experience",
                    10,
                    portfolio
                        .experiences
                        .iter()
                        .any(|e| e.achievements.iter().any(|a| is_filled(a))),
                ),
            ],
        ),
        SectionScore::from_criteria(
            Section::Projects,
            &[
                ("at least one project", 10, !portfolio.projects.is_empty()),
                (
                    "a GitHub link for a project",
                    5,
                    portfolio
                        .projects
                        .iter()
                        .any(|p| p.github_url.as_deref().is_some_and(is_filled)),
                ),
            ],
        ),
        SectionScore::from_criteria(
            Section::Education,
            &[("at least one education entry", 10, !portfolio.education.is_empty())],
        ),
        SectionScore::from_criteria(
            Section::Skills,
            &[("at least one skill", 10, !portfolio.skills.is_empty())],
        ),
    ]
}

/// Weighted completeness percentage, 0–100.
pub fn calculate_completeness(portfolio: &Portfolio) -> u8 {
    let sections = score_sections(portfolio);
    let earned: u32 = sections.iter().map(|s| s.earned).sum();
    let max: u32 = sections.iter().map(|s| s.max).sum();
    if max == 0 {
        return 0;
    }
    ((earned as f64 / max as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Derives strengths, gaps and suggestions from the same inputs as the
/// completeness score.
pub fn analyze_portfolio(portfolio: &Portfolio) -> PortfolioAnalysis {
    let sections = score_sections(portfolio);
    let mut strengths = Vec::new();
    let mut gaps = Vec::new();
    let mut suggestions = Vec::new();

    for score in &sections {
        if score.earned == score.max {
            strengths.push(format!("{} is complete", score.section.label()));
        } else if score.earned == 0 {
            gaps.push(format!("{} is missing", score.section.label()));
            suggestions.push(format!(
                "Add {} to strengthen your profile",
                score.missing.join(", ")
            ));
        } else {
            for missing in &score.missing {
                suggestions.push(format!("{}: add {}", score.section.label(), missing));
            }
        }
    }

    let unquantified = unquantified_achievements(portfolio);
    if !unquantified.is_empty() {
        suggestions.push(format!(
            "{} experience achievements lack numbers; quantify your impact",
            unquantified.len()
        ));
    }

    PortfolioAnalysis {
        completeness: calculate_completeness(portfolio),
        strengths,
        gaps,
        suggestions,
    }
}
