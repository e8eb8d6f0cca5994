use serde::Serialize;

use crate::context::models::ZcvState;
use crate::context::validation::has_quantified_achievements;
use crate::models::resume::GeneratedResume;
use crate::view::View;

const MAX_INSIGHTS: usize = 3;
const RECENT_RESUMES: usize = 3;
const SKILLS_TARGET: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Action,
    Missing,
    Improve,
    Success,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
    pub target_view: View,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub title: &'static str,
    pub description: &'static str,
    pub target_view: View,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub completeness: u8,
    pub experiences: usize,
    pub projects: usize,
    pub resumes: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_resumes: Vec<GeneratedResume>,
    pub next_step: NextStep,
    pub insights: Vec<Insight>,
}

pub fn build_dashboard(state: &ZcvState) -> Dashboard {
    let portfolio = &state.portfolio;
    Dashboard {
        stats: DashboardStats {
            completeness: portfolio.completeness,
            experiences: portfolio.experiences.len(),
            projects: portfolio.projects.len(),
            resumes: state.resumes.len(),
        },
        recent_resumes: state
            .resumes
            .iter()
            .rev()
            .take(RECENT_RESUMES)
            .cloned()
            .collect(),
        next_step: next_step(portfolio.completeness),
        insights: insights(state),
    }
}

pub fn next_step(completeness: u8) -> NextStep {
    match completeness {
        0..=29 => NextStep {
            title: "Start Your Journey",
            description: "Let our AI help you discover your professional story",
            target_view: View::Chat,
        },
        30..=69 => NextStep {
            title: "Complete Your Profile",
            description: "Add more details to unlock better resume generation",
            target_view: View::PortfolioBuilder,
        },
        _ => NextStep {
            title: "Generate Your Resume",
            description: "Your profile is ready! Create a targeted resume",
            target_view: View::ResumeGenerator,
        },
    }
}

fn insight(
    kind: InsightKind,
    title: &'static str,
    description: &'static str,
    target_view: View,
    priority: Priority,
) -> Insight {
    Insight {
        kind,
        title,
        description,
        target_view,
        priority,
    }
}

/// Guidance cards, most urgent first, capped at three.
pub fn insights(state: &ZcvState) -> Vec<Insight> {
    let portfolio = &state.portfolio;
    let mut out = Vec::new();

    match portfolio.completeness {
        0..=29 => out.push(insight(
            InsightKind::Action,
            "Start with AI Discovery",
            "Let our AI guide you through building your profile",
            View::Chat,
            Priority::High,
        )),
        30..=69 => {
            if portfolio.experiences.is_empty() {
                out.push(insight(
                    InsightKind::Missing,
                    "Add Work Experience",
                    "Share your professional background",
                    View::PortfolioBuilder,
                    Priority::High,
                ));
            }
            if portfolio.projects.is_empty() {
                out.push(insight(
                    InsightKind::Missing,
                    "Add Projects",
                    "Showcase your technical work",
                    View::PortfolioBuilder,
                    Priority::Medium,
                ));
            }
            if portfolio.skills.len() < SKILLS_TARGET {
                out.push(insight(
                    InsightKind::Improve,
                    "Expand Skills List",
                    "Add more skills to strengthen your profile",
                    View::PortfolioBuilder,
                    Priority::Medium,
                ));
            }
        }
        _ => {
            out.push(insight(
                InsightKind::Success,
                "Ready to Generate!",
                "Your profile is complete. Create targeted resumes",
                View::ResumeGenerator,
                Priority::High,
            ));
            if state.resumes.is_empty() {
                out.push(insight(
                    InsightKind::Action,
                    "Generate First Resume",
                    "Create your first professional resume",
                    View::ResumeGenerator,
                    Priority::Medium,
                ));
            }
        }
    }

    if !portfolio.experiences.is_empty() && !has_quantified_achievements(portfolio) {
        out.push(insight(
            InsightKind::Improve,
            "Quantify Your Impact",
            "Add numbers and metrics to your achievements",
            View::PortfolioBuilder,
            Priority::Low,
        ));
    }

    out.truncate(MAX_INSIGHTS);
    out
}
