use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PORTFOLIO_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// Field names are stored in snake_case, unlike the rest of the portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfessionalSummary {
    pub headline: String,
    pub elevator_pitch: String,
    pub career_objective: String,
    pub value_proposition: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedExperience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub is_current_role: bool,

    pub context: String,
    pub responsibilities: Vec<String>,
    pub challenges: Vec<String>,
    pub solutions: Vec<String>,
    pub achievements: Vec<String>,
    pub metrics: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    pub takeaways: Vec<String>,
    pub improvements: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[default]
    Personal,
    Academic,
    Work,
    Hackathon,
    OpenSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedProject {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub is_ongoing: bool,

    pub motivation: String,
    pub description: String,
    pub objectives: Vec<String>,
    pub challenges: Vec<String>,
    pub approach: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,

    pub outcomes: Vec<String>,
    pub metrics: Vec<String>,
    pub impact: String,

    pub learnings: Vec<String>,
    pub improvements: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Thesis {
    pub title: String,
    pub advisor: String,
    pub r#abstract: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedEducation {
    pub id: String,
    pub degree: String,
    pub major: String,
    pub school: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,

    pub relevant_coursework: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thesis: Option<Thesis>,

    pub research_projects: Vec<String>,
    pub publications: Vec<String>,
    pub conferences: Vec<String>,
    pub academic_awards: Vec<String>,

    pub clubs: Vec<String>,
    pub leadership: Vec<String>,
    pub volunteering: Vec<String>,

    pub skills_developed: Vec<String>,
    pub key_learnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    #[default]
    Programming,
    Framework,
    Tool,
    Language,
    SoftSkill,
    Domain,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Framework => "framework",
            SkillCategory::Tool => "tool",
            SkillCategory::Language => "language",
            SkillCategory::SoftSkill => "soft-skill",
            SkillCategory::Domain => "domain",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// Skills have no id: the name is the identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: Proficiency,
    pub years_of_experience: f64,
    pub last_used: String,

    pub acquired_from: Vec<String>,
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    #[default]
    Award,
    Certification,
    Publication,
    Patent,
    Competition,
    Recognition,
}

impl AchievementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementType::Award => "award",
            AchievementType::Certification => "certification",
            AchievementType::Publication => "publication",
            AchievementType::Patent => "patent",
            AchievementType::Competition => "competition",
            AchievementType::Recognition => "recognition",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub organization: String,
    pub date: String,
    pub description: String,
    pub significance: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

/// The aggregated career record. `completeness` is derived and rewritten by the
/// state container on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Portfolio {
    pub personal_info: PersonalInfo,
    pub professional_summary: ProfessionalSummary,

    pub experiences: Vec<DetailedExperience>,
    pub projects: Vec<DetailedProject>,
    pub education: Vec<DetailedEducation>,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: String,
    pub completeness: u8,
}

impl Default for Portfolio {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            personal_info: PersonalInfo::default(),
            professional_summary: ProfessionalSummary::default(),
            experiences: Vec::new(),
            projects: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            achievements: Vec::new(),
            created_at: now,
            updated_at: now,
            version: PORTFOLIO_SCHEMA_VERSION.to_string(),
            completeness: 0,
        }
    }
}

impl Portfolio {
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }
}
