use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeType {
    #[default]
    RoleBased,
    JdTailored,
}

/// A point-in-time export artifact. Only `download_count` changes after
/// creation in normal use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedResume {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resume_type: ResumeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,

    pub template: String,
    pub sections: Vec<String>,
    pub emphasis: Vec<String>,

    pub latex: String,
    pub bullets: Vec<String>,
    pub selected_experiences: Vec<String>,
    pub selected_projects: Vec<String>,
    pub selected_skills: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub download_count: u32,

    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_resume_id: Option<String>,
}

impl Default for GeneratedResume {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            resume_type: ResumeType::RoleBased,
            target_role: None,
            target_company: None,
            job_description: None,
            template: String::new(),
            sections: Vec::new(),
            emphasis: Vec::new(),
            latex: String::new(),
            bullets: Vec::new(),
            selected_experiences: Vec::new(),
            selected_projects: Vec::new(),
            selected_skills: Vec::new(),
            created_at: now,
            updated_at: now,
            download_count: 0,
            version: 1,
            parent_resume_id: None,
        }
    }
}
