//! Target roles and resume templates offered by the generator wizard.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRole {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static [&'static str],
    pub features: &'static [&'static str],
}

pub const ROLES: &[TargetRole] = &[
    TargetRole {
        id: "sde",
        title: "Software Engineer",
        description: "Full-stack development, system design, and technical leadership",
        skills: &["JavaScript", "React", "Python", "System Design"],
    },
    TargetRole {
        id: "mle",
        title: "Machine Learning Engineer",
        description: "ML model development, deployment, and MLOps infrastructure",
        skills: &["Python", "TensorFlow", "PyTorch", "MLOps"],
    },
    TargetRole {
        id: "ds",
        title: "Data Scientist",
        description: "Data analysis, statistical modeling, and business insights",
        skills: &["Python", "SQL", "Statistics", "Visualization"],
    },
    TargetRole {
        id: "applied-scientist",
        title: "Applied Scientist",
        description: "Research-focused role combining science and engineering",
        skills: &["Research", "ML", "Publications", "Prototyping"],
    },
    TargetRole {
        id: "product-manager",
        title: "Product Manager",
        description: "Product strategy, roadmap planning, and cross-functional leadership",
        skills: &["Strategy", "Analytics", "Leadership", "Communication"],
    },
    TargetRole {
        id: "devops",
        title: "DevOps Engineer",
        description: "Infrastructure automation, CI/CD, and cloud architecture",
        skills: &["AWS", "Docker", "Kubernetes", "CI/CD"],
    },
];

pub const TEMPLATES: &[ResumeTemplate] = &[
    ResumeTemplate {
        id: "modern",
        name: "Modern Professional",
        description: "Clean, contemporary design with subtle colors",
        best_for: &["Software Engineer", "Product Manager", "Data Scientist"],
        features: &["Two-column layout", "Color accents", "Modern typography"],
    },
    ResumeTemplate {
        id: "classic",
        name: "Classic Academic",
        description: "Traditional format perfect for academic positions",
        best_for: &["Applied Scientist", "Research Engineer", "PhD positions"],
        features: &["Single-column", "Conservative design", "Publication-friendly"],
    },
    ResumeTemplate {
        id: "tech",
        name: "Tech Focused",
        description: "Optimized for technical roles with project emphasis",
        best_for: &["Software Engineer", "DevOps Engineer", "Machine Learning Engineer"],
        features: &[
            "Project highlights",
            "Technical skills emphasis",
            "GitHub integration",
        ],
    },
    ResumeTemplate {
        id: "executive",
        name: "Executive",
        description: "Professional design for senior positions",
        best_for: &["Senior Engineer", "Engineering Manager", "Director"],
        features: &["Leadership focus", "Achievement emphasis", "Premium layout"],
    },
];

pub fn role(id: &str) -> Option<&'static TargetRole> {
    ROLES.iter().find(|r| r.id == id)
}

pub fn template(id: &str) -> Option<&'static ResumeTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates whose `best_for` titles overlap the role, matched either way
/// round and case-insensitively. A known role id is resolved to its title
/// first; anything else is matched as free text.
pub fn recommended_templates(role_or_title: &str) -> Vec<&'static ResumeTemplate> {
    let target = role(role_or_title)
        .map(|r| r.title)
        .unwrap_or(role_or_title)
        .trim()
        .to_lowercase();
    if target.is_empty() {
        return Vec::new();
    }
    TEMPLATES
        .iter()
        .filter(|t| {
            t.best_for.iter().any(|fit| {
                let fit = fit.to_lowercase();
                fit.contains(&target) || target.contains(&fit)
            })
        })
        .collect()
}
