//! Content Selector: which portfolio records go into a generated resume,
//! and the wizard steps that lead up to generation.
//!
//! Experiences, projects and achievements are selected by id; skills by name.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::portfolio::Portfolio;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Experiences,
    Projects,
    Skills,
    Achievements,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentSelection {
    pub experiences: Vec<String>,
    pub projects: Vec<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Role,
    Template,
    Content,
    Generate,
}

// ────────────────────────────────────────────────────────────────────────────
// Selection editing
// ────────────────────────────────────────────────────────────────────────────

impl ContentSelection {
    pub fn items(&self, category: ContentCategory) -> &[String] {
        match category {
            ContentCategory::Experiences => &self.experiences,
            ContentCategory::Projects => &self.projects,
            ContentCategory::Skills => &self.skills,
            ContentCategory::Achievements => &self.achievements,
        }
    }

    fn items_mut(&mut self, category: ContentCategory) -> &mut Vec<String> {
        match category {
            ContentCategory::Experiences => &mut self.experiences,
            ContentCategory::Projects => &mut self.projects,
            ContentCategory::Skills => &mut self.skills,
            ContentCategory::Achievements => &mut self.achievements,
        }
    }

    /// Adds `key` if absent, removes it if present.
    pub fn toggle(&mut self, category: ContentCategory, key: &str) {
        let items = self.items_mut(category);
        match items.iter().position(|k| k == key) {
            Some(pos) => {
                items.remove(pos);
            }
            None => items.push(key.to_string()),
        }
    }

    pub fn select_all(&mut self, category: ContentCategory, portfolio: &Portfolio) {
        *self.items_mut(category) = match category {
            ContentCategory::Experiences => {
                portfolio.experiences.iter().map(|e| e.id.clone()).collect()
            }
            ContentCategory::Projects => portfolio.projects.iter().map(|p| p.id.clone()).collect(),
            ContentCategory::Skills => portfolio.skills.iter().map(|s| s.name.clone()).collect(),
            ContentCategory::Achievements => {
                portfolio.achievements.iter().map(|a| a.id.clone()).collect()
            }
        };
    }

    pub fn clear_all(&mut self, category: ContentCategory) {
        self.items_mut(category).clear();
    }

    /// A resume needs at least one experience or project to say anything.
    pub fn has_core_content(&self) -> bool {
        !self.experiences.is_empty() || !self.projects.is_empty()
    }

    /// Every key must name a record that exists in `portfolio`.
    pub fn validate_against(&self, portfolio: &Portfolio) -> Result<(), AppError> {
        let checks: [(ContentCategory, Vec<&str>); 4] = [
            (
                ContentCategory::Experiences,
                portfolio.experiences.iter().map(|e| e.id.as_str()).collect(),
            ),
            (
                ContentCategory::Projects,
                portfolio.projects.iter().map(|p| p.id.as_str()).collect(),
            ),
            (
                ContentCategory::Skills,
                portfolio.skills.iter().map(|s| s.name.as_str()).collect(),
            ),
            (
                ContentCategory::Achievements,
                portfolio.achievements.iter().map(|a| a.id.as_str()).collect(),
            ),
        ];
        for (category, known) in checks {
            if let Some(unknown) = self
                .items(category)
                .iter()
                .find(|key| !known.contains(&key.as_str()))
            {
                return Err(AppError::Validation(format!(
                    "Selected {category:?} entry '{unknown}' is not in the portfolio"
                )));
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard steps
// ────────────────────────────────────────────────────────────────────────────

impl WizardStep {
    pub const ORDER: [WizardStep; 4] = [
        WizardStep::Role,
        WizardStep::Template,
        WizardStep::Content,
        WizardStep::Generate,
    ];

    pub fn next(self) -> Option<WizardStep> {
        let idx = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(idx + 1).copied()
    }
}

/// Whether the wizard may leave `step` with the choices made so far.
pub fn can_proceed(
    step: WizardStep,
    role: &str,
    template: &str,
    selection: &ContentSelection,
) -> bool {
    match step {
        WizardStep::Role => !role.trim().is_empty(),
        WizardStep::Template => !template.trim().is_empty(),
        WizardStep::Content => selection.has_core_content(),
        WizardStep::Generate => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::{DetailedExperience, Skill};

    fn portfolio() -> Portfolio {
        let mut p = Portfolio::default();
        for id in ["e1", "e2"] {
            p.experiences.push(DetailedExperience {
                id: id.into(),
                ..Default::default()
            });
        }
        p.skills.push(Skill {
            name: "Rust".into(),
            ..Default::default()
        });
        p
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut sel = ContentSelection::default();
        sel.toggle(ContentCategory::Projects, "p1");
        sel.toggle(ContentCategory::Projects, "p2");
        sel.toggle(ContentCategory::Projects, "p1");
        assert_eq!(sel.projects, vec!["p2".to_string()]);
    }

    #[test]
    fn test_select_all_uses_skill_names() {
        let p = portfolio();
        let mut sel = ContentSelection::default();
        sel.select_all(ContentCategory::Skills, &p);
        sel.select_all(ContentCategory::Experiences, &p);
        assert_eq!(sel.skills, vec!["Rust".to_string()]);
        assert_eq!(sel.experiences.len(), 2);

        sel.clear_all(ContentCategory::Experiences);
        assert!(sel.experiences.is_empty());
        assert_eq!(sel.skills.len(), 1);
    }

    #[test]
    fn test_can_proceed_per_step() {
        let mut sel = ContentSelection::default();
        assert!(!can_proceed(WizardStep::Role, "", "", &sel));
        assert!(can_proceed(WizardStep::Role, "sde", "", &sel));
        assert!(!can_proceed(WizardStep::Template, "sde", " ", &sel));
        assert!(!can_proceed(WizardStep::Content, "sde", "tech", &sel));

        // Skills alone do not make a resume.
        sel.skills.push("Rust".into());
        assert!(!can_proceed(WizardStep::Content, "sde", "tech", &sel));
        sel.projects.push("p1".into());
        assert!(can_proceed(WizardStep::Content, "sde", "tech", &sel));
        assert!(can_proceed(WizardStep::Generate, "", "", &sel));
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Role.next(), Some(WizardStep::Template));
        assert_eq!(WizardStep::Generate.next(), None);
    }

    #[test]
    fn test_validate_against_rejects_unknown_keys() {
        let p = portfolio();
        let mut sel = ContentSelection {
            experiences: vec!["e1".into()],
            skills: vec!["Rust".into()],
            ..Default::default()
        };
        assert!(sel.validate_against(&p).is_ok());

        sel.skills.push("Cobol".into());
        assert!(matches!(
            sel.validate_against(&p),
            Err(AppError::Validation(_))
        ));
    }
}
