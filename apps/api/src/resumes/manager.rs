use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::resume::{GeneratedResume, ResumeType};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TypeFilter {
    #[default]
    All,
    RoleBased,
    JdTailored,
}

impl TypeFilter {
    fn matches(self, resume_type: ResumeType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::RoleBased => resume_type == ResumeType::RoleBased,
            TypeFilter::JdTailored => resume_type == ResumeType::JdTailored,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first.
    #[default]
    Date,
    Name,
    /// Most downloaded first.
    Downloads,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeQuery {
    pub search: String,
    #[serde(rename = "type")]
    pub type_filter: TypeFilter,
    pub sort: SortBy,
}

fn matches_search(resume: &GeneratedResume, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&resume.name)
        || resume.target_role.as_deref().is_some_and(hit)
        || resume.target_company.as_deref().is_some_and(hit)
}

/// Case-insensitive search over name, target role and target company, then
/// type filter, then sort. Ties keep their stored order.
pub fn list_resumes(resumes: &[GeneratedResume], query: &ResumeQuery) -> Vec<GeneratedResume> {
    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<GeneratedResume> = resumes
        .iter()
        .filter(|r| matches_search(r, &needle) && query.type_filter.matches(r.resume_type))
        .cloned()
        .collect();

    match query.sort {
        SortBy::Date => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Name => out.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortBy::Downloads => out.sort_by(|a, b| b.download_count.cmp(&a.download_count)),
    }
    out
}

/// A fresh copy that records where it came from.
pub fn duplicate(source: &GeneratedResume, now: DateTime<Utc>) -> GeneratedResume {
    GeneratedResume {
        id: Uuid::new_v4().to_string(),
        name: format!("{}_copy", source.name),
        created_at: now,
        updated_at: now,
        download_count: 0,
        version: 1,
        parent_resume_id: Some(source.id.clone()),
        ..source.clone()
    }
}

/// `<name>.tex`, restricted to characters that are safe in a header value.
pub fn download_filename(resume: &GeneratedResume) -> String {
    let stem: String = resume
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "resume".to_string() } else { stem };
    format!("{stem}.tex")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn resume(id: &str, name: &str, age_days: i64, downloads: u32) -> GeneratedResume {
        let created = Utc::now() - Duration::days(age_days);
        GeneratedResume {
            id: id.into(),
            name: name.into(),
            created_at: created,
            updated_at: created,
            download_count: downloads,
            ..Default::default()
        }
    }

    fn ids(list: &[GeneratedResume]) -> Vec<&str> {
        list.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Vec<GeneratedResume> {
        let mut tailored = resume("c", "beta", 1, 2);
        tailored.resume_type = ResumeType::JdTailored;
        tailored.target_company = Some("Google".into());
        vec![resume("a", "Charlie", 3, 5), resume("b", "alpha", 2, 0), tailored]
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let list = list_resumes(&sample(), &ResumeQuery::default());
        assert_eq!(ids(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_name_and_downloads() {
        let by_name = ResumeQuery {
            sort: SortBy::Name,
            ..Default::default()
        };
        assert_eq!(ids(&list_resumes(&sample(), &by_name)), vec!["b", "c", "a"]);

        let by_downloads = ResumeQuery {
            sort: SortBy::Downloads,
            ..Default::default()
        };
        assert_eq!(ids(&list_resumes(&sample(), &by_downloads)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_search_covers_company_case_insensitively() {
        let query = ResumeQuery {
            search: "GOOG".into(),
            ..Default::default()
        };
        assert_eq!(ids(&list_resumes(&sample(), &query)), vec!["c"]);
    }

    #[test]
    fn test_type_filter() {
        let query = ResumeQuery {
            type_filter: TypeFilter::RoleBased,
            ..Default::default()
        };
        assert_eq!(ids(&list_resumes(&sample(), &query)), vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate() {
        let mut source = resume("src", "Ada_sde", 4, 9);
        source.version = 3;
        source.latex = "\\documentclass{article}".into();
        let copy = duplicate(&source, Utc::now());
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.name, "Ada_sde_copy");
        assert_eq!(copy.download_count, 0);
        assert_eq!(copy.version, 1);
        assert_eq!(copy.parent_resume_id.as_deref(), Some("src"));
        assert_eq!(copy.latex, source.latex);
        assert!(copy.created_at > source.created_at);
    }

    #[test]
    fn test_download_filename() {
        let r = resume("x", "Ada Lovelace_sde_2024-01-01", 0, 0);
        assert_eq!(download_filename(&r), "Ada_Lovelace_sde_2024-01-01.tex");
        assert_eq!(download_filename(&resume("y", "", 0, 0)), "resume.tex");
    }
}
