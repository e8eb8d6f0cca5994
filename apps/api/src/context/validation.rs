use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::portfolio::Portfolio;

/// Experience achievement that carries no number at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnquantifiedAchievement {
    pub experience_id: String,
    pub text: String,
}

pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// An achievement counts as quantified when it contains at least one digit.
pub fn has_metric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

pub fn unquantified_achievements(portfolio: &Portfolio) -> Vec<UnquantifiedAchievement> {
    portfolio
        .experiences
        .iter()
        .flat_map(|exp| {
            exp.achievements
                .iter()
                .filter(|a| is_filled(a) && !has_metric(a))
                .map(|a| UnquantifiedAchievement {
                    experience_id: exp.id.clone(),
                    text: a.clone(),
                })
        })
        .collect()
}

/// True when at least one experience achievement contains a number.
pub fn has_quantified_achievements(portfolio: &Portfolio) -> bool {
    portfolio
        .experiences
        .iter()
        .any(|exp| exp.achievements.iter().any(|a| has_metric(a)))
}

pub fn validate_skill_name(name: &str) -> Result<(), AppError> {
    if !is_filled(name) {
        return Err(AppError::Validation("Skill name must not be empty".into()));
    }
    Ok(())
}

/// Drops blank entries left behind by list inputs (`["", "Rust", " "]`).
pub fn compact_list(items: &mut Vec<String>) {
    items.retain(|item| is_filled(item));
}
