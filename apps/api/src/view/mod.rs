//! Screen selection. A single enum names the active view; there is no URL
//! routing behind it.

pub mod dashboard;
pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Dashboard,
    PortfolioBuilder,
    Chat,
    ResumeGenerator,
    ResumeManager,
}
