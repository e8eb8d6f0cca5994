// Resume Generation
// Implements: role/template catalogs, content selection, LaTeX rendering,
// role-based generation and JD tailoring. No external calls; output is built
// from the portfolio alone.

pub mod catalog;
pub mod content_selector;
pub mod generator;
pub mod handlers;
pub mod jd_tailoring;
pub mod latex;
