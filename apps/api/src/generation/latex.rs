//! LaTeX resume renderer.
//!
//! Produces a single self-contained article document. All portfolio text is
//! escaped; sections with nothing selected are left out so the document
//! always compiles.

use crate::generation::content_selector::ContentSelection;
use crate::models::portfolio::{DetailedExperience, DetailedProject, Portfolio, SkillCategory};

/// Experience bullets shown per role.
pub const EXPERIENCE_ITEMS: usize = 3;
/// Outcome bullets shown per project, after its description.
pub const PROJECT_OUTCOMES: usize = 2;

const PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}
\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}

\pagestyle{fancy}
\fancyhf{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}
\urlstyle{same}
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{\vspace{-4pt}\scshape\raggedright\large}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{\item\small{{#1 \vspace{-2pt}}}}
\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}
\newcommand{\resumeProjectHeading}[2]{
    \item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \small#1 & #2 \\
    \end{tabular*}\vspace{-7pt}
}
\renewcommand\labelitemii{$\vcenter{\hbox{\tiny$\bullet$}}$}
\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\begin{document}
";

/// Escapes LaTeX special characters in user-supplied text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// URLs keep their characters; only what would break the `\href` argument
/// is escaped.
fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '%' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '\\' | '{' | '}' => {}
            _ => out.push(c),
        }
    }
    out
}

fn filled(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Records listed in portfolio order, keeping only those whose key is selected.
pub fn selected_experiences<'a>(
    portfolio: &'a Portfolio,
    selection: &ContentSelection,
) -> Vec<&'a DetailedExperience> {
    portfolio
        .experiences
        .iter()
        .filter(|e| selection.experiences.contains(&e.id))
        .collect()
}

pub fn selected_projects<'a>(
    portfolio: &'a Portfolio,
    selection: &ContentSelection,
) -> Vec<&'a DetailedProject> {
    portfolio
        .projects
        .iter()
        .filter(|p| selection.projects.contains(&p.id))
        .collect()
}

pub fn render_latex(portfolio: &Portfolio, selection: &ContentSelection) -> String {
    let mut doc = String::from(PREAMBLE);
    doc.push_str(&heading(portfolio));

    let experiences = selected_experiences(portfolio, selection);
    if !experiences.is_empty() {
        doc.push_str("\n%-----------EXPERIENCE-----------\n\\section{Experience}\n  \\resumeSubHeadingListStart\n");
        for exp in experiences {
            doc.push_str(&experience_entry(exp));
        }
        doc.push_str("  \\resumeSubHeadingListEnd\n");
    }

    let projects = selected_projects(portfolio, selection);
    if !projects.is_empty() {
        doc.push_str("\n%-----------PROJECTS-----------\n\\section{Projects}\n  \\resumeSubHeadingListStart\n");
        for proj in projects {
            doc.push_str(&project_entry(proj));
        }
        doc.push_str("  \\resumeSubHeadingListEnd\n");
    }

    doc.push_str(&skills_section(portfolio, selection));
    doc.push_str("\n\\end{document}\n");
    doc
}

fn heading(portfolio: &Portfolio) -> String {
    let info = &portfolio.personal_info;
    let mut contact = Vec::new();
    if !info.phone.trim().is_empty() {
        contact.push(escape_latex(info.phone.trim()));
    }
    if !info.email.trim().is_empty() {
        contact.push(format!(
            "\\href{{mailto:{}}}{{\\underline{{{}}}}}",
            escape_url(&info.email),
            escape_latex(info.email.trim())
        ));
    }
    if let Some(url) = filled(info.linkedin.as_ref()) {
        contact.push(format!(r"\href{{{}}}{{\underline{{LinkedIn}}}}", escape_url(url)));
    }
    if let Some(url) = filled(info.github.as_ref()) {
        contact.push(format!(r"\href{{{}}}{{\underline{{GitHub}}}}", escape_url(url)));
    }

    let mut out = String::from("\n%----------HEADING----------\n\\begin{center}\n");
    out.push_str(&format!(
        "    \\textbf{{\\Huge \\scshape {}}} \\\\ \\vspace{{1pt}}\n",
        escape_latex(info.name.trim())
    ));
    if !contact.is_empty() {
        out.push_str(&format!("    \\small {}\n", contact.join(" $|$ ")));
    }
    out.push_str("\\end{center}\n");
    out
}

fn item_list(items: &[String], indent: &str) -> String {
    let items: Vec<&String> = items.iter().filter(|i| !i.trim().is_empty()).collect();
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("{indent}\\resumeItemListStart\n");
    for item in items {
        out.push_str(&format!(
            "{indent}  \\resumeItem{{{}}}\n",
            escape_latex(item.trim())
        ));
    }
    out.push_str(&format!("{indent}\\resumeItemListEnd\n"));
    out
}

fn experience_entry(exp: &DetailedExperience) -> String {
    let end = if exp.is_current_role {
        Some("Present")
    } else {
        filled(exp.end_date.as_ref())
    };
    let dates = match end {
        Some(end) => format!("{} -- {}", escape_latex(&exp.start_date), escape_latex(end)),
        None => escape_latex(&exp.start_date),
    };

    let mut out = format!(
        "    \\resumeSubheading\n      {{{}}}{{{}}}\n      {{{}}}{{{}}}\n",
        escape_latex(&exp.title),
        dates,
        escape_latex(&exp.company),
        escape_latex(&exp.location)
    );
    let shown = &exp.achievements[..exp.achievements.len().min(EXPERIENCE_ITEMS)];
    out.push_str(&item_list(shown, "      "));
    out
}

fn project_entry(proj: &DetailedProject) -> String {
    let technologies = proj
        .technologies
        .iter()
        .map(|t| escape_latex(t))
        .collect::<Vec<_>>()
        .join(", ");
    let title = if technologies.is_empty() {
        format!("\\textbf{{{}}}", escape_latex(&proj.name))
    } else {
        format!(
            "\\textbf{{{}}} $|$ \\emph{{{}}}",
            escape_latex(&proj.name),
            technologies
        )
    };

    let mut out = format!(
        "    \\resumeProjectHeading\n      {{{}}}{{{}}}\n",
        title,
        escape_latex(&proj.start_date)
    );
    let mut items = vec![proj.description.clone()];
    items.extend(proj.outcomes.iter().take(PROJECT_OUTCOMES).cloned());
    out.push_str(&item_list(&items, "      "));
    out
}

fn skills_section(portfolio: &Portfolio, selection: &ContentSelection) -> String {
    let named = |category: SkillCategory| -> Vec<String> {
        selection
            .skills
            .iter()
            .filter(|name| {
                portfolio
                    .skill(name)
                    .map(|s| s.category == category)
                    .unwrap_or(false)
            })
            .map(|name| escape_latex(name))
            .collect()
    };

    let lines: Vec<String> = [
        ("Languages", SkillCategory::Programming),
        ("Frameworks", SkillCategory::Framework),
        ("Tools", SkillCategory::Tool),
    ]
    .into_iter()
    .filter_map(|(label, category)| {
        let names = named(category);
        (!names.is_empty()).then(|| format!("     \\textbf{{{label}}}{{: {}}}", names.join(", ")))
    })
    .collect();

    if lines.is_empty() {
        return String::new();
    }
    format!(
        "\n%-----------TECHNICAL SKILLS-----------\n\\section{{Technical Skills}}\n \\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n    \\small{{\\item{{\n{}\n    }}}}\n \\end{{itemize}}\n",
        lines.join(" \\\\\n")
    )
}
