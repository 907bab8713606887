// src/latex/template.rs
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::fragments::Fragments;
use crate::config::Config;
use crate::extractors::section::Section;

// Placeholders are `{name}`; every other brace group is LaTeX and stays as is.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("Failed to compile PLACEHOLDER_RE"));

/// Separator between authors on the title page.
pub const AUTHOR_SEPARATOR: &str = r"\\";

const SKELETON: &str = r#"
\documentclass[12pt]{article}

\usepackage[utf8]{inputenc}
\usepackage[greek, english]{babel}

% Packages
{packages}

% Commands
{commands}

% Environments
{environments}

% Python Syntax Highlighting
\definecolor{string_color}{RGB}{0, 161, 13}
\definecolor{comment_color}{RGB}{46, 46, 46}
\definecolor{keyword_color}{RGB}{0, 112, 191}
\definecolor{background_color}{RGB}{250, 250, 250}

\lstset{
    framesep=15pt,
    xleftmargin=15pt,
    xrightmargin=15pt,
    language=Python,
    captionpos=b,
    numbers=right,
    numberstyle=\small\ttfamily,
    frame=lines,
    showspaces=false,
    showtabs=false,
    breaklines=true,
    showstringspaces=false,
    breakatwhitespace=true,
    commentstyle=\color{comment_color}\textit,
    keywordstyle=\bfseries\color{keyword_color}\textbf,
    stringstyle=\color{string_color}\textit,
    morekeywords={self, lambda, __init__, __del__, __name__, for, in, not, and, or, :},
    basicstyle=\small\ttfamily,
    tabsize=4,
    keepspaces=true,
    columns=flexible,
    backgroundcolor=\color{background_color}
}

% Links
\hypersetup{
    colorlinks=true,
    linkcolor=blue,
    filecolor=magenta,
    urlcolor=cyan,
}

% Lengths
\setlength{\parindent}{0in}
\setlength{\oddsidemargin}{0in}
\setlength{\textwidth}{6.5in}
\setlength{\textheight}{10in}
\setlength{\topmargin}{-1.0in}
\setlength{\headheight}{18pt}

\titlespacing*{\subsection}
{0pt}{5.5ex plus 1ex minus .2ex}{4.3ex plus .2ex}

\title{\huge {primary_title}\\{secondary_title}}
\author{{authors}}
\date{{date}}

\begin{document}

\maketitle

\pagenumbering{gobble}

\pagebreak

{subsections}

\end{document}
"#;

/// Renders one section as an unnumbered subsection with answer space and a page break.
pub fn section_block(section: &Section) -> String {
    format!(
        "\n\\subsection*{{{}}}\n\n\\vspace{{2in}}\n\n\\pagebreak",
        section.text
    )
}

/// Fills the document skeleton.
///
/// `date` is the display date for the title page, e.g. "October 2026".
pub fn render(config: &Config, sections: &[Section], date: &str) -> String {
    let fragments = Fragments::from_config(config);
    let authors = config.authors.join(AUTHOR_SEPARATOR);
    let subsections = sections
        .iter()
        .map(section_block)
        .collect::<Vec<_>>()
        .join("\n");

    let rendered: Cow<'_, str> = PLACEHOLDER_RE.replace_all(SKELETON, |caps: &Captures| {
        let value: &str = match &caps[1] {
            "packages" => &fragments.packages,
            "commands" => &fragments.commands,
            "environments" => &fragments.environments,
            "primary_title" => config.title.primary.as_deref().unwrap_or_default(),
            "secondary_title" => config.title.secondary.as_deref().unwrap_or_default(),
            "authors" => &authors,
            "date" => date,
            "subsections" => &subsections,
            _ => return caps[0].to_string(),
        };
        value.to_string()
    });

    tracing::debug!("Rendered document with {} subsections", sections.len());
    rendered.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Title;

    fn section(text: &str) -> Section {
        Section {
            span: 0..text.len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_section_block() {
        assert_eq!(
            section_block(&section("1. What is X?")),
            "\n\\subsection*{1. What is X?}\n\n\\vspace{2in}\n\n\\pagebreak"
        );
    }

    #[test]
    fn test_render_title_block() {
        let config = Config {
            title: Title {
                primary: Some("Homework 1".into()),
                secondary: Some("Linear Algebra".into()),
            },
            authors: vec!["Ada Lovelace".into(), "Alan Turing".into()],
            ..Config::default()
        };

        let doc = render(&config, &[], "March 2026");

        assert!(doc.contains("\\title{\\huge Homework 1\\\\Linear Algebra}"));
        assert!(doc.contains("\\author{Ada Lovelace\\\\Alan Turing}"));
        assert!(doc.contains("\\date{March 2026}"));
    }

    #[test]
    fn test_render_empty_config() {
        let doc = render(&Config::default(), &[], "May 2026");

        assert!(doc.contains("\\title{\\huge \\\\}"));
        assert!(doc.contains("\\author{}"));
        assert!(doc.contains("% Packages\n\n\n% Commands\n\n\n% Environments\n\n\n"));
        assert!(doc.contains("\\pagebreak\n\n\n\n\\end{document}"));
        assert!(!doc.contains("\\subsection*"));
    }

    #[test]
    fn test_latex_braces_are_left_alone() {
        let doc = render(&Config::default(), &[], "May 2026");

        assert!(doc.contains("\\documentclass[12pt]{article}"));
        assert!(doc.contains("\\definecolor{string_color}{RGB}{0, 161, 13}"));
        assert!(doc.contains("commentstyle=\\color{comment_color}\\textit,"));
        assert!(doc.contains("\\begin{document}"));
    }

    #[test]
    fn test_render_sections_in_order() {
        let sections = vec![section("1. What is X?"), section("2. Explain Y.")];

        let doc = render(&Config::default(), &sections, "May 2026");

        let first = doc.find("\\subsection*{1. What is X?}").unwrap();
        let second = doc.find("\\subsection*{2. Explain Y.}").unwrap();
        assert!(first < second);
        assert_eq!(doc.matches("\\subsection*{").count(), 2);
        assert_eq!(doc.matches("\\vspace{2in}\n\n\\pagebreak").count(), 2);
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let sections = vec![section("1. Print {date} literally.")];

        let doc = render(&Config::default(), &sections, "May 2026");

        assert!(doc.contains("\\subsection*{1. Print {date} literally.}"));
    }
}
