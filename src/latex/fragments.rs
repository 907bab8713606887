// src/latex/fragments.rs
use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Config, EnvironmentSpec};

// Macro argument placeholders: #1, #2, ... #10
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([1-9][0-9]*)").expect("Failed to compile PLACEHOLDER_RE"));

/// `\usepackage{name}`
pub fn package_directive(name: &str) -> String {
    format!("\\usepackage{{{name}}}")
}

/// `\newcommand{\name}[N]{body}`, with `[N]` left out for argument-less macros.
pub fn command_directive(name: &str, body: &str) -> String {
    let args = match argument_count(body) {
        0 => String::new(),
        n => format!("[{n}]"),
    };
    format!("\\newcommand{{\\{name}}}{args}{{{body}}}")
}

/// Number of distinct `#n` placeholders in a macro body.
pub fn argument_count(body: &str) -> usize {
    PLACEHOLDER_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn environment_directive(name: &str, environment: &EnvironmentSpec) -> String {
    format!(
        "\\newenvironment{{{name}}}\n\t{{{}}}\n\t{{{}}}",
        environment.begin, environment.end
    )
}

/// The preamble blocks rendered from a config, each already sorted by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragments {
    pub packages: String,
    pub commands: String,
    pub environments: String,
}

impl Fragments {
    pub fn from_config(config: &Config) -> Self {
        // BTreeSet / BTreeMap iterate in key order
        let packages = config
            .packages
            .iter()
            .map(|name| package_directive(name))
            .collect::<Vec<_>>()
            .join("\n");

        let commands = config
            .commands
            .iter()
            .map(|(key, spec)| {
                let (name, body) = spec.resolve(key);
                command_directive(name, body)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let environments = config
            .environments
            .iter()
            .map(|(name, environment)| environment_directive(name, environment))
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            packages,
            commands,
            environments,
        }
    }
}
