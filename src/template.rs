use std::fmt::Display;

use crate::{data::ProblemRecord, error::UnknownTemplate};

/// Template names in the order the selector offers them.
pub const TEMPLATE_NAMES: [&str; 4] = ["main.cpp", "main.py", "generate.cpp", "generate.py"];

pub const DEFAULT_TEMPLATE: &str = TEMPLATE_NAMES[0];

/// Highlighting language, written out as a highlight.js tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Cpp,
    Python,
    Plaintext,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "python",
            Language::Plaintext => "plaintext",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn language_of(template: &str) -> Language {
    match template {
        "main.cpp" | "generate.cpp" => Language::Cpp,
        "main.py" | "generate.py" => Language::Python,
        _ => Language::Plaintext,
    }
}

pub fn resolve<'a>(problem: &'a ProblemRecord, template: &str) -> Result<&'a str, UnknownTemplate> {
    problem
        .template
        .get(template)
        .map(String::as_str)
        .ok_or_else(|| UnknownTemplate {
            name: template.to_owned(),
        })
}
