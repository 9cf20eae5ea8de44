use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    data::{DataStore, ProblemRecord},
    problem,
    template::{self, Language, DEFAULT_TEMPLATE},
    url::UrlKey,
};

const CLI_POINTER: &str =
    "Please use the command-line version instead: https://github.com/online-judge-tools/template-generator";

static KNOWN_PLATFORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(atcoder|codeforces|yosupo)(?-u:\b)").expect("platform regex is valid"));

/// The form fields of one update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequest {
    pub url: Option<String>,
    pub template: Option<String>,
}

impl UpdateRequest {
    fn url<'a>(&'a self, default_url: &'a str) -> &'a str {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => default_url,
        }
    }

    fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}

/// How an update ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    LoadFailed {
        error: String,
    },
    NotAUrl {
        url: String,
    },
    NoMatch {
        url: String,
        known_platform: bool,
    },
    UnknownTemplate {
        url: String,
        title: String,
        template: String,
    },
    Found {
        url: String,
        title: String,
        code: String,
        language: Language,
    },
}

/// What the output elements of the page show for an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    /// `None` renders the error marker
    pub name: Option<&'a str>,
    pub link: Option<&'a str>,
    pub code: String,
    pub language: Language,
}

pub async fn update(store: &DataStore, default_url: &str, request: &UpdateRequest) -> Outcome {
    let url = request.url(default_url);
    let outcome = match store.load_cached().await {
        Ok(records) => decide(url, request.template(), records),
        Err(error) => Outcome::LoadFailed {
            error: error.to_string(),
        },
    };
    info!(url, state = outcome.state(), "rendered update");
    outcome
}

pub fn decide(url: &str, template: &str, records: &[ProblemRecord]) -> Outcome {
    if let Err(err) = UrlKey::parse(url) {
        debug!(%err, "rejected input");
        return Outcome::NotAUrl { url: url.to_owned() };
    }

    let Some(problem) = problem::find(url, records) else {
        return Outcome::NoMatch {
            url: url.to_owned(),
            known_platform: KNOWN_PLATFORM.is_match(url),
        };
    };

    match template::resolve(problem, template) {
        Ok(code) => Outcome::Found {
            url: url.to_owned(),
            title: problem.title.clone(),
            code: code.to_owned(),
            language: template::language_of(template),
        },
        Err(err) => Outcome::UnknownTemplate {
            url: url.to_owned(),
            title: problem.title.clone(),
            template: err.name,
        },
    }
}

impl Outcome {
    pub fn state(&self) -> &'static str {
        match self {
            Outcome::LoadFailed { .. } => "LoadFailed",
            Outcome::NotAUrl { .. } => "NotAUrl",
            Outcome::NoMatch { .. } => "NoMatch",
            Outcome::UnknownTemplate { .. } => "UnknownTemplate",
            Outcome::Found { .. } => "Found",
        }
    }

    pub fn view(&self) -> View<'_> {
        match self {
            Outcome::LoadFailed { error } => View {
                name: None,
                link: None,
                code: format!("failed to load the problem data: {error}\n"),
                language: Language::Plaintext,
            },
            Outcome::NotAUrl { url } => View {
                name: None,
                link: None,
                code: format!("not a URL: {}\n", quote(url)),
                language: Language::Plaintext,
            },
            Outcome::NoMatch { url, known_platform } => {
                let reason = if *known_platform {
                    "Probably the data for your problem is not pre-computed yet. This web-interface only supports old problems."
                } else {
                    "Currently this web-interface only supports problems of AtCoder (atcoder.jp), Codeforces (codeforces.com), and Library-Checker (judge.yosupo.jp)."
                };
                View {
                    name: None,
                    link: Some(url.as_str()),
                    code: format!("unsupported URL: {}\n\n{reason}\n{CLI_POINTER}", quote(url)),
                    language: Language::Plaintext,
                }
            }
            Outcome::UnknownTemplate {
                url,
                title,
                template,
            } => View {
                name: Some(title.as_str()),
                link: Some(url.as_str()),
                code: format!("failed to generate the template: {template}"),
                language: Language::Plaintext,
            },
            Outcome::Found {
                url,
                title,
                code,
                language,
            } => View {
                name: Some(title.as_str()),
                link: Some(url.as_str()),
                code: code.clone(),
                language: *language,
            },
        }
    }
}

// same quoting JSON uses for strings
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    const AGC006_C: &str = "https://atcoder.jp/contests/agc006/tasks/agc006_c";

    fn data() -> Vec<ProblemRecord> {
        vec![ProblemRecord {
            url: AGC006_C.to_owned(),
            title: "T".to_owned(),
            template: BTreeMap::from([("main.cpp".to_owned(), "code".to_owned())]),
        }]
    }

    #[test]
    fn found_with_trailing_slash() {
        let outcome = decide(&format!("{AGC006_C}/"), "main.cpp", &data());
        let view = outcome.view();
        assert_eq!(outcome.state(), "Found");
        assert_eq!(view.name, Some("T"));
        assert_eq!(view.code, "code");
        assert_eq!(view.language, Language::Cpp);
    }

    #[test]
    fn not_a_url_sets_no_title() {
        let outcome = decide("not a url", "main.cpp", &data());
        assert_eq!(
            outcome,
            Outcome::NotAUrl {
                url: "not a url".to_owned()
            }
        );
        let view = outcome.view();
        assert_eq!(view.name, None);
        assert_eq!(view.link, None);
        assert_eq!(view.code, "not a URL: \"not a url\"\n");
    }

    #[test]
    fn known_platform_is_not_precomputed_yet() {
        let url = "https://codeforces.com/contest/1/problem/A";
        let outcome = decide(url, "main.cpp", &data());
        assert!(matches!(outcome, Outcome::NoMatch { known_platform: true, .. }));
        let view = outcome.view();
        assert_eq!(view.name, None);
        assert_eq!(view.link, Some(url));
        assert!(view.code.starts_with("unsupported URL: \"https://codeforces.com/contest/1/problem/A\"\n\n"));
        assert!(view.code.contains("not pre-computed yet"));
        assert!(view.code.ends_with(CLI_POINTER));
    }

    #[test]
    fn other_platform_is_not_supported() {
        let outcome = decide("https://yukicoder.me/problems/no/1", "main.cpp", &data());
        assert!(matches!(outcome, Outcome::NoMatch { known_platform: false, .. }));
        let code = outcome.view().code;
        assert!(code.contains("only supports problems of AtCoder (atcoder.jp)"));
        assert!(!code.contains("not pre-computed yet"));
    }

    #[test]
    fn platform_must_be_a_whole_word() {
        let outcome = decide("https://notatcoders.example/problem", "main.cpp", &data());
        assert!(matches!(outcome, Outcome::NoMatch { known_platform: false, .. }));
        let outcome = decide("https://judge.yosupo.jp/problem/aplusb", "main.cpp", &data());
        assert!(matches!(outcome, Outcome::NoMatch { known_platform: true, .. }));
        // word boundaries are ASCII only, so a non-ASCII letter still separates words
        let outcome = decide("https://éatcoder.example/p", "main.cpp", &data());
        assert!(matches!(outcome, Outcome::NoMatch { known_platform: true, .. }));
    }

    #[test]
    fn missing_template_is_named() {
        let outcome = decide(AGC006_C, "main.py", &data());
        assert_eq!(outcome.state(), "UnknownTemplate");
        let view = outcome.view();
        assert_eq!(view.name, Some("T"));
        assert_eq!(view.code, "failed to generate the template: main.py");
        assert_eq!(view.language, Language::Plaintext);
    }

    #[tokio::test]
    async fn empty_url_falls_back_to_default() {
        let store = DataStore::with_records(data());
        let request = UpdateRequest {
            url: Some(String::new()),
            template: None,
        };
        let outcome = update(&store, AGC006_C, &request).await;
        assert_eq!(outcome.view().name, Some("T"));
    }

    #[tokio::test]
    async fn load_failure_is_rendered() {
        let store = DataStore::new("does/not/exist.json");
        let outcome = update(&store, AGC006_C, &UpdateRequest::default()).await;
        assert_eq!(outcome.state(), "LoadFailed");
        let view = outcome.view();
        assert_eq!(view.name, None);
        assert!(view.code.starts_with("failed to load the problem data: failed to read does/not/exist.json"));
    }
}
