//! Builds the problem data served by the web interface.
//!
//! Problems are listed from AtCoder, Codeforces and Library-Checker, and the
//! templates of each problem are generated with `oj-prepare`.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use fehler::throws;
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::{data::ProblemRecord, template::TEMPLATE_NAMES};

const LIBRARY_CHECKER_REPO: &str = "https://github.com/yosupo06/library-checker-problems";

/// Chance that a problem which already has templates is skipped.
pub const KEEP_PROBABILITY: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub url: String,
    pub title: String,
}

async fn get_text(client: &reqwest::Client, url: &str) -> anyhow::Result<String> {
    debug!(url, "fetching");
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(text)
}

pub async fn list_atcoder_problems(client: &reqwest::Client) -> anyhow::Result<Vec<Problem>> {
    let text = get_text(client, "https://kenkoooo.com/atcoder/resources/problems.json").await?;
    parse_atcoder_problems(&text)
}

#[throws(anyhow::Error)]
fn parse_atcoder_problems(text: &str) -> Vec<Problem> {
    #[derive(Deserialize)]
    struct Row {
        id: String,
        contest_id: String,
        title: String,
    }

    let rows: Vec<Row> = serde_json::from_str(text)?;
    rows.into_iter()
        .map(|row| Problem {
            url: format!("https://atcoder.jp/contests/{}/tasks/{}", row.contest_id, row.id),
            title: row.title,
        })
        .collect()
}

pub async fn list_codeforces_problems(client: &reqwest::Client) -> anyhow::Result<Vec<Problem>> {
    let text = get_text(client, "https://codeforces.com/api/problemset.problems").await?;
    parse_codeforces_problems(&text)
}

#[throws(anyhow::Error)]
fn parse_codeforces_problems(text: &str) -> Vec<Problem> {
    #[derive(Deserialize)]
    struct Response {
        status: String,
        result: Option<ProblemSet>,
    }
    #[derive(Deserialize)]
    struct ProblemSet {
        problems: Vec<Row>,
    }
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        contest_id: Option<u32>,
        index: String,
        name: String,
    }

    let response: Response = serde_json::from_str(text)?;
    if response.status != "OK" {
        anyhow::bail!("codeforces api returned status {}", response.status);
    }
    let problems = response.result.context("codeforces api returned no result")?.problems;
    problems
        .into_iter()
        // problems without a contest have no problem page
        .filter_map(|row| {
            Some(Problem {
                url: format!(
                    "https://codeforces.com/contest/{}/problem/{}",
                    row.contest_id?, row.index
                ),
                title: row.name,
            })
        })
        .collect()
}

pub async fn list_library_checker_problems() -> anyhow::Result<Vec<Problem>> {
    let tempdir = tempfile::tempdir()?;
    let status = Command::new("git")
        .args(["clone", "--depth=1", LIBRARY_CHECKER_REPO])
        .arg(tempdir.path())
        .status()
        .await?;
    if !status.success() {
        anyhow::bail!("git clone of {LIBRARY_CHECKER_REPO} failed: {status}");
    }
    scan_library_checker(tempdir.path())
}

#[throws(anyhow::Error)]
fn scan_library_checker(root: &Path) -> Vec<Problem> {
    #[derive(Deserialize)]
    struct Info {
        title: String,
    }

    let mut found = Vec::new();
    find_info_tomls(root, &mut found)?;

    let test_dir = root.join("test");
    let mut problems = Vec::new();
    for info_toml in found {
        if info_toml.starts_with(&test_dir) {
            continue;
        }
        let Some(problem_id) = info_toml
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
        else {
            continue;
        };
        let content = fs::read_to_string(&info_toml)?;
        let info: Info = toml::from_str(&content)
            .with_context(|| format!("could not parse {}", info_toml.display()))?;
        problems.push(Problem {
            url: format!("https://judge.yosupo.jp/problem/{problem_id}"),
            title: info.title,
        });
    }
    problems
}

#[throws(anyhow::Error)]
fn find_info_tomls(dir: &Path, found: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            find_info_tomls(&path, found)?;
        } else if entry.file_name() == "info.toml" {
            found.push(path);
        }
    }
}

/// `oj-prepare` config that writes every template to a file of the same name.
fn prepare_config() -> String {
    let mut config = String::from("[templates]\n");
    for template in TEMPLATE_NAMES {
        config.push_str(&format!("\"{template}\" = \"{template}\"\n"));
    }
    config
}

/// Runs `oj-prepare` for a problem and collects the generated templates.
pub async fn generate(url: &str) -> anyhow::Result<BTreeMap<String, String>> {
    let tempdir = tempfile::tempdir()?;
    let config_toml = tempdir.path().join("config.toml");
    fs::write(&config_toml, prepare_config())?;

    let status = Command::new("oj-prepare")
        .arg("--config-file")
        .arg(&config_toml)
        .arg(url)
        .current_dir(tempdir.path())
        .status()
        .await?;
    if !status.success() {
        anyhow::bail!("oj-prepare failed: {status}");
    }

    let mut result = BTreeMap::new();
    for template in TEMPLATE_NAMES {
        let path = tempdir.path().join(template);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("oj-prepare did not write {template}"))?;
        result.insert(template.to_owned(), content);
    }
    Ok(result)
}

/// Problem records keyed by url, in the order they were first added.
#[derive(Debug, Default)]
pub struct Generated {
    records: Vec<ProblemRecord>,
    index: HashMap<String, usize>,
}

impl Generated {
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn insert(&mut self, record: ProblemRecord) {
        match self.index.get(&record.url) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(record.url.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn records(&self) -> &[ProblemRecord] {
        &self.records
    }

    #[throws(anyhow::Error)]
    pub fn load(path: &Path) -> Self {
        let mut generated = Generated::default();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let records: Vec<ProblemRecord> =
                serde_json::from_str(&content).context("data is broken")?;
            for record in records {
                generated.insert(record);
            }
        }
        generated
    }

    #[throws(anyhow::Error)]
    pub fn save(&self, path: &Path) {
        fs::write(path, serde_json::to_string(&self.records)?)?;
    }
}

pub async fn update<R: Rng>(
    client: &reqwest::Client,
    generated: &mut Generated,
    rng: &mut R,
) -> anyhow::Result<()> {
    let mut problems = Vec::new();
    problems.extend(list_atcoder_problems(client).await?);
    problems.extend(list_codeforces_problems(client).await?);
    problems.extend(list_library_checker_problems().await?);
    info!(problems = problems.len(), "listed problems");
    problems.shuffle(rng);

    for problem in problems {
        if generated.contains(&problem.url) && rng.gen_bool(KEEP_PROBABILITY) {
            continue;
        }
        let template = match generate(&problem.url).await {
            Ok(template) => template,
            Err(err) => {
                error!(url = problem.url, "failed for problem: {err:#}");
                BTreeMap::new()
            }
        };
        generated.insert(ProblemRecord {
            url: problem.url,
            title: problem.title,
            template,
        });
    }
    Ok(())
}
