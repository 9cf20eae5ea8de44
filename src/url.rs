use reqwest::Url;

use crate::error::InvalidUrl;

/// The parts of a problem URL that decide whether two URLs name the same problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlKey {
    host: String,
    port: Option<u16>,
    path: String,
}

impl UrlKey {
    pub fn parse(url: &str) -> Result<Self, InvalidUrl> {
        let parsed = Url::parse(url).map_err(|_| InvalidUrl {
            url: url.to_owned(),
        })?;
        Ok(Self {
            host: parsed.host_str().unwrap_or_default().to_owned(),
            port: parsed.port(),
            path: normalize_path(parsed.path()),
        })
    }
}

// only the first `//` is collapsed and only one trailing `/` is stripped
fn normalize_path(path: &str) -> String {
    let mut path = path.replacen("//", "/", 1);
    if path.ends_with('/') {
        path.pop();
    }
    path
}

pub fn is_equivalent(a: &str, b: &str) -> Result<bool, InvalidUrl> {
    Ok(UrlKey::parse(a)? == UrlKey::parse(b)?)
}
