use crate::{
    data::ProblemRecord,
    url::{is_equivalent, UrlKey},
};

/// Returns the first record whose url names the same problem as `url`.
///
/// An unparsable `url` finds nothing, and neither does a record with a broken url.
pub fn find<'a>(url: &str, records: &'a [ProblemRecord]) -> Option<&'a ProblemRecord> {
    UrlKey::parse(url).ok()?;
    records
        .iter()
        .find(|record| is_equivalent(url, &record.url).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record(url: &str, title: &str) -> ProblemRecord {
        ProblemRecord {
            url: url.to_owned(),
            title: title.to_owned(),
            template: BTreeMap::from([("main.cpp".to_owned(), "code".to_owned())]),
        }
    }

    #[test]
    fn trailing_slash_finds_record() {
        let data = [record("https://atcoder.jp/contests/agc006/tasks/agc006_c", "T")];
        let found = find("https://atcoder.jp/contests/agc006/tasks/agc006_c/", &data);
        assert_eq!(found.map(|p| p.title.as_str()), Some("T"));
    }

    #[test]
    fn not_a_url_finds_nothing() {
        let data = [record("https://atcoder.jp/contests/agc006/tasks/agc006_c", "T")];
        assert_eq!(find("not a url", &data), None);
    }

    #[test]
    fn unknown_problem_finds_nothing() {
        let data = [record("https://atcoder.jp/contests/agc006/tasks/agc006_c", "T")];
        assert_eq!(find("https://atcoder.jp/contests/agc006/tasks/agc006_d", &data), None);
        assert_eq!(find("https://atcoder.jp/contests/agc006/tasks/agc006_c", &[]), None);
    }

    #[test]
    fn first_match_wins() {
        let data = [
            record("broken", "broken"),
            record("https://codeforces.com/contest/1/problem/A", "first"),
            record("https://codeforces.com/contest/1/problem/A/", "second"),
        ];
        let url = "https://codeforces.com/contest/1/problem/A";
        assert_eq!(find(url, &data).map(|p| p.title.as_str()), Some("first"));
        // same inputs, same answer
        assert_eq!(find(url, &data), find(url, &data));
    }
}
