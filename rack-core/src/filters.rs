use rack_types::WordResult;
use regex::Regex;

/// Compile a `?`-wildcard pattern such as `c?t` into an anchored regex.
///
/// Only ASCII letters and `?` are meaningful; anything else is matched literally.
pub fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body: String = pattern
        .to_ascii_lowercase()
        .chars()
        .map(|ch| match ch {
            '?' => ".".to_string(),
            other => regex::escape(&other.to_string()),
        })
        .collect();
    Regex::new(&format!("^{}$", body))
}

pub fn filter_results(results: &[WordResult], query: &str) -> Vec<WordResult> {
    let query = query.trim().to_ascii_lowercase();
    if query.is_empty() {
        return results.to_vec();
    }

    if query.contains('?') {
        return match wildcard_regex(&query) {
            Ok(regex) => results
                .iter()
                .filter(|result| regex.is_match(&result.word))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        };
    }

    results
        .iter()
        .filter(|result| result.word.contains(&query))
        .cloned()
        .collect()
}
