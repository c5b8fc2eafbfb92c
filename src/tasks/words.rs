// src/tasks/words.rs

//! Title tokenization and keyword counting.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::tasks::stop_words::is_stop_word;

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[[:punct:]]").expect("static pattern"))
}

/// Lowercase a title and strip all punctuation.
pub fn clean_title(title: &str) -> String {
    punctuation_re()
        .replace_all(&title.to_lowercase(), "")
        .into_owned()
}

/// Count word frequencies across cleaned titles, ignoring stop words.
pub fn keyword_counts<I>(titles: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = BTreeMap::new();
    for title in titles {
        for word in title.split_whitespace() {
            if is_stop_word(word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// The `n` most frequent keywords, most frequent first; ties break
/// alphabetically so the ranking is deterministic.
pub fn top_keywords(counts: &BTreeMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
