use std::sync::LazyLock;

use regex::Regex;

static PUNCTUATION_BURST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!?]{3,}").expect("valid punctuation pattern"));

/// Words longer than this, written in capitals, are title-cased.
const SHOUTING_MIN_LEN: usize = 4;

/// Tones down text without changing its meaning.
///
/// Bursts of three or more `!`/`?` become one `!`, long all-caps words are
/// title-cased (short acronyms such as `SQL` stay), and whitespace collapses
/// to single spaces.
pub fn clean_content(content: &str) -> String {
    let calmed = PUNCTUATION_BURST.replace_all(content, "!");

    calmed
        .split_whitespace()
        .map(|word| {
            if is_shouting(word) {
                title_case(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_shouting(word: &str) -> bool {
    word.chars().count() >= SHOUTING_MIN_LEN
        && word.chars().all(char::is_alphabetic)
        && word.chars().any(char::is_uppercase)
        && !word.chars().any(char::is_lowercase)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
