//! Skill text normalisation ahead of encoding.
//!
//! Abbreviations only expand when they stand alone as a word, so `db` inside
//! `adb` or `py` inside `python` stay untouched, and an expansion is never
//! re-scanned for further abbreviations.

/// Abbreviation table. No key is a prefix of another, so order does not matter.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("html/css", "html css web design"),
    ("ui/ux", "user interface user experience design"),
    ("docker", "containerization docker"),
    ("azure", "microsoft azure cloud"),
    ("sql", "structured query language database"),
    ("api", "application programming interface"),
    ("git", "version control git"),
    ("aws", "amazon web services cloud computing"),
    ("gcp", "google cloud platform"),
    ("js", "javascript"),
    ("py", "python"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("db", "database"),
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `.`, `+` and `#` join words (`node.js`, `c++`) but not when they end one.
fn is_connector(c: char) -> bool {
    matches!(c, '.' | '+' | '#')
}

/// Whether the text right after an abbreviation keeps the word going.
fn continues_word(after: &str) -> bool {
    let mut chars = after.chars();
    match chars.next() {
        Some(c) if is_word_char(c) => true,
        Some(c) if is_connector(c) => chars.next().is_some_and(char::is_alphanumeric),
        _ => false,
    }
}

/// Trims, lowercases and expands standalone abbreviations.
pub fn normalize_skill(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut rest = lowered.as_str();
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        // Every key starts alphanumeric, so a connector before it always joins.
        if !prev.is_some_and(|p| is_word_char(p) || is_connector(p))
            && let Some((abbr, expansion)) = ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| rest.starts_with(abbr) && !continues_word(&rest[abbr.len()..]))
        {
            normalized.push_str(expansion);
            prev = abbr.chars().last();
            rest = &rest[abbr.len()..];
            continue;
        }

        normalized.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    normalized
}

/// Normalises every skill in order.
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    skills.iter().map(|s| normalize_skill(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_skill("  Guitar Lessons  "), "guitar lessons");
    }

    #[test]
    fn test_empty_maps_to_empty() {
        assert_eq!(normalize_skill(""), "");
        assert_eq!(normalize_skill("   "), "");
    }

    #[test]
    fn test_expands_standalone_abbreviations() {
        assert_eq!(normalize_skill("JS"), "javascript");
        assert_eq!(normalize_skill("ML"), "machine learning");
        assert_eq!(normalize_skill("JS."), "javascript.");
        assert_eq!(
            normalize_skill("python, ML."),
            "python, machine learning."
        );
        assert_eq!(normalize_skill("js+"), "javascript+");
        assert_eq!(normalize_skill("intro to db design"), "intro to database design");
        assert_eq!(
            normalize_skill("UI/UX"),
            "user interface user experience design"
        );
    }

    #[test]
    fn test_leaves_embedded_abbreviations_alone() {
        assert_eq!(normalize_skill("python"), "python");
        assert_eq!(normalize_skill("adb debugging"), "adb debugging");
        assert_eq!(normalize_skill("painting"), "painting");
        assert_eq!(normalize_skill("html"), "html");
        assert_eq!(normalize_skill("node.js"), "node.js");
        assert_eq!(normalize_skill("js.node"), "js.node");
        assert_eq!(normalize_skill("ml#core"), "ml#core");
    }

    #[test]
    fn test_no_double_expansion() {
        // "containerization" contains "ai"; the expansion must not be re-scanned.
        assert_eq!(normalize_skill("docker"), "containerization docker");
        assert_eq!(
            normalize_skill("sql"),
            "structured query language database"
        );
    }

    #[test]
    fn test_multiple_abbreviations() {
        assert_eq!(
            normalize_skill("ML, AI and py"),
            "machine learning, artificial intelligence and python"
        );
    }

    #[test]
    fn test_compound_key_expands_whole() {
        assert_eq!(normalize_skill("html/css basics"), "html css web design basics");
    }

    #[test]
    fn test_normalize_skills_preserves_order() {
        assert_eq!(
            normalize_skills(&["Py", "Guitar"]),
            vec!["python".to_string(), "guitar".to_string()]
        );
    }
}
