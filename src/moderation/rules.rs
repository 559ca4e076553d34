//! Static rule bank: keyword lists and regex patterns used by the checks.
//!
//! Keyword matching is case-insensitive and only counts whole words or
//! phrases, so `sale` never fires inside `wholesale`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ContentType;

pub const SPAM_KEYWORDS: &[&str] = &[
    // promotional
    "make money",
    "get rich",
    "work from home",
    "easy money",
    "guaranteed income",
    "no experience needed",
    "click here",
    "free money",
    "earn cash",
    "passive income",
    // contact fishing
    "contact me",
    "email me",
    "call me",
    "whatsapp",
    "telegram",
    "discord",
    "skype",
    "zoom meeting",
    // too-good offers
    "too good to be true",
    "limited time",
    "act now",
    "special offer",
    "exclusive deal",
    "secret method",
    // commerce
    "buy now",
    "sale",
    "discount",
    "promo code",
    "affiliate",
    "referral",
    "commission",
    // explicit
    "adult content",
    "xxx",
    "mature",
    "nsfw",
];

/// Words counted by the rule-based toxicity fallback.
pub const PROFANITY: &[&str] = &[
    "damn", "hell", "stupid", "idiot", "moron", "dumb", "hate", "kill", "die", "loser",
    "pathetic",
];

/// URLs, emails, phone numbers, dollar amounts, free-money offers.
pub static SPAM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)www\.[a-z0-9-]+\.[a-z]{2,}",
        r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}",
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        r"\$\d+",
        r"(?i)\b(free|earn|make)\b.*\$\d+",
    ])
});

/// Hate speech, discrimination, threats, harassment.
pub static TOXIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(hate|despise|loathe)\b.*\b(people|person|group)\b",
        r"(?i)\b(stupid|dumb|idiotic|moronic)\b.*\b(people|person)\b",
        r"(?i)\b(all|every)\b.*\b(women|men|girls|boys)\b.*\b(are|should)\b",
        r"(?i)\b(no|never)\b.*\b(hire|work with|teach)\b.*\b(women|men)\b",
        r"(?i)\b(kill|hurt|harm|destroy)\b",
        r"(?i)\b(threat|threaten|intimidate)\b",
        r"(?i)\b(harass|stalk|follow)\b",
        r"(?i)\b(creep|creepy|weird)\b.*\b(message|contact)\b",
    ])
});

/// Scam phrasing and shouting.
///
/// Repeated and alternating character runs are detected by
/// [`super::checks`] directly since they need backreferences.
pub static SUSPICIOUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(guaranteed|100%|promise)\b.*\b(money|income|profit)\b",
        r"(?i)\b(no risk|risk free|safe investment)\b",
        r"(?i)\b(limited time|act now|hurry)\b",
        r"(?i)\b(secret|hidden|exclusive)\b.*\b(method|technique|system)\b",
        r"(?i)\b(make \$\d+|earn \$\d+)\b.*\b(daily|weekly|monthly)\b",
        r"(?i)\b(work from home|remote work)\b.*\b(easy|simple|no experience)\b",
        // case-sensitive: three separate runs of capitals
        r"[A-Z]{3,}.*[A-Z]{3,}.*[A-Z]{3,}",
    ])
});

/// Runs of two or more `!`/`?`.
pub static PUNCTUATION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!?]{2,}").expect("valid punctuation pattern"));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid moderation pattern"))
        .collect()
}

/// Topic lists for the inappropriate-content check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InappropriateCategory {
    Adult,
    Dating,
    Financial,
    Medical,
    Legal,
    Religious,
    Political,
}

impl InappropriateCategory {
    pub const ALL: [InappropriateCategory; 7] = [
        InappropriateCategory::Adult,
        InappropriateCategory::Dating,
        InappropriateCategory::Financial,
        InappropriateCategory::Medical,
        InappropriateCategory::Legal,
        InappropriateCategory::Religious,
        InappropriateCategory::Political,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InappropriateCategory::Adult => "adult",
            InappropriateCategory::Dating => "dating",
            InappropriateCategory::Financial => "financial",
            InappropriateCategory::Medical => "medical",
            InappropriateCategory::Legal => "legal",
            InappropriateCategory::Religious => "religious",
            InappropriateCategory::Political => "political",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            InappropriateCategory::Adult => &["adult", "mature", "nsfw", "xxx", "18+", "explicit"],
            InappropriateCategory::Dating => &["dating", "romance", "hookup", "singles", "flirt"],
            InappropriateCategory::Financial => {
                &["bitcoin", "crypto", "investment", "trading", "forex"]
            }
            InappropriateCategory::Medical => {
                &["medical advice", "diagnosis", "prescription", "treatment"]
            }
            InappropriateCategory::Legal => &["legal advice", "lawyer", "lawsuit", "litigation"],
            InappropriateCategory::Religious => &["convert", "salvation", "prophet", "blessed"],
            InappropriateCategory::Political => {
                &["vote for", "election", "candidate", "political party"]
            }
        }
    }
}

impl ContentType {
    /// Inappropriate-content lists active for this content type.
    pub fn inappropriate_categories(&self) -> &'static [InappropriateCategory] {
        use InappropriateCategory::*;
        match self {
            ContentType::Skill => &[Adult, Dating, Financial, Medical, Legal],
            ContentType::Message | ContentType::Profile | ContentType::General => &[Adult, Dating],
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `phrase` occurs in `haystack` as a whole word or phrase.
///
/// Both arguments are expected lowercased.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    haystack.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Entries of `phrases` found in `haystack`, in list order.
pub fn matched_phrases(haystack: &str, phrases: &'static [&'static str]) -> Vec<&'static str> {
    phrases
        .iter()
        .copied()
        .filter(|phrase| contains_phrase(haystack, phrase))
        .collect()
}

/// Number of `patterns` with at least one match in `text`.
pub fn count_matching(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().filter(|p| p.is_match(text)).count()
}
