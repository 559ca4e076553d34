//! The four moderation checks. Each returns a [`CheckOutcome`] and never fails.

use super::rules::{
    self, InappropriateCategory, PROFANITY, PUNCTUATION_RUN, SPAM_KEYWORDS, SPAM_PATTERNS,
    SUSPICIOUS_PATTERNS, TOXIC_PATTERNS,
};
use super::thresholds::{ModerationThresholds, ToxicityThresholds};
use super::toxicity::ToxicityScores;
use super::types::{CheckOutcome, ContentType};

const SPAM_KEYWORDS_IN_REASON: usize = 3;
const REPEATED_RUN_LEN: usize = 5;

pub fn spam(content: &str, thresholds: &ModerationThresholds) -> CheckOutcome {
    let lowered = content.to_lowercase();
    let keywords = rules::matched_phrases(&lowered, SPAM_KEYWORDS);
    let pattern_hits = rules::count_matching(&SPAM_PATTERNS, content);

    let words = content.split_whitespace().count().max(1);
    let ratio = keywords.len() as f32 / words as f32;

    let flagged = keywords.len() >= thresholds.spam_keyword_hits
        || ratio > thresholds.spam_keyword_ratio
        || pattern_hits >= thresholds.spam_pattern_hits;
    let confidence = (ratio * 2.0 + pattern_hits as f32 * 0.3).min(1.0);

    let mut reasons = Vec::new();
    if !keywords.is_empty() {
        let shown: Vec<&str> = keywords.iter().take(SPAM_KEYWORDS_IN_REASON).copied().collect();
        reasons.push(format!("contains spam keywords: {}", shown.join(", ")));
    }
    if pattern_hits > 0 {
        reasons.push("contains suspicious patterns".to_string());
    }

    CheckOutcome::new(flagged, confidence, join_or(reasons, "no spam detected"))
}

/// Rule-based toxicity used when no classifier signal is available.
pub fn toxicity_rules(content: &str, thresholds: &ModerationThresholds) -> CheckOutcome {
    let lowered = content.to_lowercase();
    let pattern_hits = rules::count_matching(&TOXIC_PATTERNS, &lowered);
    let profanity = rules::matched_phrases(&lowered, PROFANITY).len();

    let flagged = pattern_hits > 0 || profanity >= thresholds.profanity_hits;
    let confidence = (pattern_hits as f32 * 0.4 + profanity as f32 * 0.2).min(1.0);

    let mut reasons = Vec::new();
    if pattern_hits > 0 {
        reasons.push("contains toxic language patterns".to_string());
    }
    if profanity > 0 {
        reasons.push(format!("contains {} potentially offensive words", profanity));
    }

    CheckOutcome::new(flagged, confidence, join_or(reasons, "no toxicity detected"))
}

/// Toxicity decision from classifier scores.
pub fn toxicity_scores(scores: &ToxicityScores, thresholds: &ToxicityThresholds) -> CheckOutcome {
    let reported = thresholds.flagged_labels(scores);
    let reason = if reported.is_empty() {
        "no toxicity detected".to_string()
    } else {
        format!("classifier detected: {}", reported.join(", "))
    };

    CheckOutcome::new(thresholds.is_toxic(scores), scores.max(), reason)
}

pub fn inappropriate(content: &str, content_type: ContentType) -> CheckOutcome {
    let lowered = content.to_lowercase();
    let mut flagged: Vec<&'static str> = Vec::new();
    let mut total = 0usize;

    for category in content_type.inappropriate_categories() {
        let hits = hits_for(&lowered, *category);
        if hits > 0 {
            flagged.push(category.name());
            total += hits;
        }
    }

    let reason = if flagged.is_empty() {
        "content is appropriate".to_string()
    } else {
        format!("contains inappropriate content: {}", flagged.join(", "))
    };

    CheckOutcome::new(!flagged.is_empty(), (total as f32 * 0.3).min(1.0), reason)
}

fn hits_for(lowered: &str, category: InappropriateCategory) -> usize {
    rules::matched_phrases(lowered, category.keywords()).len()
}

pub fn suspicious(content: &str, thresholds: &ModerationThresholds) -> CheckOutcome {
    let pattern_hits = suspicious_pattern_hits(content);

    let runs = PUNCTUATION_RUN.find_iter(content).count();
    let chars = content.chars().count().max(1);
    let punctuation_ratio = runs as f32 / chars as f32;
    let emoji = emoji_count(content);

    let excessive_punctuation = punctuation_ratio > thresholds.punctuation_ratio;
    let excessive_emoji = emoji > thresholds.emoji_count;
    let flagged = pattern_hits >= thresholds.suspicious_pattern_hits
        || excessive_punctuation
        || excessive_emoji;
    let confidence =
        (pattern_hits as f32 * 0.3 + punctuation_ratio * 2.0 + emoji as f32 * 0.05).min(1.0);

    let mut reasons = Vec::new();
    if pattern_hits > 0 {
        reasons.push(format!("contains {} suspicious patterns", pattern_hits));
    }
    if excessive_punctuation {
        reasons.push("excessive punctuation".to_string());
    }
    if excessive_emoji {
        reasons.push(format!("excessive emojis ({})", emoji));
    }

    CheckOutcome::new(
        flagged,
        confidence,
        join_or(reasons, "no suspicious patterns detected"),
    )
}

/// Structural pattern count, including the repeated and alternating runs.
pub fn suspicious_pattern_hits(content: &str) -> usize {
    let lowered: Vec<char> = content.to_lowercase().chars().collect();
    rules::count_matching(&SUSPICIOUS_PATTERNS, content)
        + usize::from(has_repeated_run(&lowered, REPEATED_RUN_LEN))
        + usize::from(has_alternating_run(&lowered))
}

/// Same character `len` or more times in a row. Newlines never count.
pub fn has_repeated_run(chars: &[char], len: usize) -> bool {
    if len == 0 {
        return false;
    }

    let mut run = 0usize;
    let mut prev: Option<char> = None;
    for &c in chars {
        if c == '\n' {
            run = 0;
            prev = None;
            continue;
        }
        run = if prev == Some(c) { run + 1 } else { 1 };
        if run >= len {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// `a b a b b b`: a pair, the pair again, then the second character twice more.
pub fn has_alternating_run(chars: &[char]) -> bool {
    chars.windows(6).any(|w| {
        !w.contains(&'\n') && w[2] == w[0] && w[3..].iter().all(|c| *c == w[1])
    })
}

pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F | 0x1F300..=0x1F5FF | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF
    )
}

pub fn emoji_count(content: &str) -> usize {
    content.chars().filter(|c| is_emoji(*c)).count()
}

fn join_or(reasons: Vec<String>, fallback: &str) -> String {
    if reasons.is_empty() {
        fallback.to_string()
    } else {
        reasons.join("; ")
    }
}
