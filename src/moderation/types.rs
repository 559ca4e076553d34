use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ModerationError;

/// Where a piece of text will be shown; selects the inappropriate-content lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Skill names and descriptions (strictest).
    Skill,
    Message,
    Profile,
    #[default]
    General,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Skill => "skill",
            ContentType::Message => "message",
            ContentType::Profile => "profile",
            ContentType::General => "general",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ModerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skill" => Ok(ContentType::Skill),
            "message" => Ok(ContentType::Message),
            "profile" => Ok(ContentType::Profile),
            "general" => Ok(ContentType::General),
            _ => Err(ModerationError::UnknownContentType {
                value: s.to_string(),
            }),
        }
    }
}

/// Check that flagged a verdict. Ordered as the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationCategory {
    Spam,
    Toxic,
    Inappropriate,
    Suspicious,
}

impl ModerationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationCategory::Spam => "spam",
            ModerationCategory::Toxic => "toxic",
            ModerationCategory::Inappropriate => "inappropriate",
            ModerationCategory::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for ModerationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub flagged: bool,
    /// Always in `[0, 1]`.
    pub confidence: f32,
    pub reason: String,
}

impl CheckOutcome {
    pub fn new(flagged: bool, confidence: f32, reason: impl Into<String>) -> Self {
        Self {
            flagged,
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }
}

/// Aggregated moderation decision for one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub is_flagged: bool,
    /// Highest confidence among the checks that flagged, `0.0` when none did.
    pub confidence: f32,
    pub categories: BTreeSet<ModerationCategory>,
    /// Triggered check reasons joined with `"; "`.
    pub reason: String,
    /// Cleaned text, only present when nothing was flagged.
    pub cleaned_content: Option<String>,
}

impl ModerationVerdict {
    pub(crate) const EMPTY_REASON: &'static str = "empty content";
    pub(crate) const PASSED_REASON: &'static str = "content passed moderation";

    /// Verdict for empty or whitespace-only input.
    pub fn empty() -> Self {
        Self {
            is_flagged: false,
            confidence: 0.0,
            categories: BTreeSet::new(),
            reason: Self::EMPTY_REASON.to_string(),
            cleaned_content: None,
        }
    }

    pub fn has_category(&self, category: ModerationCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Flagged as spam or suspicious. Toxic or inappropriate alone does not count.
    pub fn is_spammy(&self) -> bool {
        self.is_flagged
            && (self.has_category(ModerationCategory::Spam)
                || self.has_category(ModerationCategory::Suspicious))
    }
}
