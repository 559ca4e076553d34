use serde::{Deserialize, Serialize};

use super::toxicity::ToxicityScores;

/// Decision thresholds applied to classifier scores (strictly greater than).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToxicityThresholds {
    pub toxicity: f32,
    pub severe_toxicity: f32,
    pub threat: f32,
    pub insult: f32,
    pub identity_attack: f32,
    /// Labels above this are named in the verdict reason.
    pub report: f32,
}

impl Default for ToxicityThresholds {
    fn default() -> Self {
        Self {
            toxicity: 0.6,
            severe_toxicity: 0.3,
            threat: 0.5,
            insult: 0.5,
            identity_attack: 0.5,
            report: 0.5,
        }
    }
}

impl ToxicityThresholds {
    pub fn is_toxic(&self, scores: &ToxicityScores) -> bool {
        scores.toxicity > self.toxicity
            || scores.severe_toxicity > self.severe_toxicity
            || scores.threat > self.threat
            || scores.insult > self.insult
            || scores.identity_attack > self.identity_attack
    }

    /// Labels over the report threshold or over their own decision threshold.
    pub fn flagged_labels(&self, scores: &ToxicityScores) -> Vec<&'static str> {
        scores
            .iter()
            .filter(|(label, score)| *score > self.limit_for(label).min(self.report))
            .map(|(label, _)| label)
            .collect()
    }

    fn limit_for(&self, label: &str) -> f32 {
        match label {
            "toxicity" => self.toxicity,
            "severe_toxicity" => self.severe_toxicity,
            "threat" => self.threat,
            "insult" => self.insult,
            "identity_attack" => self.identity_attack,
            _ => self.report,
        }
    }
}

/// Every tunable number of the rule-based checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModerationThresholds {
    /// Spam when at least this many keywords match.
    pub spam_keyword_hits: usize,
    /// Spam when keyword hits per word exceed this.
    pub spam_keyword_ratio: f32,
    /// Spam when at least this many spam patterns match.
    pub spam_pattern_hits: usize,
    /// Rule-based toxic when at least this many profanity words appear.
    pub profanity_hits: usize,
    /// Suspicious when at least this many structural patterns match.
    pub suspicious_pattern_hits: usize,
    /// Suspicious when `!`/`?` runs per character exceed this.
    pub punctuation_ratio: f32,
    /// Suspicious when more emoji than this appear.
    pub emoji_count: usize,
    pub toxicity: ToxicityThresholds,
}

impl Default for ModerationThresholds {
    fn default() -> Self {
        Self {
            spam_keyword_hits: 2,
            spam_keyword_ratio: 0.3,
            spam_pattern_hits: 2,
            profanity_hits: 2,
            suspicious_pattern_hits: 2,
            punctuation_ratio: 0.1,
            emoji_count: 10,
            toxicity: ToxicityThresholds::default(),
        }
    }
}
