use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_CONTEXTUAL_WEIGHT, DEFAULT_SEMANTIC_WEIGHT, WEIGHT_SUM_EPSILON};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Read-only view of a user profile supplied by the profile store.
pub struct CandidateProfile {
    /// Store identifier, opaque to the engine. Numeric ids are stringified.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CandidateProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn offering<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills_offered = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn wanting<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills_wanted = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns `true` if the candidate offers at least one skill.
    pub fn is_matchable(&self) -> bool {
        !self.skills_offered.is_empty()
    }

    pub fn has_availability(&self) -> bool {
        is_present(self.availability.as_deref())
    }

    pub fn has_location(&self) -> bool {
        is_present(self.location.as_deref())
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One ranked candidate.
pub struct MatchResult {
    pub candidate: CandidateProfile,
    /// Blended score in `[0, 1]`.
    pub score: f32,
    /// Best wanted/offered cosine similarity, floored at 0.
    pub semantic: f32,
    /// Profile-quality score in `[0, 1]`.
    pub contextual: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Blend weights for [`MatchResult::score`].
pub struct MatchWeights {
    pub semantic: f32,
    pub contextual: f32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            semantic: DEFAULT_SEMANTIC_WEIGHT,
            contextual: DEFAULT_CONTEXTUAL_WEIGHT,
        }
    }
}

impl MatchWeights {
    /// Raw-cosine ranking with no profile-quality adjustment.
    pub fn semantic_only() -> Self {
        Self {
            semantic: 1.0,
            contextual: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in [("semantic", self.semantic), ("contextual", self.contextual)] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0, got {}",
                    name, weight
                ));
            }
        }

        let sum = self.semantic + self.contextual;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(format!("weights must sum to 1.0, got {}", sum));
        }

        Ok(())
    }

    /// Blends the two components into a score clamped to `[0, 1]`.
    pub fn blend(&self, semantic: f32, contextual: f32) -> f32 {
        (self.semantic * semantic.max(0.0) + self.contextual * contextual).clamp(0.0, 1.0)
    }
}
