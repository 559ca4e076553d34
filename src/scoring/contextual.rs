//! Profile-quality score blended with semantic similarity.

use crate::matching::CandidateProfile;

const AVAILABILITY_WEIGHT: f32 = 0.2;
const LOCATION_WEIGHT: f32 = 0.1;
const COMPLETENESS_WEIGHT: f32 = 0.3;
const DIVERSITY_WEIGHT: f32 = 0.2;
const WANTS_SKILLS_WEIGHT: f32 = 0.1;

/// Offered-skill count at which diversity saturates.
const DIVERSITY_CAP: usize = 10;

/// Scores a candidate's profile quality in `[0, 1]`, independent of skill semantics.
///
/// Each applicable signal adds its weight and counts as one factor; the result
/// is the weight total divided by the number of factors. Completeness always
/// applies, so any profile yields at least one factor.
pub fn contextual_score(candidate: &CandidateProfile) -> f32 {
    let mut score = 0.0f32;
    let mut factors = 0u32;

    if candidate.has_availability() {
        score += AVAILABILITY_WEIGHT;
        factors += 1;
    }

    if candidate.has_location() {
        score += LOCATION_WEIGHT;
        factors += 1;
    }

    score += profile_completeness(candidate) * COMPLETENESS_WEIGHT;
    factors += 1;

    if !candidate.skills_offered.is_empty() {
        let diversity =
            (candidate.skills_offered.len().min(DIVERSITY_CAP) as f32) / DIVERSITY_CAP as f32;
        score += diversity * DIVERSITY_WEIGHT;
        factors += 1;
    }

    if !candidate.skills_wanted.is_empty() {
        score += WANTS_SKILLS_WEIGHT;
        factors += 1;
    }

    if factors == 0 {
        return 0.0;
    }

    (score / factors as f32).clamp(0.0, 1.0)
}

/// Fraction of {name, offered skills, wanted skills, availability} that are filled in.
pub fn profile_completeness(candidate: &CandidateProfile) -> f32 {
    let filled = [
        !candidate.name.trim().is_empty(),
        !candidate.skills_offered.is_empty(),
        !candidate.skills_wanted.is_empty(),
        candidate.has_availability(),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count();

    filled as f32 / 4.0
}
