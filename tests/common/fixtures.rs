use std::sync::Arc;

use skillswap::{CandidateProfile, SkillEncoder, SkillMatcher, TextEncoder};

pub fn stub_encoder() -> Arc<dyn TextEncoder> {
    Arc::new(SkillEncoder::stub())
}

pub fn stub_matcher() -> SkillMatcher {
    SkillMatcher::new(stub_encoder())
}

/// Small marketplace with a mix of complete and sparse profiles.
pub fn marketplace() -> Vec<CandidateProfile> {
    vec![
        CandidateProfile::new("1", "Ada")
            .offering(["python programming", "data analysis"])
            .wanting(["guitar"])
            .with_availability("weekends")
            .with_location("Berlin"),
        CandidateProfile::new("2", "Bo").offering(["guitar"]),
        CandidateProfile::new("3", "Cy").wanting(["python"]),
        CandidateProfile::new("4", "Di")
            .offering(["spanish", "french"])
            .with_availability("evenings"),
        CandidateProfile::new("5", "Ed")
            .offering(["machine learning", "python"])
            .wanting(["spanish"]),
        CandidateProfile::new("6", "Fi").offering(["watercolor painting"]),
    ]
}
