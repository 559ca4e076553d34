use std::sync::Arc;

use super::*;
use crate::embedding::{MockTextEncoder, SkillEncoder};

fn stub_matcher() -> SkillMatcher {
    SkillMatcher::new(Arc::new(SkillEncoder::stub()))
}

fn mock_encoder() -> MockTextEncoder {
    MockTextEncoder::new(2)
        .with_vector("python", vec![1.0, 0.0])
        .with_vector("python programming", vec![0.8, 0.6])
        .with_vector("guitar", vec![0.0, 1.0])
        .with_vector("anti python", vec![-1.0, 0.0])
}

fn candidates() -> Vec<CandidateProfile> {
    vec![
        CandidateProfile::new("1", "Ada").offering(["python programming"]),
        CandidateProfile::new("2", "Bo").offering(["guitar"]),
    ]
}

mod rank_tests {
    use super::*;

    #[test]
    fn test_rank_matches_related_candidate_first() {
        let matcher = stub_matcher();
        let results = matcher.rank_matches(&["python"], &candidates(), 5);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].candidate.id, "1");
        assert_eq!(results[1].candidate.id, "2");
        assert!(results[0].semantic > 0.5, "semantic was {}", results[0].semantic);
    }

    #[test]
    fn test_rank_matches_empty_inputs() {
        let matcher = stub_matcher();
        let none: [&str; 0] = [];
        assert!(matcher.rank_matches(&none, &candidates(), 5).is_empty());
        assert!(matcher.rank_matches(&["python"], &[], 5).is_empty());
        assert!(matcher.rank_matches(&["python"], &candidates(), 0).is_empty());
    }

    #[test]
    fn test_rank_matches_skips_candidates_without_offers() {
        let matcher = stub_matcher();
        let mut pool = candidates();
        pool.push(
            CandidateProfile::new("3", "Cy")
                .wanting(["python"])
                .with_availability("evenings"),
        );

        let results = matcher.rank_matches(&["python"], &pool, 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.candidate.id != "3"));
    }

    #[test]
    fn test_rank_matches_truncates_to_top_k() {
        let matcher = stub_matcher();
        let pool: Vec<CandidateProfile> = (0..8)
            .map(|i| CandidateProfile::new(i.to_string(), "n").offering(["python"]))
            .collect();

        let results = matcher.rank_matches(&["python"], &pool, 3);
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_matches_ties_keep_input_order() {
        let matcher = stub_matcher();
        let pool = vec![
            CandidateProfile::new("a", "Same").offering(["guitar"]),
            CandidateProfile::new("b", "Same").offering(["guitar"]),
            CandidateProfile::new("c", "Same").offering(["guitar"]),
        ];

        let ids: Vec<String> = matcher
            .rank_matches(&["guitar"], &pool, 5)
            .into_iter()
            .map(|r| r.candidate.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_matches_blends_components() {
        let matcher = SkillMatcher::new(Arc::new(mock_encoder()));
        let pool = vec![CandidateProfile::new("1", "Ada").offering(["python programming"])];

        let result = &matcher.rank_matches(&["python"], &pool, 1)[0];
        assert!((result.semantic - 0.8).abs() < 1e-6);
        let expected = 0.7 * result.semantic + 0.3 * result.contextual;
        assert!((result.score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rank_matches_negative_cosine_is_no_match() {
        let matcher = SkillMatcher::new(Arc::new(mock_encoder()));
        let pool = vec![CandidateProfile::new("1", "Ada").offering(["anti python"])];

        let result = &matcher.rank_matches(&["python"], &pool, 1)[0];
        assert_eq!(result.semantic, 0.0);
        assert!((result.score - 0.3 * result.contextual).abs() < 1e-6);
    }

    #[test]
    fn test_rank_matches_semantic_only_weights() {
        let matcher =
            SkillMatcher::new(Arc::new(mock_encoder())).with_weights(MatchWeights::semantic_only());
        let results = matcher.rank_matches(&["python"], &candidates(), 5);
        assert!((results[0].score - 0.8).abs() < 1e-6);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_rank_matches_contextual_breaks_semantic_ties() {
        let matcher = stub_matcher();
        let pool = vec![
            CandidateProfile::new("bare", "").offering(["guitar"]),
            CandidateProfile::new("rich", "Rich")
                .offering(["guitar"])
                .wanting(["piano"])
                .with_availability("weekends")
                .with_location("Lisbon"),
        ];

        let results = matcher.rank_matches(&["guitar"], &pool, 5);
        assert_eq!(results[0].candidate.id, "rich");
    }

    #[test]
    fn test_rank_matches_scores_within_bounds() {
        let matcher = stub_matcher();
        let mut pool = candidates();
        pool.push(
            CandidateProfile::new("3", "Full")
                .offering(["python", "rust", "go", "c++", "sql"])
                .wanting(["guitar"])
                .with_availability("always")
                .with_location("Oslo"),
        );

        for result in matcher.rank_matches(&["python", "databases"], &pool, 5) {
            assert!((0.0..=1.0).contains(&result.score));
            assert!((0.0..=1.0).contains(&result.semantic));
            assert!((0.0..=1.0).contains(&result.contextual));
        }
    }

    #[test]
    fn test_rank_matches_deterministic() {
        let matcher = stub_matcher();
        let first = matcher.rank_matches(&["python", "ml"], &candidates(), 5);
        let second = matcher.rank_matches(&["python", "ml"], &candidates(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_matches_does_not_mutate_candidates() {
        let matcher = stub_matcher();
        let pool = candidates();
        let before = pool.clone();
        matcher.rank_matches(&["JS"], &pool, 5);
        assert_eq!(pool, before);
    }

    #[test]
    fn test_rank_matches_unavailable_encoder_is_empty() {
        let matcher = SkillMatcher::new(Arc::new(MockTextEncoder::unavailable("missing")));
        assert!(matcher.rank_matches(&["python"], &candidates(), 5).is_empty());
        assert!(
            matcher
                .try_rank_matches(&["python"], &candidates(), 5)
                .unwrap_err()
                .is_unavailable()
        );
    }

    #[test]
    fn test_rank_matches_failure_mid_call_is_empty() {
        let matcher = SkillMatcher::new(Arc::new(mock_encoder().failing_after(2)));
        assert!(matcher.rank_matches(&["python"], &candidates(), 5).is_empty());
    }

    #[test]
    fn test_skill_similarity() {
        let matcher = SkillMatcher::new(Arc::new(mock_encoder()));
        assert!((matcher.skill_similarity("python", "python programming") - 0.8).abs() < 1e-6);
        assert_eq!(matcher.skill_similarity("python", "guitar"), 0.0);
    }

    #[test]
    fn test_ranked_skill_matches_threshold() {
        let matcher = SkillMatcher::new(Arc::new(mock_encoder()));
        let hits = matcher.ranked_skill_matches("python", &["guitar", "python programming"], 0.3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skill, "python programming");
    }
}

mod weights_tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = MatchWeights::default();
        assert_eq!(weights.semantic, 0.7);
        assert_eq!(weights.contextual, 0.3);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = MatchWeights {
            semantic: 0.5,
            contextual: 0.3,
        };
        assert!(weights.validate().unwrap_err().contains("sum"));
    }

    #[test]
    fn test_weights_out_of_range() {
        let weights = MatchWeights {
            semantic: 1.5,
            contextual: -0.5,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_blend_clamps() {
        let weights = MatchWeights::semantic_only();
        assert!(weights.validate().is_ok());
        assert_eq!(weights.blend(-0.4, 1.0), 0.0);
        assert_eq!(weights.blend(1.0, 1.0), 1.0);
    }
}

mod profile_tests {
    use super::*;

    #[test]
    fn test_profile_presence_checks() {
        let profile = CandidateProfile::new("1", "Ada")
            .with_availability("  ")
            .with_location("Paris");
        assert!(!profile.has_availability());
        assert!(profile.has_location());
        assert!(!profile.is_matchable());
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"id": "7", "skills_offered": ["chess"]}"#).expect("parse");
        assert_eq!(profile.id, "7");
        assert!(profile.name.is_empty());
        assert!(profile.skills_wanted.is_empty());
        assert!(profile.availability.is_none());
        assert!(profile.is_matchable());
    }

    #[test]
    fn test_profile_accepts_numeric_id() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"id": 1, "skills_offered": ["python programming"]}"#)
                .expect("parse");
        assert_eq!(profile.id, "1");

        let profile: CandidateProfile = serde_json::from_str(r#"{"id": 2.5}"#).expect("parse");
        assert_eq!(profile.id, "2.5");
    }

    #[test]
    fn test_profile_rejects_non_scalar_id() {
        assert!(serde_json::from_str::<CandidateProfile>(r#"{"id": true}"#).is_err());
        assert!(serde_json::from_str::<CandidateProfile>(r#"{"skills_offered": []}"#).is_err());
    }

    #[test]
    fn test_match_result_serializes_components() {
        let result = MatchResult {
            candidate: CandidateProfile::new("1", "Ada"),
            score: 0.5,
            semantic: 0.6,
            contextual: 0.25,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["candidate"]["id"], "1");
        assert_eq!(json["contextual"], 0.25);
    }
}

mod catalog_tests {
    use super::*;

    #[test]
    fn test_skill_categories_table() {
        let names: Vec<&str> = skill_categories().iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Programming");
        assert!(names.contains(&"Health & Fitness"));
    }

    #[test]
    fn test_categorize_skill() {
        assert_eq!(categorize_skill("Python"), "Programming");
        assert_eq!(categorize_skill("  yoga "), "Health & Fitness");
        assert_eq!(categorize_skill("underwater basket weaving"), OTHER_CATEGORY);
    }

    #[test]
    fn test_categorize_skill_first_category_wins() {
        // sql appears under Programming and Data & Analytics.
        assert_eq!(categorize_skill("SQL"), "Programming");
    }

    #[test]
    fn test_complementary_skills_excludes_known_and_wanted() {
        let suggestions = complementary_skills(&["Python"], &["machine learning"]);
        assert_eq!(
            suggestions,
            vec!["data science", "web development", "automation"]
        );
    }

    #[test]
    fn test_complementary_skills_dedup_and_cap() {
        let none: [&str; 0] = [];
        let suggestions = complementary_skills(&["html", "css", "javascript"], &none);
        assert!(suggestions.len() <= 5);
        assert!(!suggestions.iter().any(|s| s == "html" || s == "css"));

        let mut unique = suggestions.clone();
        unique.dedup();
        assert_eq!(unique.len(), suggestions.len());
        assert_eq!(suggestions[0], "web design");
    }

    #[test]
    fn test_complementary_skills_unknown_skill() {
        let none: [&str; 0] = [];
        assert!(complementary_skills(&["knitting"], &none).is_empty());
    }

    #[test]
    fn test_suggest_learning_path() {
        let path = suggest_learning_path(&["Python"], "Machine Learning");
        assert_eq!(
            path,
            vec!["statistics", "data analysis", "pandas", "numpy", "scikit-learn"]
        );
    }

    #[test]
    fn test_suggest_learning_path_skips_known_intermediate() {
        let path = suggest_learning_path(&["statistics", "excel", "python"], "data science");
        assert_eq!(path, vec!["sql", "data visualization"]);
    }

    #[test]
    fn test_suggest_learning_path_unknown_target() {
        let none: [&str; 0] = [];
        assert!(suggest_learning_path(&none, "juggling").is_empty());
    }

    #[test]
    fn test_trending_skills() {
        let trending = trending_skills();
        assert_eq!(trending.len(), 15);
        assert!(trending.contains(&"python"));
    }
}
