use super::*;
use std::path::PathBuf;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.embedding_dim, ENCODER_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, ENCODER_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.is_none());
    }

    #[test]
    fn test_encoder_config_new() {
        let config = EncoderConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(
            config.model_dir,
            Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
        );
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_encoder_config_stub() {
        let config = EncoderConfig::stub();
        assert!(config.testing_stub);
        assert!(!config.prefer_gpu);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_encoder_config_validation_missing_dir() {
        let config = EncoderConfig::default();
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_encoder_config_validation_nonexistent_dir() {
        let config = EncoderConfig::new("/nonexistent/path/encoder");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::ModelNotFound { .. })
        ));
        assert!(!config.model_available());
    }

    #[test]
    fn test_encoder_config_validation_incomplete_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.json"), "{}").expect("write config");

        let config = EncoderConfig::new(dir.path());
        assert!(config.model_available());

        match config.validate() {
            Err(EmbeddingError::ModelLoadFailed { reason }) => {
                assert!(reason.contains("model.safetensors"));
            }
            other => panic!("expected ModelLoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_encoder_config_validation_zero_dim() {
        let config = EncoderConfig::stub().with_embedding_dim(0);
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_encoder_config_env_constants() {
        assert_eq!(EncoderConfig::ENV_MODEL_PATH, "SKILLSWAP_ENCODER_PATH");
        assert_eq!(EncoderConfig::ENV_STUB, "SKILLSWAP_STUB_ENCODER");
    }

    #[test]
    #[serial]
    fn test_encoder_config_from_env_empty() {
        unsafe {
            env::remove_var(EncoderConfig::ENV_MODEL_PATH);
            env::remove_var(EncoderConfig::ENV_STUB);
        }

        let config = EncoderConfig::from_env();
        assert!(config.model_dir.is_none());
        assert!(!config.testing_stub);
    }

    #[test]
    #[serial]
    fn test_encoder_config_from_env_values() {
        unsafe {
            env::set_var(EncoderConfig::ENV_MODEL_PATH, "  /models/minilm  ");
            env::set_var(EncoderConfig::ENV_STUB, "TRUE");
        }

        let config = EncoderConfig::from_env();

        unsafe {
            env::remove_var(EncoderConfig::ENV_MODEL_PATH);
            env::remove_var(EncoderConfig::ENV_STUB);
        }

        assert_eq!(config.model_dir, Some(PathBuf::from("/models/minilm")));
        assert!(config.testing_stub);
    }

    #[test]
    #[serial]
    fn test_encoder_config_from_env_blank_path() {
        unsafe {
            env::set_var(EncoderConfig::ENV_MODEL_PATH, "   ");
        }

        let config = EncoderConfig::from_env();

        unsafe {
            env::remove_var(EncoderConfig::ENV_MODEL_PATH);
        }

        assert!(config.model_dir.is_none());
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_encoder_loads() {
        let encoder = SkillEncoder::load(EncoderConfig::stub()).expect("stub should load");
        assert!(encoder.is_stub());
        assert!(!encoder.has_model());
        assert_eq!(encoder.embedding_dim(), ENCODER_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_empty_batch() {
        let encoder = SkillEncoder::stub();
        let result = encoder.encode_batch(&[]).expect("empty batch");
        assert!(result.is_empty());
    }

    #[test]
    fn test_stub_shape() {
        let encoder = SkillEncoder::stub();
        let result = encoder
            .encode_batch(&["python", "guitar", "spanish"])
            .expect("encode");
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|row| row.len() == ENCODER_EMBEDDING_DIM));
    }

    #[test]
    fn test_stub_unit_norm() {
        let encoder = SkillEncoder::stub();
        let result = encoder.encode_batch(&["machine learning"]).expect("encode");
        let norm: f32 = result[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {}", norm);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let encoder = SkillEncoder::stub();
        let result = encoder.encode_batch(&["", "  "]).expect("encode");
        assert!(result[0].iter().all(|x| *x == 0.0));
        assert!(result[1].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_stub_deterministic_across_instances() {
        let a = SkillEncoder::stub().encode_batch(&["web design"]).expect("a");
        let b = SkillEncoder::stub().encode_batch(&["web design"]).expect("b");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_shared_tokens_are_similar() {
        let encoder = SkillEncoder::stub();
        let rows = encoder
            .encode_batch(&["python", "python programming", "guitar"])
            .expect("encode");

        let related = cosine(&rows[0], &rows[1]);
        let unrelated = cosine(&rows[0], &rows[2]);

        assert!(related > 0.5, "related similarity was {}", related);
        assert!(unrelated < 0.3, "unrelated similarity was {}", unrelated);
    }

    #[test]
    fn test_stub_case_insensitive() {
        let encoder = SkillEncoder::stub();
        let rows = encoder.encode_batch(&["Python", "python"]).expect("encode");
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_stub_keeps_symbol_tokens() {
        let encoder = SkillEncoder::stub();
        let rows = encoder.encode_batch(&["c++", "c#", "c"]).expect("encode");
        assert_ne!(rows[0], rows[2]);
        assert_ne!(rows[1], rows[2]);
    }

    #[test]
    fn test_cache_memoises_duplicates() {
        let encoder = SkillEncoder::stub();
        encoder
            .encode_batch(&["python", "python", "guitar"])
            .expect("encode");
        assert_eq!(encoder.cached_entries(), 2);

        encoder.encode_batch(&["python"]).expect("encode again");
        assert_eq!(encoder.cached_entries(), 2);
    }

    #[test]
    fn test_zero_capacity_cache_still_encodes() {
        let encoder = SkillEncoder::new(EncoderConfig::stub().with_cache_capacity(0));
        let rows = encoder.encode_batch(&["python", "guitar"]).expect("encode");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == ENCODER_EMBEDDING_DIM));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let encoder: Box<dyn TextEncoder> = Box::new(SkillEncoder::stub());
        assert_eq!(encoder.embedding_dim(), ENCODER_EMBEDDING_DIM);
        assert_eq!(encoder.encode(&["rust"]).expect("encode").len(), 1);
    }
}

mod unavailable_tests {
    use super::*;

    #[test]
    fn test_missing_model_reports_unavailable() {
        let encoder = SkillEncoder::new(EncoderConfig::new("/nonexistent/encoder"));
        let err = encoder.encode_batch(&["python"]).unwrap_err();
        assert!(matches!(err, EmbeddingError::Unavailable { .. }));
        assert!(err.is_unavailable());
        assert!(!encoder.has_model());
    }

    #[test]
    fn test_empty_input_never_fails_even_when_unavailable() {
        let encoder = SkillEncoder::new(EncoderConfig::new("/nonexistent/encoder"));
        assert!(encoder.encode_batch(&[]).expect("empty").is_empty());
    }

    #[test]
    fn test_failed_load_is_remembered() {
        let encoder = SkillEncoder::new(EncoderConfig::new("/nonexistent/encoder"));
        let first = encoder.ensure_loaded().unwrap_err().to_string();
        let second = encoder.ensure_loaded().unwrap_err().to_string();
        assert_eq!(first, second);
        assert!(format!("{:?}", encoder).contains("Unavailable"));
    }

    #[test]
    fn test_eager_load_surfaces_error() {
        let result = SkillEncoder::load(EncoderConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_before_load() {
        let encoder = SkillEncoder::stub();
        assert!(format!("{:?}", encoder).contains("Unloaded"));
        encoder.ensure_loaded().expect("stub loads");
        assert!(format!("{:?}", encoder).contains("Stub"));
    }
}
