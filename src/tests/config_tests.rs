#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use crate::implementations::config::{
        ConfigError,
        EngineConfig,
        DEFAULT_MODEL,
        REVIEW_TEMPLATE,
        TRANSLATE_TEMPLATE,
    };

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("coderefine-{}-{}.yaml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_match_the_engine_contract() {
        let config = EngineConfig::default();
        assert_eq!(config.llm_api.model, DEFAULT_MODEL);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.get_template(REVIEW_TEMPLATE).is_some());
        assert!(config.get_template(TRANSLATE_TEMPLATE).unwrap().contains("{{target_language}}"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let path = write_temp_config(
            "partial",
            "server:\n  port: 9100\ntimeout_secs: 30\nprompt_templates:\n  translate: \"Translate to {{target_language}} as JSON.\"\n"
        );

        let config = EngineConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.llm_api.model, DEFAULT_MODEL);
        assert_eq!(
            config.get_template(TRANSLATE_TEMPLATE).unwrap(),
            "Translate to {{target_language}} as JSON."
        );
        assert!(config.get_template(REVIEW_TEMPLATE).unwrap().contains("100-point rubric"));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let path = write_temp_config("invalid", "server: [not, a, map");
        let err = EngineConfig::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = EngineConfig::default();
        config.temperature = 3.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn translate_template_without_target_language_is_rejected() {
        let path = write_temp_config(
            "no-target",
            "prompt_templates:\n  translate: \"Translate this code and answer as JSON.\"\n"
        );

        let err = EngineConfig::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();

        match err {
            ConfigError::Invalid(message) => assert!(message.contains("{{target_language}}")),
            other => panic!("expected an invalid config, got {:?}", other),
        }
    }

    #[test]
    fn missing_api_key_fails() {
        let mut config = EngineConfig::default();
        config.llm_api.api_key_env = "CODEREFINE_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        match config.get_api_key() {
            Err(ConfigError::MissingApiKey(var)) => {
                assert_eq!(var, "CODEREFINE_TEST_KEY_THAT_IS_NEVER_SET");
            }
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn api_key_is_read_from_configured_env_var() {
        let mut config = EngineConfig::default();
        config.llm_api.api_key_env = "CODEREFINE_TEST_KEY_FROM_ENV".to_string();
        env::set_var("CODEREFINE_TEST_KEY_FROM_ENV", "gsk_test");
        assert_eq!(config.get_api_key().unwrap(), "gsk_test");
        env::remove_var("CODEREFINE_TEST_KEY_FROM_ENV");
    }

    #[test]
    fn explicit_api_key_wins_over_env() {
        let mut config = EngineConfig::default();
        config.llm_api.api_key = Some("from-config".to_string());
        config.llm_api.api_key_env = "CODEREFINE_TEST_KEY_SHADOWED".to_string();
        assert_eq!(config.get_api_key().unwrap(), "from-config");
    }
}
