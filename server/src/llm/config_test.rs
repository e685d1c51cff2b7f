use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_PROVIDER");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_OPENAI_MODE");
        std::env::remove_var("LLM_OPENAI_BASE_URL");
        std::env::remove_var("LLM_GEMINI_BASE_URL");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("FOLIO_TEST_KEY");
    }
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults_to_anthropic() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "secret");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-sonnet-4-5-20250929");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::Responses);
    assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(cfg.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.timeouts, LlmTimeouts::default());
    assert_eq!(cfg.api_key, "secret");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_openai_overrides() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_PROVIDER", "openai");
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "sk-test");
        std::env::set_var("LLM_OPENAI_MODE", "chat_completions");
        std::env::set_var("LLM_OPENAI_BASE_URL", "https://example.test/v1/");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::OpenAi);
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::ChatCompletions);
    assert_eq!(cfg.openai_base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_gemini() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_PROVIDER", "gemini");
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "g-key");
        std::env::set_var("LLM_MODEL", "gemini-2.5-pro");
        std::env::set_var("LLM_GEMINI_BASE_URL", "http://localhost:9000/");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Gemini);
    assert_eq!(cfg.model, "gemini-2.5-pro");
    assert_eq!(cfg.gemini_base_url, "http://localhost:9000");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_names_the_variable() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
    }

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "FOLIO_TEST_KEY"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_blank_key_is_missing() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "   ");
    }

    assert!(matches!(LlmConfig::from_env(), Err(LlmError::MissingApiKey { .. })));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_unknown_provider_errors() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_PROVIDER", "bad");
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "secret");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_unknown_openai_mode_errors() {
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "FOLIO_TEST_KEY");
        std::env::set_var("FOLIO_TEST_KEY", "secret");
        std::env::set_var("LLM_OPENAI_MODE", "bad_mode");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("unsupported openai_api mode"));

    unsafe { clear_llm_env() };
}

#[test]
fn env_parse_u64_falls_back_on_garbage() {
    unsafe { std::env::set_var("FOLIO_TEST_U64", "nope") };
    assert_eq!(env_parse_u64("FOLIO_TEST_U64", 9), 9);
    unsafe { std::env::set_var("FOLIO_TEST_U64", "12") };
    assert_eq!(env_parse_u64("FOLIO_TEST_U64", 9), 12);
    unsafe { std::env::remove_var("FOLIO_TEST_U64") };
}
