use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every variable has a default; `GROQ_API_TOKEN` is optional because its
/// absence is a per-request configuration error in the scrape service, not a
/// startup failure.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BOTTLEDB_ENV", "development"));
    let bind_addr = parse_addr("BOTTLEDB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BOTTLEDB_LOG_LEVEL", "info");
    let user_agent = or_default("BOTTLEDB_USER_AGENT", "bottledb/0.1 (catalog-fetch)");

    let catalog_endpoint = or_default(
        "BOTTLEDB_CATALOG_ENDPOINT",
        "https://services.baxus.co/api/search/listings",
    );
    let catalog_page_size = parse_u32("BOTTLEDB_CATALOG_PAGE_SIZE", "1000")?;
    let catalog_inter_request_delay_ms =
        parse_u64("BOTTLEDB_CATALOG_INTER_REQUEST_DELAY_MS", "500")?;
    let catalog_max_retries = parse_u32("BOTTLEDB_CATALOG_MAX_RETRIES", "3")?;
    let catalog_backoff_base_secs = parse_u64("BOTTLEDB_CATALOG_BACKOFF_BASE_SECS", "1")?;
    let catalog_request_timeout_secs = parse_u64("BOTTLEDB_CATALOG_REQUEST_TIMEOUT_SECS", "10")?;
    let catalog_output_path = PathBuf::from(or_default(
        "BOTTLEDB_CATALOG_OUTPUT_PATH",
        "./bottle_catalog.json",
    ));

    let groq_api_token = lookup("GROQ_API_TOKEN").ok().filter(|s| !s.is_empty());
    let llm_api_base = or_default("BOTTLEDB_LLM_API_BASE", "https://api.groq.com/openai/v1");
    let llm_model = or_default("BOTTLEDB_LLM_MODEL", "qwen-qwq-32b");
    let llm_max_tokens = parse_u32("BOTTLEDB_LLM_MAX_TOKENS", "4096")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        user_agent,
        catalog_endpoint,
        catalog_page_size,
        catalog_inter_request_delay_ms,
        catalog_max_retries,
        catalog_backoff_base_secs,
        catalog_request_timeout_secs,
        catalog_output_path,
        groq_api_token,
        llm_api_base,
        llm_model,
        llm_max_tokens,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
