use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub user_agent: String,
    pub catalog_endpoint: String,
    pub catalog_page_size: u32,
    pub catalog_inter_request_delay_ms: u64,
    pub catalog_max_retries: u32,
    pub catalog_backoff_base_secs: u64,
    pub catalog_request_timeout_secs: u64,
    pub catalog_output_path: PathBuf,
    pub groq_api_token: Option<String>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("catalog_endpoint", &self.catalog_endpoint)
            .field("catalog_page_size", &self.catalog_page_size)
            .field(
                "catalog_inter_request_delay_ms",
                &self.catalog_inter_request_delay_ms,
            )
            .field("catalog_max_retries", &self.catalog_max_retries)
            .field(
                "catalog_backoff_base_secs",
                &self.catalog_backoff_base_secs,
            )
            .field(
                "catalog_request_timeout_secs",
                &self.catalog_request_timeout_secs,
            )
            .field("catalog_output_path", &self.catalog_output_path)
            .field(
                "groq_api_token",
                &self.groq_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_api_base", &self.llm_api_base)
            .field("llm_model", &self.llm_model)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .finish()
    }
}
