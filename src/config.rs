use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    /// Base URL of the ML microservice (OCR, food detection, recommendations).
    pub ml_base_url: String,
    /// Path to the CSV food dataset loaded at startup.
    pub food_csv_path: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutritrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutritrack-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let llm = LlmConfig {
            api_key: std::env::var("TOGETHER_API_KEY").unwrap_or_default(),
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.together.xyz/v1".into()),
            model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| "meta-llama/Llama-3.3-70B-Instruct-Turbo".into()),
        };
        Ok(Self {
            database_url,
            jwt,
            llm,
            ml_base_url: std::env::var("ML_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5001".into()),
            food_csv_path: std::env::var("FOOD_CSV_PATH")
                .unwrap_or_else(|_| "data/indian_foods.csv".into()),
        })
    }
}
