use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Anthropic API key for AI risk scoring. Optional: without it every
    /// assessment uses the rule-based fallback model.
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    /// Close CRM API key. Optional: without it CRM sync is skipped.
    pub close_api_key: Option<String>,
    pub admin_api_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "https://api.anthropic.com".to_string()),
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "claude-sonnet-4".to_string()),
            close_api_key: std::env::var("CLOSE_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            admin_api_key: std::env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("ADMIN_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("Server Port: {}", config.port);
        tracing::info!(
            "AI risk scoring: {}",
            if config.anthropic_api_key.is_some() {
                "configured"
            } else {
                "not configured (rule-based fallback only)"
            }
        );
        tracing::info!(
            "Close CRM sync: {}",
            if config.close_api_key.is_some() {
                "configured"
            } else {
                "not configured (sync skipped)"
            }
        );

        Ok(config)
    }
}
