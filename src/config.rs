use serde::Deserialize;

/// Lookup endpoint used when `LOOKUP_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://decryptkarnrwalebkl.wasmer.app/";

/// API key used when `API_KEY` is not set.
pub const FALLBACK_API_KEY: &str = "lodalelobaby";

/// Default timeout for the outbound lookup call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub api_key: String,
    /// False when `API_KEY` was missing and the fallback key is in use.
    pub api_key_from_env: bool,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|name| std::env::var(name).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Lookup API URL: {}", config.api_url);
        tracing::debug!("Lookup timeout: {}s", config.timeout_secs);
        tracing::debug!("Server Port: {}", config.port);
        if !config.api_key_from_env {
            tracing::warn!("API_KEY not set, using fallback key");
        }

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("API_KEY").filter(|key| !key.trim().is_empty());

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            api_url: match var("LOOKUP_API_URL") {
                Some(url) => {
                    if url.trim().is_empty() {
                        anyhow::bail!("LOOKUP_API_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("LOOKUP_API_URL must start with http:// or https://");
                    }
                    url
                }
                None => DEFAULT_API_URL.to_string(),
            },
            api_key_from_env: api_key.is_some(),
            api_key: api_key.unwrap_or_else(|| FALLBACK_API_KEY.to_string()),
            timeout_secs: match var("LOOKUP_TIMEOUT_SECS") {
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => anyhow::bail!("LOOKUP_TIMEOUT_SECS must be a positive integer"),
                },
                None => DEFAULT_TIMEOUT_SECS,
            },
        })
    }
}
