use url::Url;

use crate::error::ApiError;

pub const DEFAULT_COBALT_API_URL: &str = "https://api.cobalt.tools";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const UPSTREAM_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Cobalt origin without trailing slash.
    pub cobalt_api_url: String,
    pub bind_addr: String,
    /// Overrides the proxy URL embedded in rendered pages.
    pub public_api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ApiError> {
        let cobalt_api_url = read_string_env("COBALT_API_URL")
            .unwrap_or_else(|| DEFAULT_COBALT_API_URL.to_string());

        Ok(Self {
            cobalt_api_url: normalize_cobalt_url(&cobalt_api_url)?,
            bind_addr: resolve_bind_addr(),
            public_api_url: read_string_env("PUBLIC_API_URL"),
        })
    }

    pub fn with_cobalt_url(cobalt_api_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            cobalt_api_url: normalize_cobalt_url(cobalt_api_url)?,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            public_api_url: None,
        })
    }
}

pub fn normalize_cobalt_url(value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|error| {
        ApiError::internal(format!(
            "Invalid COBALT_API_URL {value:?}: {error}. Use a value like https://api.cobalt.tools"
        ))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(ApiError::internal(format!(
            "Invalid COBALT_API_URL {value:?}: unsupported scheme {scheme}"
        ))),
    }
}

fn resolve_bind_addr() -> String {
    if let Some(configured) = read_string_env("APP_ADDR") {
        return configured;
    }

    if let Some(port) = std::env::var("PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
    {
        return format!("0.0.0.0:{port}");
    }

    DEFAULT_BIND_ADDR.to_string()
}

fn read_string_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .and_then(|value| non_empty(&value).map(ToString::to_string))
}

pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes_from_cobalt_url() {
        assert_eq!(
            normalize_cobalt_url("https://cobalt.example.com//").unwrap(),
            "https://cobalt.example.com"
        );
        assert_eq!(
            normalize_cobalt_url(" http://127.0.0.1:9000/ ").unwrap(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn rejects_non_http_cobalt_url() {
        assert!(normalize_cobalt_url("ftp://cobalt.example.com").is_err());
        assert!(normalize_cobalt_url("not a url").is_err());
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("  a "), Some("a"));
        assert_eq!(non_empty("   "), None);
    }
}
