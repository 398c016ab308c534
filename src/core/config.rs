use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
    /// Adds the `Secure` attribute to the session cookie (enable behind TLS)
    pub session_cookie_secure: bool,
}

/// Remote directory API the console delegates every read and write to
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `https://api.example.org/api`
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            api: ApiConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Gallery uploads carry several images per request
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 25 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let session_cookie_secure = parse_bool("SESSION_COOKIE_SECURE", false)?;

        Ok(Self {
            host,
            port,
            max_request_body_size,
            session_cookie_secure,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_request_body_size: Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
            session_cookie_secure: false,
        }
    }
}

impl ApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("API_BASE_URL")
            .map_err(|_| "API_BASE_URL environment variable is required".to_string())?;

        let timeout_secs = env::var("API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "API_TIMEOUT_SECS must be a valid number".to_string())?;

        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(format!(
                "API_BASE_URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        Ok(Self { base_url, timeout })
    }
}

fn parse_bool(key: &str, default: bool) -> Result<bool, String> {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(format!("{} must be a boolean, got '{}'", key, other)),
        },
        Err(_) => Ok(default),
    }
}
