use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://livease-backend.onrender.com/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub views: ViewConfig,
    pub scraping: ScrapingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub page_size: u32,
    /// How long a form's success message stays up before the modal closes
    pub success_delay_ms: u64,
    pub recent_activity_limit: u32,
    pub support_ticket_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub results_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::for_app_env(env::var("APP_ENV").ok().as_deref()).with_env_overrides()
    }

    /// Defaults for an `APP_ENV` value. Unset or unknown means the live backend.
    fn for_app_env(app_env: Option<&str>) -> Self {
        let environment = match app_env {
            Some("development") | Some("dev") => Environment::Development,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Production,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LIVEASE_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("LIVEASE_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("LIVEASE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("LIVEASE_PAGE_SIZE") {
            // Page size must stay positive
            self.views.page_size = v.parse().ok().filter(|n| *n > 0).unwrap_or(self.views.page_size);
        }
        if let Ok(v) = env::var("LIVEASE_SUCCESS_DELAY_MS") {
            self.views.success_delay_ms = v.parse().unwrap_or(self.views.success_delay_ms);
        }

        if let Ok(v) = env::var("LIVEASE_SCRAPE_LIMIT") {
            self.scraping.results_limit = v.parse().unwrap_or(self.scraping.results_limit);
        }

        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.views.success_delay_ms)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:4001/api/v1".to_string(),
                request_timeout_secs: 60,
                enable_request_logging: true,
            },
            views: ViewConfig {
                page_size: 10,
                success_delay_ms: 1500,
                recent_activity_limit: 10,
                support_ticket_limit: 5,
            },
            scraping: ScrapingConfig { results_limit: 20 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            views: ViewConfig {
                page_size: 10,
                success_delay_ms: 1500,
                recent_activity_limit: 10,
                support_ticket_limit: 5,
            },
            scraping: ScrapingConfig { results_limit: 20 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 30,
                enable_request_logging: false,
            },
            views: ViewConfig {
                page_size: 10,
                success_delay_ms: 1500,
                recent_activity_limit: 10,
                support_ticket_limit: 5,
            },
            scraping: ScrapingConfig { results_limit: 20 },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, "http://localhost:4001/api/v1");
        assert_eq!(config.views.page_size, 10);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.success_delay(), Duration::from_millis(1500));
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn test_unset_app_env_uses_live_backend() {
        let config = AppConfig::for_app_env(None);
        assert!(matches!(config.environment, Environment::Production));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);

        let config = AppConfig::for_app_env(Some("dev"));
        assert_eq!(config.api.base_url, "http://localhost:4001/api/v1");
        assert_eq!(AppConfig::for_app_env(Some("nonsense")).api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_scrape_limit_default() {
        for config in [AppConfig::development(), AppConfig::staging(), AppConfig::production()] {
            assert_eq!(config.scraping.results_limit, 20);
        }
    }

    #[test]
    fn test_dashboard_limits() {
        let config = AppConfig::staging();
        assert_eq!(config.views.recent_activity_limit, 10);
        assert_eq!(config.views.support_ticket_limit, 5);
    }
}
