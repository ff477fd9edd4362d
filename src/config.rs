// Configuration loaded once from the environment at startup.

use crate::infra::classifier::openai_moderation_client::DEFAULT_MODERATION_URL;
use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Credentials and endpoints the moderation service needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the moderation classifier
    pub openai_api_key: String,

    /// Classifier endpoint
    pub moderation_api_url: String,

    /// Classifier model; omitted from requests when unset
    pub moderation_model: Option<String>,

    /// Report store URL (`https://...`, `sqlite:...` or `memory:`)
    pub store_url: String,

    /// Service-role key for the report store
    pub store_service_key: String,
}

/// Which report store implementation a store URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgrest,
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("sqlite:") {
            StoreBackend::Sqlite
        } else if url.starts_with("memory:") {
            StoreBackend::Memory
        } else {
            StoreBackend::Postgrest
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing. Every missing variable is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY");
        let store_url = get("SUPABASE_URL");
        let store_service_key = get("SUPABASE_SERVICE_ROLE_KEY");

        match (openai_api_key, store_url, store_service_key) {
            (Some(openai_api_key), Some(store_url), Some(store_service_key)) => Ok(Self {
                openai_api_key,
                moderation_api_url: get("MODERATION_API_URL")
                    .unwrap_or_else(|| DEFAULT_MODERATION_URL.to_string()),
                moderation_model: get("MODERATION_MODEL"),
                store_url,
                store_service_key,
            }),
            (openai_api_key, store_url, store_service_key) => {
                let mut missing = Vec::new();
                if openai_api_key.is_none() {
                    missing.push("OPENAI_API_KEY");
                }
                if store_url.is_none() {
                    missing.push("SUPABASE_URL");
                }
                if store_service_key.is_none() {
                    missing.push("SUPABASE_SERVICE_ROLE_KEY");
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }

    pub fn store_backend(&self) -> StoreBackend {
        StoreBackend::from_url(&self.store_url)
    }
}

/// Address the HTTP server listens on.
pub fn bind_address() -> String {
    env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_complete_environment() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.moderation_api_url, DEFAULT_MODERATION_URL);
        assert_eq!(config.moderation_model, None);
        assert_eq!(config.store_backend(), StoreBackend::Postgrest);
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let err = Config::from_lookup(lookup(&[("SUPABASE_URL", "memory:")])).unwrap_err();

        let ConfigError::Missing(missing) = err;
        assert_eq!(missing, vec!["OPENAI_API_KEY", "SUPABASE_SERVICE_ROLE_KEY"]);
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "   "),
            ("SUPABASE_URL", "memory:"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required environment variables: OPENAI_API_KEY"
        );
    }

    #[test]
    fn test_optional_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SUPABASE_URL", "sqlite:data/reports.db"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
            ("MODERATION_API_URL", "http://localhost:9000/v1/moderations"),
            ("MODERATION_MODEL", "omni-moderation-latest"),
        ]))
        .unwrap();

        assert_eq!(config.moderation_api_url, "http://localhost:9000/v1/moderations");
        assert_eq!(config.moderation_model.as_deref(), Some("omni-moderation-latest"));
        assert_eq!(config.store_backend(), StoreBackend::Sqlite);
    }

    #[test]
    fn test_store_backend_selection() {
        assert_eq!(StoreBackend::from_url("memory:"), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_url("sqlite://reports.db"), StoreBackend::Sqlite);
        assert_eq!(
            StoreBackend::from_url("https://abc.supabase.co"),
            StoreBackend::Postgrest
        );
    }
}
