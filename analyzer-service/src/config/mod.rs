use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

use crate::services::providers::gemini::GEMINI_API_BASE;

/// Default model for image analysis.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Origins allowed to call the API with credentials: the two local dev
/// hosts plus the deployed frontend.
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,https://healthdecoded.vercel.app";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl AnalyzerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AnalyzerConfig {
            common: common_config,
            gemini: GeminiSettings {
                // No default: a missing key must fail startup, not the
                // first model call.
                api_key: get_env("GEMINI_API_KEY", None, is_prod)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
            },
            security: SecurityConfig {
                allowed_origins: parse_origins(&get_env(
                    "ALLOWED_ORIGINS",
                    Some(DEFAULT_ALLOWED_ORIGINS),
                    is_prod,
                )?),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://example.com ,"),
            vec![
                "http://localhost:5173".to_string(),
                "https://example.com".to_string()
            ]
        );
    }

    #[test]
    fn default_origins_list_the_three_frontends() {
        let origins = parse_origins(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "https://healthdecoded.vercel.app"
            ]
        );
    }
}
