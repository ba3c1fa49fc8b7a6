//! Centralized configuration for form-server.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than at request time.

use axum::http::HeaderValue;
use std::env;
use std::net::IpAddr;
use thiserror::Error;

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Configuration error.
#[derive(Debug, Error)]
#[error("Configuration error for {field}: {message}")]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 3001)
    pub port: u16,
    /// Listen address (default: 0.0.0.0)
    pub bind_addr: IpAddr,
    /// CORS allow origin for the JSON API
    pub cors_allow_origin: HeaderValue,
    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Port
        let port = match lookup("PORT") {
            Some(s) => s.trim().parse().map_err(|e| ConfigError {
                field: "PORT",
                message: format!("Invalid port '{}': {}", s, e),
            })?,
            None => 3001,
        };

        // Bind address
        let bind_addr = match lookup("BIND_ADDR") {
            Some(s) => s.trim().parse().map_err(|e| ConfigError {
                field: "BIND_ADDR",
                message: format!("Invalid IP address '{}': {}", s, e),
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        // CORS allow origin
        let cors_origin_str = lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".into());
        let cors_allow_origin = if cors_origin_str == "*" {
            HeaderValue::from_static("*")
        } else {
            HeaderValue::from_str(&cors_origin_str).map_err(|e| ConfigError {
                field: "CORS_ALLOW_ORIGIN",
                message: format!("Invalid header value '{}': {}", cors_origin_str, e),
            })?
        };

        // Log format
        let log_format = LogFormat::from_str(&lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".into()));

        Ok(Self {
            port,
            bind_addr,
            cors_allow_origin,
            log_format,
        })
    }

    pub fn cors_is_permissive(&self) -> bool {
        self.cors_allow_origin == HeaderValue::from_static("*")
    }

    /// Log warnings about insecure configuration.
    pub fn warn_if_insecure(&self) {
        if self.cors_is_permissive() {
            tracing::warn!(
                "CORS_ALLOW_ORIGIN=*: /api/validate accepts requests from any origin. \
                 Set CORS_ALLOW_ORIGIN to restrict it."
            );
        }
    }
}
