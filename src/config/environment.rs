// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads the provider credential, model selection, and HTTP binding from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! The provider credential is the only required value. A missing credential is
//! a startup failure (`ConfigMissing`), never a per-request error.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::net::IpAddr;

use nutrivision_core::constants::models;
use nutrivision_core::errors::{AppError, AppResult};
use tracing::info;

/// Primary environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Legacy variable accepted when `GEMINI_API_KEY` is unset
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
/// Text model override
pub const PLAN_MODEL_ENV: &str = "NUTRIVISION_PLAN_MODEL";
/// Image model override
pub const IMAGE_MODEL_ENV: &str = "NUTRIVISION_IMAGE_MODEL";
/// API base URL override
pub const API_BASE_URL_ENV: &str = "GEMINI_API_BASE_URL";
/// Bind address override
pub const HTTP_HOST_ENV: &str = "HTTP_HOST";
/// Bind port override
pub const HTTP_PORT_ENV: &str = "HTTP_PORT";

/// Default Gemini REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default bind address
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Settings for the generative model provider
#[derive(Clone)]
pub struct GenerationConfig {
    /// API credential
    pub api_key: String,
    /// Base URL of the REST API
    pub api_base_url: String,
    /// Model used for the structured plan
    pub plan_model: String,
    /// Model used for the infographic
    pub image_model: String,
}

impl Debug for GenerationConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("plan_model", &self.plan_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Provider settings
    pub generation: GenerationConfig,
    /// Address the HTTP server binds to
    pub http_host: IpAddr,
    /// Port the HTTP server binds to
    pub http_port: u16,
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no API key is set and `ConfigInvalid` when a
    /// value cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(GEMINI_API_KEY_ENV)
            .or_else(|| non_blank(LEGACY_API_KEY_ENV))
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "{GEMINI_API_KEY_ENV} environment variable not set"
                ))
            })?;

        let http_host = match non_blank(HTTP_HOST_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::config_invalid(format!("Invalid {HTTP_HOST_ENV} value '{raw}': {e}"))
            })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let http_port = match non_blank(HTTP_PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::config_invalid(format!("Invalid {HTTP_PORT_ENV} value '{raw}': {e}"))
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            generation: GenerationConfig {
                api_key: api_key.trim().to_owned(),
                api_base_url: non_blank(API_BASE_URL_ENV)
                    .map_or_else(|| DEFAULT_API_BASE_URL.to_owned(), |url| {
                        url.trim_end_matches('/').to_owned()
                    }),
                plan_model: non_blank(PLAN_MODEL_ENV)
                    .unwrap_or_else(|| models::DEFAULT_PLAN_MODEL.to_owned()),
                image_model: non_blank(IMAGE_MODEL_ENV)
                    .unwrap_or_else(|| models::DEFAULT_IMAGE_MODEL.to_owned()),
            },
            http_host,
            http_port,
        })
    }

    /// Human-readable configuration summary (never includes the API key)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "NutriVision Server Configuration:\n\
             - HTTP: {}:{}\n\
             - API Base URL: {}\n\
             - Plan Model: {}\n\
             - Image Model: {}",
            self.http_host,
            self.http_port,
            self.generation.api_base_url,
            self.generation.plan_model,
            self.generation.image_model,
        )
    }
}
