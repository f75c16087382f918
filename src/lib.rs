// ABOUTME: Main library entry point for the NutriVision plan generation server
// ABOUTME: Turns a user profile into a structured nutrition plan and a matching infographic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriVision Server
//!
//! Collects a biometric and lifestyle profile, asks a generative text model
//! for a one-day nutrition plan in a strict JSON shape, then asks an image
//! model for an infographic of that plan.
//!
//! ## Architecture
//!
//! - **Config**: environment-based configuration
//! - **LLM**: generation service seam and the Gemini REST client
//! - **Planner**: prompt builders and the plan/image request clients
//! - **Orchestrator**: the two-step pipeline and its state machine
//! - **Routes**: HTTP surface for profile editing and plan retrieval
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nutrivision_server::config::ServerConfig;
//! use nutrivision_server::errors::AppResult;
//! use nutrivision_server::llm::GeminiClient;
//! use nutrivision_server::orchestrator::Orchestrator;
//! use nutrivision_server::models::UserProfile;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let service = Arc::new(GeminiClient::from_config(&config.generation));
//!     let orchestrator = Orchestrator::from_config(service, &config.generation);
//!     let snapshot = orchestrator.generate(UserProfile::default()).await?;
//!     println!("{:?}", snapshot.phase);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Generation service seam and Gemini client
pub mod llm;

/// Tracing subscriber setup
pub mod logging;

/// Plan generation pipeline
pub mod orchestrator;

/// Plan and image request clients
pub mod planner;

/// HTTP routes
pub mod routes;

pub use nutrivision_core::{constants, errors, models};
