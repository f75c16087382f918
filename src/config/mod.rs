// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes environment-driven server and provider configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the NutriVision server
//!
//! - **Environment**: Server and provider configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{GenerationConfig, ServerConfig};
