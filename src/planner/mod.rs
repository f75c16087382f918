// ABOUTME: Plan and infographic request clients used by the generation pipeline
// ABOUTME: Prompt construction, structured plan parsing, and inline image extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Infographic generation client
pub mod image_client;
/// Structured plan generation client
pub mod plan_client;
/// Prompt builders
pub mod prompts;

pub use image_client::ImageRequestClient;
pub use plan_client::PlanRequestClient;
