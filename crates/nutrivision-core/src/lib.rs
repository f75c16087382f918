// ABOUTME: Core types and constants for the NutriVision plan generator
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriVision Core
//!
//! Foundation crate providing shared types and constants for the NutriVision
//! plan generator. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Validation limits, model identifiers, and MIME types
//! - **models**: User profile, nutritional plan, and plan image types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, plan, image)
pub mod models;
