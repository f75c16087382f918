// ABOUTME: Shared test helpers for HTTP integration tests
// ABOUTME: Exports the in-process axum request/response utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
