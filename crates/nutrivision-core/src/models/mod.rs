// ABOUTME: Domain models for profile capture, generated plans, and plan images
// ABOUTME: Re-exports profile and plan types for convenient access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Nutritional plan and infographic types
pub mod plan;
/// User profile and editable draft
pub mod profile;

pub use plan::{DailyPlan, Macros, Meal, Meals, NutritionalPlan, PlanImage};
pub use profile::{ActivityLevel, Gender, Goal, ProfileDraft, ProfileUpdate, UserProfile};
