// ABOUTME: Nutritional plan and infographic models produced by the generation pipeline
// ABOUTME: Meals, macros, daily totals, and the base64-decoded plan image
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::constants::mime;
use crate::errors::{AppError, AppResult};

/// Macronutrient amounts in grams
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fats (g)
    pub fats: f64,
}

/// A single meal in the plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Dish name
    pub name: String,
    /// Short description of the dish
    pub description: String,
    /// Energy in kcal
    pub calories: f64,
    /// Macronutrient breakdown
    pub macros: Macros,
}

/// The four meal slots of a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meals {
    /// Breakfast
    pub breakfast: Meal,
    /// Lunch
    pub lunch: Meal,
    /// Dinner
    pub dinner: Meal,
    /// Zero or more snacks, in order
    pub snacks: Vec<Meal>,
}

/// Daily totals, meals, and advice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    /// Total energy for the day in kcal
    pub total_calories: f64,
    /// Total macronutrients for the day
    pub total_macros: Macros,
    /// Meal slots
    pub meals: Meals,
    /// Day-specific advice lines
    pub advice: Vec<String>,
}

/// Structured one-day nutrition plan
///
/// Every field is required on deserialization; a payload missing any nested
/// field fails instead of being defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalPlan {
    /// The day plan
    pub daily_plan: DailyPlan,
    /// General recommendations
    pub recommendations: Vec<String>,
    /// Practical tips
    pub tips: Vec<String>,
}

impl Macros {
    fn violation(&self, path: &str) -> Option<String> {
        [
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ]
        .into_iter()
        .find_map(|(field, value)| non_negative(&format!("{path}.{field}"), value))
    }
}

impl Meal {
    fn violation(&self, path: &str) -> Option<String> {
        non_negative(&format!("{path}.calories"), self.calories)
            .or_else(|| self.macros.violation(&format!("{path}.macros")))
    }
}

impl NutritionalPlan {
    /// Find the first numeric value that is negative or not finite
    ///
    /// Returns the JSON path and value of the offending field.
    #[must_use]
    pub fn find_violation(&self) -> Option<String> {
        let day = &self.daily_plan;
        non_negative("dailyPlan.totalCalories", day.total_calories)
            .or_else(|| day.total_macros.violation("dailyPlan.totalMacros"))
            .or_else(|| day.meals.breakfast.violation("dailyPlan.meals.breakfast"))
            .or_else(|| day.meals.lunch.violation("dailyPlan.meals.lunch"))
            .or_else(|| day.meals.dinner.violation("dailyPlan.meals.dinner"))
            .or_else(|| {
                day.meals
                    .snacks
                    .iter()
                    .enumerate()
                    .find_map(|(i, snack)| {
                        snack.violation(&format!("dailyPlan.meals.snacks[{i}]"))
                    })
            })
    }
}

fn non_negative(path: &str, value: f64) -> Option<String> {
    (!value.is_finite() || value < 0.0)
        .then(|| format!("{path} must be a non-negative number, got {value}"))
}

/// Infographic illustrating a [`NutritionalPlan`]
///
/// Holds the decoded PNG bytes; [`PlanImage::data_uri`] re-encodes them for display.
#[derive(Clone, PartialEq, Eq)]
pub struct PlanImage {
    bytes: Vec<u8>,
}

impl PlanImage {
    /// Decode a base64 payload as returned in a model's inline data part
    ///
    /// # Errors
    ///
    /// Returns `ImageGenerationFailed` when the payload is not valid base64 or is empty.
    pub fn from_base64(data: &str) -> AppResult<Self> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| AppError::image_generation(format!("Invalid image payload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::image_generation("Image payload is empty"));
        }
        Ok(Self { bytes })
    }

    /// Raw PNG bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type of the image
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        mime::IMAGE_PNG
    }

    /// `data:image/png;base64,...` URI for direct display
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", mime::IMAGE_PNG, STANDARD.encode(&self.bytes))
    }
}

impl std::fmt::Debug for PlanImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanImage")
            .field("mime_type", &mime::IMAGE_PNG)
            .field("len", &self.bytes.len())
            .finish()
    }
}
