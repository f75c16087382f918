// ABOUTME: Response schema sent with the plan request to force structured JSON output
// ABOUTME: Builds the nutritional plan schema from reusable macros and meal fragments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{json, Value};

/// Schema for a macronutrient breakdown
#[must_use]
pub fn macros_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "protein": { "type": "NUMBER" },
            "carbs": { "type": "NUMBER" },
            "fats": { "type": "NUMBER" }
        },
        "required": ["protein", "carbs", "fats"]
    })
}

/// Schema for a single meal
#[must_use]
pub fn meal_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "calories": { "type": "NUMBER" },
            "macros": macros_schema()
        },
        "required": ["name", "description", "calories", "macros"]
    })
}

fn string_list_schema() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Full schema for a `NutritionalPlan`
///
/// Field names match the plan's camelCase wire format so the model output
/// deserializes directly.
#[must_use]
pub fn nutritional_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dailyPlan": {
                "type": "OBJECT",
                "properties": {
                    "totalCalories": { "type": "NUMBER" },
                    "totalMacros": macros_schema(),
                    "meals": {
                        "type": "OBJECT",
                        "properties": {
                            "breakfast": meal_schema(),
                            "lunch": meal_schema(),
                            "dinner": meal_schema(),
                            "snacks": { "type": "ARRAY", "items": meal_schema() }
                        },
                        "required": ["breakfast", "lunch", "dinner", "snacks"]
                    },
                    "advice": string_list_schema()
                },
                "required": ["totalCalories", "totalMacros", "meals", "advice"]
            },
            "recommendations": string_list_schema(),
            "tips": string_list_schema()
        },
        "required": ["dailyPlan", "recommendations", "tips"],
        "propertyOrdering": ["dailyPlan", "recommendations", "tips"]
    })
}
