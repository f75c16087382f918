// ABOUTME: Prompt builders for the plan and infographic generation calls
// ABOUTME: Renders profile fields and plan numbers into natural-language instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrivision_core::models::{NutritionalPlan, UserProfile};

/// Text used for an empty restriction list
pub const NO_RESTRICTIONS: &str = "None";

/// Build the instruction sent to the text model
///
/// Numbers use their shortest decimal rendering (`75`, `72.5`).
#[must_use]
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let restrictions = if profile.dietary_restrictions.is_empty() {
        NO_RESTRICTIONS.to_owned()
    } else {
        profile.dietary_restrictions.join(", ")
    };

    format!(
        "Generate a comprehensive 1-day personalized nutritional plan for the following user:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Weight: {weight}kg\n\
         - Height: {height}cm\n\
         - Activity Level: {activity}\n\
         - Goal: {goal}\n\
         - Dietary Restrictions: {restrictions}\n\
         \n\
         Ensure the calorie and macro counts are scientifically accurate for their goals.\n",
        age = profile.age,
        gender = profile.gender,
        weight = profile.weight,
        height = profile.height,
        activity = profile.activity_level,
        goal = profile.goal,
    )
}

/// Summary of the three main meals and the daily totals, values copied verbatim
#[must_use]
pub fn meal_summary(plan: &NutritionalPlan) -> String {
    let day = &plan.daily_plan;
    let meals = &day.meals;
    format!(
        "Breakfast: {} ({}kcal)\n\
         Lunch: {} ({}kcal)\n\
         Dinner: {} ({}kcal)\n\
         Total Daily Calories: {} kcal\n\
         Total Macros: Protein {}g, Carbs {}g, Fat {}g",
        meals.breakfast.name,
        meals.breakfast.calories,
        meals.lunch.name,
        meals.lunch.calories,
        meals.dinner.name,
        meals.dinner.calories,
        day.total_calories,
        day.total_macros.protein,
        day.total_macros.carbs,
        day.total_macros.fats,
    )
}

/// Build the instruction sent to the image model
#[must_use]
pub fn build_image_prompt(plan: &NutritionalPlan) -> String {
    format!(
        "Create a professional and vibrant nutritional infographic for this daily meal plan.\n\
         Data to include prominently:\n\
         {summary}\n\
         \n\
         Visual requirements:\n\
         - Use high-contrast typography (dark text on light backgrounds or vice-versa).\n\
         - Modern, clean layout with sections for Breakfast, Lunch, and Dinner.\n\
         - Vibrant, fresh food photography (e.g., green vegetables, protein sources, berries).\n\
         - Background should be light and clean.\n\
         - NO blurry text; ensure the numbers and meal names are clear and legible.\n",
        summary = meal_summary(plan),
    )
}
