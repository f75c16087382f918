// ABOUTME: User profile model and the editable draft used to capture it
// ABOUTME: Biometric and lifestyle attributes with range validation and restriction tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::constants::{limits, profile_defaults};
use crate::errors::{AppError, AppResult};

/// Gender as declared by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    #[default]
    Male,
    /// Female
    Female,
    /// Other or undisclosed
    Other,
}

impl Gender {
    /// Wire name used in prompts and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Habitual activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Physical job or twice-daily training
    VeryActive,
}

impl ActivityLevel {
    /// Wire name used in prompts and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

/// Nutrition goal the plan is tailored to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Caloric deficit
    WeightLoss,
    /// Caloric surplus with high protein
    MuscleGain,
    /// Caloric balance
    #[default]
    Maintenance,
    /// Micronutrient and wellbeing focus
    HealthOptimization,
}

impl Goal {
    /// Wire name used in prompts and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Maintenance => "maintenance",
            Self::HealthOptimization => "health_optimization",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Gender, ActivityLevel, Goal);

/// Biometric and lifestyle profile submitted for plan generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years (1-120)
    pub age: u32,
    /// Declared gender
    pub gender: Gender,
    /// Body weight in kilograms (>= 20)
    pub weight: f64,
    /// Height in centimeters (>= 50)
    pub height: f64,
    /// Habitual activity level
    pub activity_level: ActivityLevel,
    /// Nutrition goal
    pub goal: Goal,
    /// Free-text restriction tags, unique, in insertion order
    pub dietary_restrictions: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: profile_defaults::AGE,
            gender: Gender::default(),
            weight: profile_defaults::WEIGHT_KG,
            height: profile_defaults::HEIGHT_CM,
            activity_level: ActivityLevel::default(),
            goal: Goal::default(),
            dietary_restrictions: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Validate ranges and restriction tags
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for age, weight or height outside the accepted
    /// bounds, and `InvalidInput` for blank or repeated restriction tags.
    pub fn validate(&self) -> AppResult<()> {
        if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&self.age) {
            return Err(AppError::out_of_range(format!(
                "age must be between {} and {}, got {}",
                limits::MIN_AGE,
                limits::MAX_AGE,
                self.age
            )));
        }
        if !self.weight.is_finite() || self.weight < limits::MIN_WEIGHT_KG {
            return Err(AppError::out_of_range(format!(
                "weight must be at least {} kg, got {}",
                limits::MIN_WEIGHT_KG,
                self.weight
            )));
        }
        if !self.height.is_finite() || self.height < limits::MIN_HEIGHT_CM {
            return Err(AppError::out_of_range(format!(
                "height must be at least {} cm, got {}",
                limits::MIN_HEIGHT_CM,
                self.height
            )));
        }
        for (index, tag) in self.dietary_restrictions.iter().enumerate() {
            if tag.trim().is_empty() {
                return Err(AppError::invalid_input(
                    "dietary restriction tags must not be empty",
                ));
            }
            if self.dietary_restrictions[..index].contains(tag) {
                return Err(AppError::invalid_input(format!(
                    "dietary restriction '{tag}' is listed more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Field-level edit applied to a [`ProfileDraft`]; absent fields are left as-is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New age
    pub age: Option<u32>,
    /// New gender
    pub gender: Option<Gender>,
    /// New weight in kilograms
    pub weight: Option<f64>,
    /// New height in centimeters
    pub height: Option<f64>,
    /// New activity level
    pub activity_level: Option<ActivityLevel>,
    /// New goal
    pub goal: Option<Goal>,
}

/// Editable profile held while the user fills in the form
///
/// Edits are accepted freely; range checks happen once, in [`ProfileDraft::snapshot`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileDraft {
    #[serde(flatten)]
    profile: UserProfile,
}

impl ProfileDraft {
    /// Create a draft pre-filled with the form defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values
    #[must_use]
    pub const fn current(&self) -> &UserProfile {
        &self.profile
    }

    /// Set the age
    pub fn set_age(&mut self, age: u32) {
        self.profile.age = age;
    }

    /// Set the gender
    pub fn set_gender(&mut self, gender: Gender) {
        self.profile.gender = gender;
    }

    /// Set the weight in kilograms
    pub fn set_weight(&mut self, weight: f64) {
        self.profile.weight = weight;
    }

    /// Set the height in centimeters
    pub fn set_height(&mut self, height: f64) {
        self.profile.height = height;
    }

    /// Set the activity level
    pub fn set_activity_level(&mut self, activity_level: ActivityLevel) {
        self.profile.activity_level = activity_level;
    }

    /// Set the goal
    pub fn set_goal(&mut self, goal: Goal) {
        self.profile.goal = goal;
    }

    /// Apply every field present in `update`
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(age) = update.age {
            self.set_age(age);
        }
        if let Some(gender) = update.gender {
            self.set_gender(gender);
        }
        if let Some(weight) = update.weight {
            self.set_weight(weight);
        }
        if let Some(height) = update.height {
            self.set_height(height);
        }
        if let Some(activity_level) = update.activity_level {
            self.set_activity_level(activity_level);
        }
        if let Some(goal) = update.goal {
            self.set_goal(goal);
        }
    }

    /// Restriction tags in insertion order
    #[must_use]
    pub fn restrictions(&self) -> &[String] {
        &self.profile.dietary_restrictions
    }

    /// Add a dietary restriction tag
    ///
    /// The tag is trimmed; matching against existing tags is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank tag and `ResourceAlreadyExists` when the
    /// tag is already present. The draft is unchanged in both cases.
    pub fn add_restriction(&mut self, tag: &str) -> AppResult<()> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(AppError::invalid_input(
                "dietary restriction tag must not be empty",
            ));
        }
        if self.profile.dietary_restrictions.iter().any(|t| t == tag) {
            return Err(AppError::already_exists(format!(
                "dietary restriction '{tag}' is already listed"
            )));
        }
        self.profile.dietary_restrictions.push(tag.to_owned());
        Ok(())
    }

    /// Remove a restriction tag by exact value, returning whether it was present
    pub fn remove_restriction(&mut self, tag: &str) -> bool {
        let before = self.profile.dietary_restrictions.len();
        self.profile.dietary_restrictions.retain(|t| t != tag);
        self.profile.dietary_restrictions.len() != before
    }

    /// Produce the immutable profile handed to the orchestrator
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`UserProfile::validate`].
    pub fn snapshot(&self) -> AppResult<UserProfile> {
        self.profile.validate()?;
        Ok(self.profile.clone())
    }
}
