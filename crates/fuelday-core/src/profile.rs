//! Athlete profile, goals, and dietary constraints.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Biological sex, as used by the Mifflin-St Jeor BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

/// Daily activity level outside of training (NEAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Normal,
    High,
}

/// Body-composition goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Cut,
    Maintain,
    Gain,
}

/// Kind of day being planned. Drives the per-purpose calorie fractions;
/// any day that is neither a tournament nor a class day uses the rest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Tournament,
    Classes,
    Rest,
}

/// Body metrics and goals for one athlete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Dietary constraints, immutable per planning run.
///
/// Food-name and allergen matching is case-sensitive exact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConstraints {
    #[serde(default)]
    pub lactose_intolerant: bool,
    #[serde(default)]
    pub disliked_foods: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

fn unknown(field: &str, value: &str, expected: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: format!("'{value}' is not one of {expected}"),
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            other => Err(unknown("sex", other, "female, male")),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ActivityLevel::Low),
            "normal" => Ok(ActivityLevel::Normal),
            "high" => Ok(ActivityLevel::High),
            other => Err(unknown("activity_level", other, "low, normal, high")),
        }
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cut" => Ok(Goal::Cut),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(unknown("goal", other, "cut, maintain, gain")),
        }
    }
}

impl FromStr for DayType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tournament" => Ok(DayType::Tournament),
            "classes" => Ok(DayType::Classes),
            "rest" => Ok(DayType::Rest),
            other => Err(unknown("day_type", other, "tournament, classes, rest")),
        }
    }
}
