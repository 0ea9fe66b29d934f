//! Daily calorie, macronutrient, and hydration target estimation.
//!
//! All constants here are sports-nutrition heuristics, not medical advice:
//! Mifflin-St Jeor for BMR, a fixed MET table for session burn, g/kg rules
//! for protein and fat, and 35 ml/kg plus training add-ons for water.

use serde::{Deserialize, Serialize};

use crate::profile::{ActivityLevel, AthleteProfile, Goal, Sex};
use crate::session::{Intensity, SessionType, TrainingSession};

/// Estimated daily targets for one athlete-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTargets {
    /// Total calorie target, rounded to the nearest 50 kcal
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    /// Estimated calories burned in training sessions
    pub session_kcal: f64,
    pub bmr: f64,
    /// Total water target, rounded to the nearest 10 ml
    pub water_ml: i32,
    pub baseline_water_ml: f64,
    pub training_water_ml: f64,
}

/// MET multiplier for a (session type, intensity) pair.
pub fn met_for(session_type: SessionType, intensity: Intensity) -> f64 {
    use Intensity::{Easy, Hard, Moderate};
    match session_type {
        SessionType::Strength => match intensity {
            Easy => 3.5,
            Moderate => 5.0,
            Hard => 6.0,
        },
        SessionType::Endurance => match intensity {
            Easy => 6.0,
            Moderate => 8.0,
            Hard => 10.0,
        },
        SessionType::Skill => match intensity {
            Easy => 3.0,
            Moderate => 4.0,
            Hard => 5.0,
        },
        SessionType::Mixed => match intensity {
            Easy => 5.0,
            Moderate => 7.0,
            Hard => 9.0,
        },
        SessionType::Tournament => match intensity {
            Easy => 9.0,
            Moderate => 11.0,
            Hard => 12.0,
        },
        SessionType::Class => 1.5,
    }
}

fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Low => 1.2,
        ActivityLevel::Normal => 1.35,
        ActivityLevel::High => 1.5,
    }
}

fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::Cut => -300.0,
        Goal::Maintain => 0.0,
        Goal::Gain => 250.0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate daily calorie, macro, and hydration targets.
///
/// Session energy is strictly additive across overlapping sessions; there
/// is no overlap discount.
pub fn estimate(profile: &AthleteProfile, sessions: &[TrainingSession]) -> DailyTargets {
    let weight = profile.weight_kg;

    let sex_term = match profile.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = 10.0 * weight + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age) + sex_term;
    let base = bmr * activity_factor(profile.activity_level);

    let session_kcal: f64 = sessions
        .iter()
        .map(|s| met_for(s.session_type, s.intensity) * weight * s.duration_hours())
        .sum();

    let total = base + session_kcal + goal_adjustment(profile.goal);
    let kcal = (total / 50.0).round() * 50.0;

    let protein_g = weight * if profile.goal == Goal::Cut { 2.1 } else { 1.8 };
    let fat_g = weight * 0.8;
    let carbs_g = (kcal - protein_g * 4.0 - fat_g * 9.0).max(0.0) / 4.0;

    let baseline_water_ml = 35.0 * weight;
    let training_hours: f64 = sessions.iter().map(TrainingSession::duration_hours).sum();
    let hard_hours: f64 = sessions
        .iter()
        .filter(|s| s.intensity == Intensity::Hard && s.session_type != SessionType::Class)
        .map(TrainingSession::duration_hours)
        .sum();
    let training_water_ml = 500.0 * training_hours + 250.0 * hard_hours;
    let water_ml = (((baseline_water_ml + training_water_ml) / 10.0).round() * 10.0) as i32;

    DailyTargets {
        kcal,
        protein_g: round1(protein_g),
        carbs_g: round1(carbs_g),
        fat_g: round1(fat_g),
        session_kcal: round1(session_kcal),
        bmr: round1(bmr),
        water_ml,
        baseline_water_ml: baseline_water_ml.round(),
        training_water_ml: training_water_ml.round(),
    }
}
