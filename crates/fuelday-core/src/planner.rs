//! Daily plan orchestration.
//!
//! One `generate` call runs the whole pipeline: target estimation, slot
//! scheduling, per-slot meal composition, and hydration reminders. The
//! result is handed to the caller wholesale; the planner keeps no state
//! between calls.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{FoodItem, MealTemplate};
use crate::composer::{self, ComposedMeal, MealTotals, PlannedItem};
use crate::hydration::{HydrationPlanner, HydrationReminder};
use crate::profile::{AthleteProfile, DayType, UserConstraints};
use crate::selector::SelectionHistory;
use crate::session::TrainingSession;
use crate::slots::{MealPurpose, MealSlot, SlotScheduler};
use crate::targets::{self, DailyTargets};

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Base hydration reminder interval (minutes)
    pub hydration_interval_minutes: i64,
    /// Seed for deterministic template selection (None = entropy)
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hydration_interval_minutes: 120,
            seed: None,
        }
    }
}

/// Everything the planner needs for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub profile: AthleteProfile,
    pub day_type: DayType,
    pub wake: DateTime<Utc>,
    pub bed: DateTime<Utc>,
    #[serde(default)]
    pub sessions: Vec<TrainingSession>,
    #[serde(default)]
    pub constraints: UserConstraints,
}

/// Request to regenerate exactly one meal slot with a different template.
///
/// Matches a slot by its (purpose, time) identity; a directive that matches
/// no slot is a no-op, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDirective {
    pub purpose: MealPurpose,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub exclude_template: Option<String>,
}

impl SwapDirective {
    fn matches(&self, slot: &MealSlot) -> bool {
        self.purpose == slot.purpose && self.time == slot.time
    }
}

/// A meal slot together with its composed food selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub label: String,
    pub time: DateTime<Utc>,
    pub purpose: MealPurpose,
    pub kcal_target: f64,
    pub items: Vec<PlannedItem>,
    pub totals: MealTotals,
    pub note: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl PlannedMeal {
    fn assemble(slot: &MealSlot, meal: ComposedMeal) -> Self {
        Self {
            label: slot.label.clone(),
            time: slot.time,
            purpose: slot.purpose,
            kcal_target: slot.kcal_target,
            items: meal.items,
            totals: meal.totals,
            note: meal.note,
            template: meal.template,
        }
    }
}

/// A full day's plan: targets, meals, and hydration reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub targets: DailyTargets,
    pub meals: Vec<PlannedMeal>,
    pub hydration: Vec<HydrationReminder>,
}

/// Orchestrates one planning run per `generate` call.
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner with default config.
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Generate the daily plan.
    ///
    /// Callers validate sessions (see [`crate::session::validate_sessions`])
    /// before invoking; the engine does not re-validate.
    pub fn generate(
        &self,
        request: &PlanRequest,
        foods: &[FoodItem],
        templates: &[MealTemplate],
        swap: Option<&SwapDirective>,
    ) -> DailyPlan {
        let targets = targets::estimate(&request.profile, &request.sessions);
        debug!(kcal = targets.kcal, water_ml = targets.water_ml, "estimated daily targets");

        let slots = SlotScheduler::new().schedule(
            request.wake,
            request.bed,
            &request.sessions,
            targets.kcal,
            request.day_type,
        );
        debug!(slots = slots.len(), "scheduled meal slots");

        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        let mut history = SelectionHistory::new();

        let mut meals: Vec<PlannedMeal> = Vec::with_capacity(slots.len());
        for slot in &slots {
            let directive = swap.filter(|d| d.matches(slot));
            let meal = composer::compose(
                slot,
                foods,
                &request.constraints,
                templates,
                &mut history,
                directive.is_some(),
                directive.and_then(|d| d.exclude_template.as_deref()),
                &mut rng,
            );
            meals.push(PlannedMeal::assemble(slot, meal));
        }
        meals.sort_by_key(|m| m.time);

        let hydration = HydrationPlanner::new()
            .with_interval(self.config.hydration_interval_minutes)
            .generate(
                request.wake,
                request.bed,
                &request.sessions,
                f64::from(targets.water_ml),
            );

        DailyPlan {
            targets,
            meals,
            hydration,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Intensity, SessionType};
    use chrono::TimeZone;

    fn day(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn request() -> PlanRequest {
        PlanRequest {
            profile: AthleteProfile {
                weight_kg: 60.0,
                height_cm: 160.0,
                age: 19,
                sex: crate::profile::Sex::Female,
                activity_level: crate::profile::ActivityLevel::Normal,
                goal: crate::profile::Goal::Maintain,
            },
            day_type: DayType::Classes,
            wake: day(7, 0),
            bed: day(23, 0),
            sessions: vec![TrainingSession::new(
                "Practice",
                day(18, 0),
                day(20, 0),
                SessionType::Skill,
                Intensity::Hard,
            )],
            constraints: UserConstraints::default(),
        }
    }

    fn food(name: &str, kcal: f64, carbs: f64, protein: f64, fat: f64, tags: &[&str]) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            kcal_per_100g: kcal,
            carbs_per_100g: carbs,
            protein_per_100g: protein,
            fat_per_100g: fat,
            lactose_free: true,
            allergens: vec![],
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn foods() -> Vec<FoodItem> {
        vec![
            food("Oats", 380.0, 60.0, 13.0, 7.0, &["breakfast"]),
            food("Rice", 130.0, 28.0, 2.7, 0.3, &["lunch", "dinner"]),
            food("Chicken breast", 165.0, 0.0, 31.0, 3.6, &["lunch", "dinner"]),
            food("Banana", 89.0, 23.0, 1.1, 0.3, &["snack", "pre-event", "quick_sugar"]),
            food("Olive oil", 884.0, 0.0, 0.0, 100.0, &["lunch", "dinner"]),
        ]
    }

    #[test]
    fn plan_contains_main_meals_in_time_order() {
        let plan = Planner::new().generate(&request(), &foods(), &[], None);

        assert!(plan.meals.windows(2).all(|p| p[0].time <= p[1].time));
        for purpose in [MealPurpose::Breakfast, MealPurpose::Lunch, MealPurpose::Dinner] {
            assert!(plan.meals.iter().any(|m| m.purpose == purpose));
        }
        assert!(!plan.hydration.is_empty());
    }

    #[test]
    fn meal_kcal_targets_sum_to_daily_target() {
        let plan = Planner::new().generate(&request(), &foods(), &[], None);
        let sum: f64 = plan.meals.iter().map(|m| m.kcal_target).sum();
        assert!((sum - plan.targets.kcal).abs() < 1e-6);
    }

    #[test]
    fn unmatched_swap_directive_is_a_no_op() {
        let config = PlannerConfig {
            seed: Some(11),
            ..Default::default()
        };
        let baseline = Planner::with_config(config.clone()).generate(&request(), &foods(), &[], None);

        let swap = SwapDirective {
            purpose: MealPurpose::Dinner,
            time: day(3, 33),
            exclude_template: Some("anything".to_string()),
        };
        let swapped =
            Planner::with_config(config).generate(&request(), &foods(), &[], Some(&swap));

        assert_eq!(baseline.meals.len(), swapped.meals.len());
        for (a, b) in baseline.meals.iter().zip(&swapped.meals) {
            assert_eq!(a.items, b.items);
            assert_eq!(a.totals, b.totals);
        }
    }
}
