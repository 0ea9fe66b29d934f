//! # Fuelday Core Library
//!
//! This library provides the planning engine for Fuelday, a rule-based
//! daily meal-and-hydration planner for student-athletes. All operations
//! are available through this library; the CLI binary is a thin layer over
//! the same core.
//!
//! ## Architecture
//!
//! - **Target Estimator**: BMR, session burn, macro split, and water target
//!   from heuristic sports-nutrition constants
//! - **Slot Scheduler**: meal time points placed around training sessions
//!   with collision avoidance and gap-filling snacks
//! - **Selector/Composer**: constraint-aware food and template selection,
//!   portion-scaled to each slot's calorie allocation
//! - **Hydration**: evenly-spaced reminders biased toward session times
//! - **Planner**: one-call orchestration with single-meal swap support
//!
//! ## Key Components
//!
//! - [`Planner`]: one planning run per `generate` call
//! - [`SlotScheduler`]: meal slot placement and calorie allocation
//! - [`HydrationPlanner`]: hydration reminder generation
//! - [`Config`]: user configuration management

pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod hydration;
pub mod planner;
pub mod profile;
pub mod selector;
pub mod session;
pub mod slots;
pub mod targets;

pub use catalog::{load_foods, load_templates, FoodItem, ItemRole, MealTemplate, TemplateItem};
pub use composer::{ComposedMeal, MealTotals, PlannedItem};
pub use config::Config;
pub use error::{CatalogError, ConfigError, CoreError, ValidationError};
pub use hydration::{HydrationPlanner, HydrationReminder};
pub use planner::{DailyPlan, PlanRequest, PlannedMeal, Planner, PlannerConfig, SwapDirective};
pub use profile::{ActivityLevel, AthleteProfile, DayType, Goal, Sex, UserConstraints};
pub use selector::SelectionHistory;
pub use session::{
    template_sessions, validate_sessions, Intensity, SessionType, TrainingSession,
};
pub use slots::{MealPurpose, MealSlot, SlotRules, SlotScheduler};
pub use targets::{estimate, met_for, DailyTargets};
