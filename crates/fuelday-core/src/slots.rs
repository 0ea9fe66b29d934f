//! Meal slot scheduling around training sessions.
//!
//! This module places breakfast/lunch/dinner anchors from the wake/bed
//! window, adds pre-event and post-workout slots around fuel sessions with
//! collision avoidance, fills long gaps with snacks, and allocates each
//! slot a day-type-specific fraction of the daily calorie target.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::profile::DayType;
use crate::session::TrainingSession;

/// What a meal slot is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealPurpose {
    Breakfast,
    Lunch,
    Dinner,
    PreEvent,
    PostWorkout,
    Snack,
}

impl MealPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            MealPurpose::Breakfast => "breakfast",
            MealPurpose::Lunch => "lunch",
            MealPurpose::Dinner => "dinner",
            MealPurpose::PreEvent => "pre-event",
            MealPurpose::PostWorkout => "post-workout",
            MealPurpose::Snack => "snack",
        }
    }
}

impl fmt::Display for MealPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPurpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealPurpose::Breakfast),
            "lunch" => Ok(MealPurpose::Lunch),
            "dinner" => Ok(MealPurpose::Dinner),
            "pre-event" => Ok(MealPurpose::PreEvent),
            "post-workout" => Ok(MealPurpose::PostWorkout),
            "snack" => Ok(MealPurpose::Snack),
            other => Err(ValidationError::InvalidValue {
                field: "purpose".to_string(),
                message: format!(
                    "'{other}' is not one of breakfast, lunch, dinner, pre-event, post-workout, snack"
                ),
            }),
        }
    }
}

/// A scheduled meal slot.
///
/// Identity for swap matching is the (purpose, time) pair; the scheduler
/// never produces two slots sharing both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSlot {
    pub label: String,
    pub time: DateTime<Utc>,
    pub purpose: MealPurpose,
    pub kcal_target: f64,
}

impl MealSlot {
    fn new(label: impl Into<String>, time: DateTime<Utc>, purpose: MealPurpose) -> Self {
        Self {
            label: label.into(),
            time,
            purpose,
            kcal_target: 0.0,
        }
    }
}

/// Timing rules for slot placement.
#[derive(Debug, Clone)]
pub struct SlotRules {
    /// Breakfast offset from wake (minutes)
    pub breakfast_after_wake_minutes: i64,
    /// Dinner offset after the last session's end (minutes)
    pub dinner_after_session_minutes: i64,
    /// Dinner offset before bed when there are no sessions (minutes)
    pub dinner_before_bed_minutes: i64,
    /// Pre-event snack lead time before a fuel session (minutes)
    pub pre_event_lead_minutes: i64,
    /// Post-workout slot delay after a fuel session (minutes)
    pub post_workout_delay_minutes: i64,
    /// Minimum spacing between any two slots (minutes)
    pub slot_proximity_minutes: i64,
    /// No fuel-driven slot earlier than wake plus this (minutes)
    pub earliest_after_wake_minutes: i64,
    /// Pre-event retry step when the first proposal collides (minutes)
    pub retry_backoff_minutes: i64,
    /// Retried pre-event slots must still be at least this far past wake (minutes)
    pub retry_floor_after_wake_minutes: i64,
    /// No post-workout slot later than bed minus this (minutes)
    pub latest_before_bed_minutes: i64,
    /// Adjacent-slot gaps longer than this get a snack at the midpoint (hours)
    pub gap_snack_threshold_hours: f64,
}

impl Default for SlotRules {
    fn default() -> Self {
        Self {
            breakfast_after_wake_minutes: 60,
            dinner_after_session_minutes: 60,
            dinner_before_bed_minutes: 180,
            pre_event_lead_minutes: 90,
            post_workout_delay_minutes: 30,
            slot_proximity_minutes: 60,
            earliest_after_wake_minutes: 30,
            retry_backoff_minutes: 60,
            retry_floor_after_wake_minutes: 10,
            latest_before_bed_minutes: 45,
            gap_snack_threshold_hours: 4.0,
        }
    }
}

/// Scheduler for a day's meal slots.
pub struct SlotScheduler {
    rules: SlotRules,
}

impl SlotScheduler {
    /// Create a scheduler with default rules.
    pub fn new() -> Self {
        Self {
            rules: SlotRules::default(),
        }
    }

    /// Create with custom rules.
    pub fn with_rules(rules: SlotRules) -> Self {
        Self { rules }
    }

    /// Generate the day's meal slots, time-sorted, with kcal targets
    /// allocated so that they sum to `target_kcal`.
    pub fn schedule(
        &self,
        wake: DateTime<Utc>,
        bed: DateTime<Utc>,
        sessions: &[TrainingSession],
        target_kcal: f64,
        day_type: DayType,
    ) -> Vec<MealSlot> {
        let r = &self.rules;
        let mut slots: Vec<MealSlot> = Vec::new();

        let fuel: Vec<&TrainingSession> =
            sessions.iter().filter(|s| s.is_fuel_session()).collect();
        let last_session_end = sessions.iter().map(|s| s.end).max();

        let breakfast = wake + Duration::minutes(r.breakfast_after_wake_minutes);
        slots.push(MealSlot::new("Breakfast", breakfast, MealPurpose::Breakfast));

        let dinner = match last_session_end {
            Some(end) => end + Duration::minutes(r.dinner_after_session_minutes),
            None => bed - Duration::minutes(r.dinner_before_bed_minutes),
        };
        slots.push(MealSlot::new("Dinner", dinner, MealPurpose::Dinner));

        let lunch = breakfast + (dinner - breakfast) / 2;
        slots.push(MealSlot::new("Lunch", lunch, MealPurpose::Lunch));

        // Pre-event snacks: one collision retry, stepping back one window.
        for s in &fuel {
            let proposed = s.start - Duration::minutes(r.pre_event_lead_minutes);
            if proposed < wake + Duration::minutes(r.earliest_after_wake_minutes) {
                continue;
            }

            let mut time = proposed;
            let mut conflicting = self.too_close(&slots, time);
            if conflicting {
                let retry = proposed - Duration::minutes(r.retry_backoff_minutes);
                if retry >= wake + Duration::minutes(r.retry_floor_after_wake_minutes) {
                    conflicting = self.too_close(&slots, retry);
                    if !conflicting {
                        time = retry;
                    }
                }
            }
            if conflicting {
                continue;
            }

            slots.push(MealSlot::new(
                format!("Pre-{} snack", s.label),
                time,
                MealPurpose::PreEvent,
            ));
        }

        // Post-workout recovery slots: single attempt, no retry.
        for s in &fuel {
            let proposed = s.end + Duration::minutes(r.post_workout_delay_minutes);
            if proposed > bed - Duration::minutes(r.latest_before_bed_minutes) {
                continue;
            }
            if self.too_close(&slots, proposed) {
                continue;
            }
            slots.push(MealSlot::new(
                format!("Post-{} recovery", s.label),
                proposed,
                MealPurpose::PostWorkout,
            ));
        }

        // Gap snacks, computed against the sorted list in one pass
        // (no cascading re-insertion).
        slots.sort_by_key(|s| s.time);
        let mut gap_snacks: Vec<MealSlot> = Vec::new();
        for pair in slots.windows(2) {
            let gap = pair[1].time - pair[0].time;
            let gap_hours = gap.num_seconds() as f64 / 3600.0;
            if gap_hours > r.gap_snack_threshold_hours {
                gap_snacks.push(MealSlot::new(
                    "Snack",
                    pair[0].time + gap / 2,
                    MealPurpose::Snack,
                ));
            }
        }
        slots.append(&mut gap_snacks);
        slots.sort_by_key(|s| s.time);

        // Calorie allocation: renormalized day-type fractions, so the
        // slot targets always sum to target_kcal.
        let fractions: Vec<f64> = slots
            .iter()
            .map(|s| fraction_for(day_type, s.purpose))
            .collect();
        let sum: f64 = fractions.iter().sum();
        let scale = if sum > 0.0 { 1.0 / sum } else { 1.0 };
        for (slot, f) in slots.iter_mut().zip(&fractions) {
            slot.kcal_target = target_kcal * f * scale;
        }

        slots
    }

    fn too_close(&self, slots: &[MealSlot], time: DateTime<Utc>) -> bool {
        let window = self.rules.slot_proximity_minutes * 60;
        slots
            .iter()
            .any(|s| (s.time - time).num_seconds().abs() < window)
    }
}

impl Default for SlotScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn fraction_for(day_type: DayType, purpose: MealPurpose) -> f64 {
    use MealPurpose::{Breakfast, Dinner, Lunch, PostWorkout, PreEvent, Snack};
    match day_type {
        DayType::Tournament => match purpose {
            Breakfast => 0.25,
            Lunch => 0.25,
            Dinner => 0.25,
            PreEvent => 0.12,
            PostWorkout => 0.10,
            Snack => 0.06,
        },
        DayType::Classes => match purpose {
            Breakfast => 0.22,
            Lunch => 0.30,
            Dinner => 0.30,
            PreEvent => 0.10,
            PostWorkout => 0.10,
            Snack => 0.04,
        },
        DayType::Rest => match purpose {
            Breakfast => 0.25,
            Lunch => 0.35,
            Dinner => 0.30,
            PreEvent => 0.05,
            PostWorkout => 0.00,
            Snack => 0.05,
        },
    }
}
