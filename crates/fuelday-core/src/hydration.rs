//! Hydration reminders spread across the waking window.
//!
//! Base reminders tick at a fixed interval; extra reminders hug session
//! start/end times. After de-duplication the daily water target is split
//! evenly. With many reminders the 100 ml floor can push the summed
//! volume past the target; that is accepted heuristic behavior.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{SessionType, TrainingSession};

/// A single hydration prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationReminder {
    pub time: DateTime<Utc>,
    pub label: String,
    pub ml: i32,
}

/// Generator for a day's hydration reminders.
pub struct HydrationPlanner {
    interval_minutes: i64,
}

impl HydrationPlanner {
    /// Create a planner with the default 2-hour interval.
    pub fn new() -> Self {
        Self {
            interval_minutes: 120,
        }
    }

    /// Set the base reminder interval.
    pub fn with_interval(mut self, minutes: i64) -> Self {
        self.interval_minutes = minutes;
        self
    }

    /// Generate time-sorted, de-duplicated reminders for the day.
    pub fn generate(
        &self,
        wake: DateTime<Utc>,
        bed: DateTime<Utc>,
        sessions: &[TrainingSession],
        total_water_ml: f64,
    ) -> Vec<HydrationReminder> {
        let start = wake + Duration::minutes(30);
        let end = bed - Duration::minutes(45);
        if end <= start {
            return Vec::new();
        }

        let mut reminders: Vec<HydrationReminder> = Vec::new();
        let mut t = start;
        while t <= end {
            reminders.push(HydrationReminder {
                time: t,
                label: "Drink water".to_string(),
                ml: 0,
            });
            t += Duration::minutes(self.interval_minutes);
        }

        for s in sessions {
            if s.session_type == SessionType::Class {
                continue;
            }
            reminders.push(HydrationReminder {
                time: s.start - Duration::minutes(20),
                label: format!("Hydrate before {}", s.label),
                ml: 0,
            });
            reminders.push(HydrationReminder {
                time: s.end + Duration::minutes(15),
                label: format!("Hydrate after {}", s.label),
                ml: 0,
            });
        }

        // Greedy de-duplication in time order, keeping the earliest of any
        // pair closer than 20 minutes.
        reminders.sort_by_key(|r| r.time);
        let mut deduped: Vec<HydrationReminder> = Vec::new();
        for r in reminders {
            if let Some(last) = deduped.last() {
                if r.time - last.time < Duration::minutes(20) {
                    continue;
                }
            }
            deduped.push(r);
        }

        if !deduped.is_empty() {
            let per = ((total_water_ml / deduped.len() as f64) / 10.0).round() * 10.0;
            let per = (per as i32).max(100);
            for r in &mut deduped {
                r.ml = per;
            }
        }

        deduped
    }
}

impl Default for HydrationPlanner {
    fn default() -> Self {
        Self::new()
    }
}
