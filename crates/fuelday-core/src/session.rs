//! Training session types, validation, and day-type session templates.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::DayType;

/// Kind of scheduled block in the athlete's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Class,
    Skill,
    Strength,
    Endurance,
    Mixed,
    Tournament,
}

/// Subjective session intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Easy,
    Moderate,
    Hard,
}

/// A time-boxed training or class block.
///
/// Sessions may overlap each other; overlap is tolerated, not an error.
/// The `end > start` invariant is enforced by [`validate_sessions`] before
/// planning, not by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub session_type: SessionType,
    pub intensity: Intensity,
}

impl TrainingSession {
    /// Create a new session.
    pub fn new(
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        session_type: SessionType,
        intensity: Intensity,
    ) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            session_type,
            intensity,
        }
    }

    /// Session duration in hours, clamped at zero.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds().max(0) as f64 / 3600.0
    }

    /// Whether this session warrants dedicated pre-event and post-workout
    /// meal slots. Classes and easy sessions never do.
    pub fn is_fuel_session(&self) -> bool {
        matches!(
            self.session_type,
            SessionType::Tournament
                | SessionType::Strength
                | SessionType::Endurance
                | SessionType::Mixed
                | SessionType::Skill
        ) && matches!(self.intensity, Intensity::Moderate | Intensity::Hard)
    }
}

/// Reject any session whose end does not come after its start.
///
/// Callers invoke this before handing sessions to the planner.
pub fn validate_sessions(sessions: &[TrainingSession]) -> Result<(), ValidationError> {
    for s in sessions {
        if s.end <= s.start {
            return Err(ValidationError::InvalidTimeRange {
                label: s.label.clone(),
                start: s.start,
                end: s.end,
            });
        }
    }
    Ok(())
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}

/// Default sessions for a day type, used to seed a new day's schedule.
pub fn template_sessions(date: NaiveDate, day_type: DayType) -> Vec<TrainingSession> {
    match day_type {
        DayType::Tournament => vec![
            TrainingSession::new(
                "Competition Block 1",
                at(date, 9, 0),
                at(date, 11, 0),
                SessionType::Tournament,
                Intensity::Hard,
            ),
            TrainingSession::new(
                "Competition Block 2",
                at(date, 14, 0),
                at(date, 18, 0),
                SessionType::Tournament,
                Intensity::Hard,
            ),
        ],
        DayType::Classes => vec![
            TrainingSession::new(
                "Classes",
                at(date, 10, 0),
                at(date, 15, 0),
                SessionType::Class,
                Intensity::Easy,
            ),
            TrainingSession::new(
                "Training",
                at(date, 19, 0),
                at(date, 21, 0),
                SessionType::Skill,
                Intensity::Moderate,
            ),
        ],
        DayType::Rest => vec![TrainingSession::new(
            "Classes",
            at(date, 10, 0),
            at(date, 15, 0),
            SessionType::Class,
            Intensity::Easy,
        )],
    }
}
