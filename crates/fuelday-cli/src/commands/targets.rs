use clap::Subcommand;
use std::fs;
use std::path::PathBuf;

use fuelday_core::{estimate, validate_sessions, AthleteProfile, TrainingSession};

#[derive(Subcommand)]
pub enum TargetsAction {
    /// Estimate daily calorie, macro, and hydration targets
    Estimate {
        /// Body weight (kg)
        #[arg(long)]
        weight: f64,
        /// Height (cm)
        #[arg(long)]
        height: f64,
        #[arg(long)]
        age: u32,
        /// female or male
        #[arg(long)]
        sex: String,
        /// low, normal, or high
        #[arg(long, default_value = "normal")]
        activity: String,
        /// cut, maintain, or gain
        #[arg(long, default_value = "maintain")]
        goal: String,
        /// JSON file with the day's training sessions
        #[arg(long)]
        sessions: Option<PathBuf>,
    },
}

pub fn run(action: TargetsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TargetsAction::Estimate {
            weight,
            height,
            age,
            sex,
            activity,
            goal,
            sessions,
        } => {
            let profile = AthleteProfile {
                weight_kg: weight,
                height_cm: height,
                age,
                sex: sex.parse()?,
                activity_level: activity.parse()?,
                goal: goal.parse()?,
            };

            let sessions: Vec<TrainingSession> = match sessions {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => Vec::new(),
            };
            validate_sessions(&sessions)?;

            let targets = estimate(&profile, &sessions);
            println!("{}", serde_json::to_string_pretty(&targets)?);
        }
    }
    Ok(())
}
