use chrono::NaiveDate;
use clap::Subcommand;

use fuelday_core::template_sessions;

#[derive(Subcommand)]
pub enum SessionsAction {
    /// Print the default sessions for a day type
    Template {
        /// Day to place the sessions on (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// tournament, classes, or rest
        #[arg(long = "day-type")]
        day_type: String,
    },
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionsAction::Template { date, day_type } => {
            let sessions = template_sessions(date, day_type.parse()?);
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
