use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};

use fuelday_core::{
    load_foods, load_templates, validate_sessions, Config, DailyPlan, PlanRequest, Planner,
    PlannerConfig, SwapDirective,
};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate a plan from a request file
    Generate {
        /// Path to a PlanRequest JSON file
        request: PathBuf,
        /// Food catalog (defaults to the configured path)
        #[arg(long)]
        foods: Option<PathBuf>,
        /// Template catalog (defaults to the configured path)
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Seed for deterministic template selection
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the meal table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Regenerate one meal, excluding its previous template
    Swap {
        /// Path to a PlanRequest JSON file
        request: PathBuf,
        /// Purpose of the slot to swap
        #[arg(long)]
        purpose: String,
        /// Time of the slot to swap (RFC 3339)
        #[arg(long)]
        time: String,
        /// Template name to exclude
        #[arg(long)]
        exclude: Option<String>,
        #[arg(long)]
        foods: Option<PathBuf>,
        #[arg(long)]
        templates: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Generate {
            request,
            foods,
            templates,
            seed,
            csv,
        } => generate(&request, foods, templates, seed, csv, None),
        PlanAction::Swap {
            request,
            purpose,
            time,
            exclude,
            foods,
            templates,
            seed,
            csv,
        } => {
            let directive = SwapDirective {
                purpose: purpose.parse()?,
                time: DateTime::parse_from_rfc3339(&time)?.with_timezone(&Utc),
                exclude_template: exclude,
            };
            generate(&request, foods, templates, seed, csv, Some(directive))
        }
    }
}

fn generate(
    request_path: &Path,
    foods_path: Option<PathBuf>,
    templates_path: Option<PathBuf>,
    seed: Option<u64>,
    csv_path: Option<PathBuf>,
    swap: Option<SwapDirective>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let foods_path = foods_path
        .or_else(|| config.foods_path.clone())
        .ok_or("no food catalog: pass --foods or set foods_path in config")?;
    let templates_path = templates_path
        .or_else(|| config.templates_path.clone())
        .ok_or("no template catalog: pass --templates or set templates_path in config")?;

    let raw = fs::read_to_string(request_path)?;
    let request: PlanRequest = serde_json::from_str(&raw)?;
    validate_sessions(&request.sessions)?;

    let foods = load_foods(&foods_path)?;
    let templates = load_templates(&templates_path)?;

    let planner = Planner::with_config(PlannerConfig {
        hydration_interval_minutes: config.hydration_interval_minutes,
        seed: seed.or(config.seed),
    });
    let plan = planner.generate(&request, &foods, &templates, swap.as_ref());

    println!("{}", serde_json::to_string_pretty(&plan)?);
    if let Some(path) = csv_path {
        write_csv(&plan, &path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn write_csv(plan: &DailyPlan, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "time",
        "label",
        "purpose",
        "kcal_target",
        "items",
        "kcal_actual",
        "carbs_g",
        "protein_g",
        "fat_g",
        "note",
    ])?;
    for meal in &plan.meals {
        let items = meal
            .items
            .iter()
            .map(|i| format!("{} ({}g)", i.name, i.grams))
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([
            meal.time.format("%H:%M").to_string(),
            meal.label.clone(),
            meal.purpose.to_string(),
            format!("{:.1}", meal.kcal_target),
            items,
            meal.totals.kcal.to_string(),
            meal.totals.carbs.to_string(),
            meal.totals.protein.to_string(),
            meal.totals.fat.to_string(),
            meal.note.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
