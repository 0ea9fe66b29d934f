use clap::Subcommand;
use std::path::PathBuf;

use fuelday_core::{load_foods, load_templates, Config};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List foods in a catalog
    Foods {
        /// Catalog path (defaults to the configured path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List meal templates in a catalog
    Templates {
        /// Catalog path (defaults to the configured path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        CatalogAction::Foods { path } => {
            let path = path
                .or(config.foods_path)
                .ok_or("no food catalog: pass --path or set foods_path in config")?;
            let foods = load_foods(&path)?;
            println!("{} foods", foods.len());
            for f in &foods {
                println!(
                    "{}  {:.0} kcal/100g  [{}]",
                    f.name,
                    f.kcal_per_100g,
                    f.tags.join(", ")
                );
            }
        }
        CatalogAction::Templates { path } => {
            let path = path
                .or(config.templates_path)
                .ok_or("no template catalog: pass --path or set templates_path in config")?;
            let templates = load_templates(&path)?;
            println!("{} templates", templates.len());
            for t in &templates {
                let purposes = match &t.purpose {
                    Some(p) => p.clone(),
                    None => t.purposes.join(", "),
                };
                println!("{}  ({})  {} items", t.name, purposes, t.items.len());
            }
        }
    }
    Ok(())
}
