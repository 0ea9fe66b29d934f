use clap::Subcommand;
use std::path::PathBuf;

use fuelday_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default food catalog path
    SetFoods { path: PathBuf },
    /// Set the default template catalog path
    SetTemplates { path: PathBuf },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetFoods { path } => {
            let mut config = Config::load_or_default();
            config.foods_path = Some(path);
            config.save()?;
            println!("foods path updated");
        }
        ConfigAction::SetTemplates { path } => {
            let mut config = Config::load_or_default();
            config.templates_path = Some(path);
            config.save()?;
            println!("templates path updated");
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
    }
    Ok(())
}
