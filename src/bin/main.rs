use anyhow::{Context, Result};
use augment_core::config::Config;
use augment_core::persistence::{load_dictionaries, save_dictionary, save_report};
use augment_core::AugmentEngine;
use clap::Parser;
use crossterm::style::Stylize;
use log::info;

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    let original = load_dictionaries(&config.sources).context("loading source dictionaries")?;

    info!("Populating prefix tree");
    let mut engine = AugmentEngine::with_settings(original, config.engine_settings());
    info!("Done populating prefix tree");

    let report = engine.run();
    for pass in &report.passes {
        info!("{:<32} visited {:>8}  changed {:>8}", pass.name, pass.visited, pass.changed);
    }

    let output = engine.into_output();
    for target in &config.targets {
        save_dictionary(&output, target).with_context(|| format!("writing {}", target.display()))?;
        info!("Wrote {} additional entries to {}", output.len(), target.display());
        println!(
            "{} {} entries to {}",
            "Wrote".green().bold(),
            output.len().to_string().bold(),
            target.display()
        );
    }
    if let Some(path) = &config.report_target {
        save_report(&report, path).with_context(|| format!("writing report {}", path.display()))?;
    }
    if report.skipped_proper_names > 0 {
        println!("{} {} proper names", "Skipped".yellow(), report.skipped_proper_names);
    }
    Ok(())
}
