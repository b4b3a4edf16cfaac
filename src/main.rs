use std::{io, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use log::info;

use petfarm::{
    config::ConfigLoader, locale::LocaleBundle, rng::RngManager, terminal::RawKeyboard,
    AppSettings, FarmApp, FarmConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generates a random pet farm and its monthly food needs")]
struct Cli {
    /// Path to a farm configuration YAML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Locale to use instead of asking (e.g. "en")
    #[arg(long)]
    locale: Option<String>,

    /// Fixed random seed (clock-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the smallest farm size
    #[arg(long)]
    min_pets: Option<usize>,

    /// Override the exclusive upper bound of the farm size
    #[arg(long)]
    max_pets: Option<usize>,

    /// Draw progress bars without pauses
    #[arg(long)]
    no_animation: bool,

    /// Print the available locales and exit
    #[arg(long)]
    list_locales: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => FarmConfig::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(min_pets) = cli.min_pets {
        config.population.min_pets = min_pets;
    }
    if let Some(max_pets) = cli.max_pets {
        config.population.max_pets = max_pets;
    }

    let bundle = match &config.locale_file {
        Some(path) => LocaleBundle::load(path)?,
        None => LocaleBundle::embedded()?,
    };
    bundle.validate()?;

    if cli.list_locales {
        for locale in bundle.available_locales() {
            println!("{locale}\t{}", bundle.lookup(locale, "language")?);
        }
        return Ok(());
    }

    let mut settings = AppSettings::from_config(&config)?;
    settings.locale = cli.locale;
    if cli.no_animation {
        settings.max_delay = Duration::ZERO;
    }

    let rngs = config
        .seed
        .map(RngManager::new)
        .unwrap_or_else(RngManager::from_clock);
    info!("random seed {}", rngs.seed());

    let mut app = FarmApp::new(bundle, settings, rngs, io::stdout(), RawKeyboard);
    let summaries = app.run()?;
    info!("session finished after {} farm(s)", summaries.len());
    Ok(())
}
