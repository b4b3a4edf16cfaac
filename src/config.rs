use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{animal::AnimalFactory, error::FarmError, progress::ProgressGrid};

fn default_locale() -> String {
    "en".to_string()
}

fn default_min_pets() -> usize {
    10
}

fn default_max_pets() -> usize {
    20
}

fn default_named_share() -> f64 {
    0.3
}

fn default_names() -> Vec<String> {
    ["Bella", "Max", "Daisy", "Rex", "Molly", "Oscar", "Luna", "Buttercup"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    20
}

fn default_marker() -> char {
    '#'
}

fn default_max_delay_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FarmConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default)]
    pub locale_file: Option<PathBuf>,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopulationConfig {
    #[serde(default = "default_min_pets")]
    pub min_pets: usize,
    #[serde(default = "default_max_pets")]
    pub max_pets: usize,
    #[serde(default = "default_named_share")]
    pub named_share: f64,
    #[serde(default = "default_names")]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_marker")]
    pub marker: char,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            min_pets: default_min_pets(),
            max_pets: default_max_pets(),
            named_share: default_named_share(),
            names: default_names(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            marker: default_marker(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_locale: default_locale(),
            locale_file: None,
            population: PopulationConfig::default(),
            progress: ProgressConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FarmConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: FarmConfig =
            serde_yaml::from_str(text).context("Failed to parse farm configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FarmError> {
        let population = &self.population;
        if population.min_pets == 0 || population.min_pets >= population.max_pets {
            return Err(FarmError::InvalidPopulationRange {
                min: population.min_pets,
                max: population.max_pets,
            });
        }
        if !(0.0..=1.0).contains(&population.named_share) {
            return Err(FarmError::InvalidNamedShare(population.named_share));
        }
        ProgressGrid::new(self.progress.rows, self.progress.cols)?;
        Ok(())
    }

    pub fn grid(&self) -> Result<ProgressGrid, FarmError> {
        ProgressGrid::new(self.progress.rows, self.progress.cols)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.progress.max_delay_ms)
    }

    pub fn animal_factory(&self) -> AnimalFactory {
        AnimalFactory::new(
            self.population.names.clone(),
            self.population.named_share,
        )
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<FarmConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FarmConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}
