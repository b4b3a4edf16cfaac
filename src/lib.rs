pub mod animal;
pub mod app;
pub mod config;
pub mod error;
pub mod farm;
pub mod locale;
pub mod presenter;
pub mod progress;
pub mod rng;
pub mod species;
pub mod terminal;

pub use app::{AppSettings, FarmApp, FarmSummary};
pub use config::FarmConfig;
pub use error::FarmError;
pub use farm::Farm;
