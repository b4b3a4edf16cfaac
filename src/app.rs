use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    animal::AnimalFactory,
    config::FarmConfig,
    error::FarmError,
    farm::Farm,
    locale::LocaleBundle,
    presenter::Presenter,
    progress::{Pacer, ProgressGrid, TerminalBar},
    rng::RngManager,
    terminal::{Selection, SelectionInput},
};

pub struct AppSettings {
    /// Skips the language menu when set to a known locale.
    pub locale: Option<String>,
    /// Locale used for the language menu itself.
    pub menu_locale: String,
    pub min_pets: usize,
    pub max_pets: usize,
    pub grid: ProgressGrid,
    pub marker: char,
    pub max_delay: Duration,
    pub factory: AnimalFactory,
}

impl AppSettings {
    pub fn from_config(config: &FarmConfig) -> Result<Self, FarmError> {
        config.validate()?;
        Ok(Self {
            locale: None,
            menu_locale: config.default_locale.clone(),
            min_pets: config.population.min_pets,
            max_pets: config.population.max_pets,
            grid: config.grid()?,
            marker: config.progress.marker,
            max_delay: config.max_delay(),
            factory: config.animal_factory(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarmSummary {
    pub pets: usize,
    pub total_food: u64,
}

pub struct FarmApp<W: Write, I: SelectionInput> {
    bundle: LocaleBundle,
    settings: AppSettings,
    rngs: RngManager,
    pacer: Pacer,
    out: W,
    input: I,
}

impl<W: Write, I: SelectionInput> FarmApp<W, I> {
    pub fn new(
        bundle: LocaleBundle,
        settings: AppSettings,
        mut rngs: RngManager,
        out: W,
        input: I,
    ) -> Self {
        let pacer = Pacer::new(rngs.fork("pacing"), settings.max_delay);
        Self {
            bundle,
            settings,
            rngs,
            pacer,
            out,
            input,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Language menu, then farms until the user exits. Returns the
    /// summaries of every farm generated.
    pub fn run(&mut self) -> Result<Vec<FarmSummary>> {
        let mut summaries = Vec::new();
        let Some(locale) = self.choose_locale()? else {
            return Ok(summaries);
        };
        info!("using locale '{locale}'");

        loop {
            let presenter = Presenter::new(&self.bundle, locale.as_str());
            writeln!(self.out, "1. {}", presenter.message("gen_farm")?)?;
            writeln!(self.out, "0. {}", presenter.message("exit")?)?;
            self.out.flush()?;
            match self.input.read_selection(1)? {
                Selection::Option(_) => summaries.push(self.generate_farm(&locale)?),
                Selection::Exit => break,
            }
        }
        Ok(summaries)
    }

    fn choose_locale(&mut self) -> Result<Option<String>> {
        if let Some(locale) = &self.settings.locale {
            if self.bundle.contains(locale) {
                return Ok(Some(locale.clone()));
            }
            warn!("locale '{locale}' is not available, asking instead");
        }

        let locales: Vec<String> = self
            .bundle
            .available_locales()
            .into_iter()
            .map(str::to_string)
            .collect();
        let menu_locale = if self.bundle.contains(&self.settings.menu_locale) {
            self.settings.menu_locale.clone()
        } else {
            locales.first().cloned().ok_or(FarmError::NoLocales)?
        };
        let menu = Presenter::new(&self.bundle, menu_locale);

        writeln!(self.out, "{}", menu.message("choose_language")?)?;
        for (index, locale) in locales.iter().enumerate() {
            let name = self.bundle.lookup(locale, "language")?;
            writeln!(self.out, "{}. {name}", index + 1)?;
        }
        writeln!(self.out, "0. {}", menu.message("exit")?)?;
        self.out.flush()?;

        match self.input.read_selection(locales.len())? {
            Selection::Option(index) => Ok(locales.get(index).cloned()),
            Selection::Exit => Ok(None),
        }
    }

    /// Grows a new farm, lists its animals and totals their food, drawing a
    /// progress bar for each phase.
    pub fn generate_farm(&mut self, locale: &str) -> Result<FarmSummary> {
        let presenter = Presenter::new(&self.bundle, locale);
        let mut farm = Farm::new(self.rngs.fork("animals"), self.settings.grid)
            .with_factory(self.settings.factory.clone());

        let mut bar = TerminalBar::new(&mut self.out, self.settings.marker);
        farm.gen_pets(
            self.settings.max_pets,
            self.settings.min_pets,
            &mut bar,
            &mut self.pacer,
        )?;

        for pet in farm.pets() {
            write!(self.out, "{}", presenter.pet_line(pet.as_ref())?)
                .context("Failed to print pet")?;
        }
        writeln!(self.out, "{}", presenter.message("calc_farm_info")?)?;

        let mut bar = TerminalBar::new(&mut self.out, self.settings.marker);
        let total_food = farm.compute_monthly_food(&mut bar, &mut self.pacer)?;
        write!(self.out, "{}", presenter.food_summary(total_food)?)?;
        self.out.flush()?;

        Ok(FarmSummary {
            pets: farm.size(),
            total_food,
        })
    }
}
