use anyhow::Result;
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    animal::{Animal, AnimalFactory},
    error::FarmError,
    progress::{Pacer, ProgressGrid, ProgressRenderer, Step},
};

/// Generation appends while the population lags behind the paced percent.
pub fn should_append(size: usize, target: usize, step: &Step) -> bool {
    size * 100 / target < step.paced_percent()
}

/// Aggregation is one notch looser than generation (`<=`), so the last
/// animal is still reached on the final step.
pub fn should_consume(visited: usize, len: usize, step: &Step) -> bool {
    visited < len && visited * 100 / len <= step.paced_percent()
}

pub struct Farm<R: Rng> {
    pets: Vec<Box<dyn Animal>>,
    rng: R,
    grid: ProgressGrid,
    factory: AnimalFactory,
}

impl<R: Rng> Farm<R> {
    pub fn new(rng: R, grid: ProgressGrid) -> Self {
        Self {
            pets: Vec::new(),
            rng,
            grid,
            factory: AnimalFactory::default(),
        }
    }

    pub fn with_factory(mut self, factory: AnimalFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn push(&mut self, pet: Box<dyn Animal>) {
        self.pets.push(pet);
    }

    pub fn size(&self) -> usize {
        self.pets.len()
    }

    pub fn pets(&self) -> &[Box<dyn Animal>] {
        &self.pets
    }

    /// Grows the farm towards a random size in `[min_count, max_count)`,
    /// adding at most one animal per progress step.
    pub fn gen_pets(
        &mut self,
        max_count: usize,
        min_count: usize,
        renderer: &mut dyn ProgressRenderer,
        pacer: &mut Pacer,
    ) -> Result<usize> {
        if min_count == 0 || min_count >= max_count {
            return Err(FarmError::InvalidPopulationRange {
                min: min_count,
                max: max_count,
            }
            .into());
        }
        let target = self.rng.gen_range(min_count..max_count);
        info!(
            "generating farm of {target} pets over {} steps",
            self.grid.total_steps()
        );

        let Self {
            pets,
            rng,
            grid,
            factory,
        } = &mut *self;
        grid.run(renderer, |step| {
            if should_append(pets.len(), target, &step) {
                let pet = factory.create_random_animal(&mut *rng);
                debug!(
                    "step {}: added {} of {:.2} kg",
                    step.index(),
                    pet.species().key(),
                    pet.weight()
                );
                pets.push(pet);
            }
            pacer.pause();
        })?;

        if self.pets.len() < target {
            warn!(
                "farm reached {} of {target} pets; grid of {} steps is too small",
                self.pets.len(),
                self.grid.total_steps()
            );
        }
        Ok(self.pets.len())
    }

    /// Sums the monthly food of the farm, visiting at most one animal per
    /// progress step.
    pub fn compute_monthly_food(
        &self,
        renderer: &mut dyn ProgressRenderer,
        pacer: &mut Pacer,
    ) -> Result<u64> {
        let len = self.pets.len();
        let mut visited = 0;
        let mut total = 0;
        self.grid.run(renderer, |step| {
            if should_consume(visited, len, &step) {
                total += self.pets[visited].food_required();
                visited += 1;
            }
            pacer.pause();
        })?;

        if visited < len {
            warn!("food counted for {visited} of {len} pets; grid is too small");
        }
        info!("farm of {len} pets needs {total} kg of food per month");
        Ok(total)
    }
}
