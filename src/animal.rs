use std::fmt;

use rand::Rng;

use crate::species::{food_requirement, Species};

/// Share of the species weight range, counted from the top, whose named
/// members get a special name.
const SPECIAL_WEIGHT_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PetName {
    #[default]
    Default,
    Usual(String),
    Special(String),
}

/// Capabilities shared by every species.
pub trait Animal: fmt::Debug {
    fn from_weight(weight: f64) -> Self
    where
        Self: Sized;

    fn named(weight: f64, name: PetName) -> Self
    where
        Self: Sized;

    fn weight(&self) -> f64;

    fn species(&self) -> Species;

    fn name(&self) -> &PetName;

    fn food_required(&self) -> u64 {
        food_requirement(
            self.weight(),
            self.species().descriptor().food_per_kg_per_month,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    weight: f64,
    name: PetName,
}

impl Animal for Cat {
    fn from_weight(weight: f64) -> Self {
        Self::named(weight, PetName::Default)
    }

    fn named(weight: f64, name: PetName) -> Self {
        Self { weight, name }
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn species(&self) -> Species {
        Species::Cat
    }

    fn name(&self) -> &PetName {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    weight: f64,
    name: PetName,
}

impl Animal for Dog {
    fn from_weight(weight: f64) -> Self {
        Self::named(weight, PetName::Default)
    }

    fn named(weight: f64, name: PetName) -> Self {
        Self { weight, name }
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn species(&self) -> Species {
        Species::Dog
    }

    fn name(&self) -> &PetName {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cow {
    weight: f64,
    name: PetName,
}

impl Animal for Cow {
    fn from_weight(weight: f64) -> Self {
        Self::named(weight, PetName::Default)
    }

    fn named(weight: f64, name: PetName) -> Self {
        Self { weight, name }
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn species(&self) -> Species {
        Species::Cow
    }

    fn name(&self) -> &PetName {
        &self.name
    }
}

/// A `requested` weight of zero draws uniformly from `[min, max)`; any other
/// value is clamped into `[min, max]`.
pub fn generate_weight<R: Rng + ?Sized>(requested: f64, min: f64, max: f64, rng: &mut R) -> f64 {
    if requested == 0.0 {
        rng.gen_range(min..max)
    } else if requested < min {
        min
    } else if requested > max {
        max
    } else {
        requested
    }
}

/// Builds animals of random or explicit species.
#[derive(Debug, Clone, Default)]
pub struct AnimalFactory {
    names: Vec<String>,
    named_share: f64,
}

impl AnimalFactory {
    /// Non-finite shares disable naming; finite ones are clamped to `[0, 1]`.
    pub fn new(names: Vec<String>, named_share: f64) -> Self {
        let named_share = if named_share.is_finite() {
            named_share.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { names, named_share }
    }

    pub fn create_random_animal<R: Rng + ?Sized>(&self, rng: &mut R) -> Box<dyn Animal> {
        let species = Species::random(rng);
        self.create_animal(species, 0.0, rng)
    }

    pub fn create_animal<R: Rng + ?Sized>(
        &self,
        species: Species,
        requested_weight: f64,
        rng: &mut R,
    ) -> Box<dyn Animal> {
        let descriptor = species.descriptor();
        let weight = generate_weight(
            requested_weight,
            descriptor.min_weight,
            descriptor.max_weight,
            rng,
        );
        let name = self.pick_name(species, weight, rng);
        match species {
            Species::Cat => Box::new(Cat::named(weight, name)),
            Species::Dog => Box::new(Dog::named(weight, name)),
            Species::Cow => Box::new(Cow::named(weight, name)),
        }
    }

    fn pick_name<R: Rng + ?Sized>(&self, species: Species, weight: f64, rng: &mut R) -> PetName {
        if self.names.is_empty() || self.named_share <= 0.0 || !rng.gen_bool(self.named_share) {
            return PetName::Default;
        }
        let name = self.names[rng.gen_range(0..self.names.len())].clone();
        let descriptor = species.descriptor();
        let special_from = descriptor.max_weight
            - (descriptor.max_weight - descriptor.min_weight) * SPECIAL_WEIGHT_FRACTION;
        if weight >= special_from {
            PetName::Special(name)
        } else {
            PetName::Usual(name)
        }
    }
}
