use rand::Rng;

/// Fixed parameters of a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesDescriptor {
    /// Locale key of the species noun.
    pub key: &'static str,
    pub food_per_kg_per_month: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

const CAT: SpeciesDescriptor = SpeciesDescriptor {
    key: "cat",
    food_per_kg_per_month: 7.0,
    min_weight: 1.5,
    max_weight: 9.0,
};

const DOG: SpeciesDescriptor = SpeciesDescriptor {
    key: "dog",
    food_per_kg_per_month: 10.0 / 5.0,
    min_weight: 4.0,
    max_weight: 45.0,
};

const COW: SpeciesDescriptor = SpeciesDescriptor {
    key: "cow",
    food_per_kg_per_month: 25.0,
    min_weight: 350.0,
    max_weight: 900.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Cat,
    Dog,
    Cow,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Cat, Species::Dog, Species::Cow];

    pub fn descriptor(self) -> &'static SpeciesDescriptor {
        match self {
            Species::Cat => &CAT,
            Species::Dog => &DOG,
            Species::Cow => &COW,
        }
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Every registered species is equally likely.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Monthly food in whole kilograms, with one spare kilogram added after
/// truncation.
pub fn food_requirement(weight: f64, food_per_kg_per_month: f64) -> u64 {
    (weight * food_per_kg_per_month).floor() as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn food_requirement_truncates_then_adds_spare_kilogram() {
        assert_eq!(food_requirement(2.0, 7.0), 15);
        assert_eq!(food_requirement(2.99, 2.0), 6);
        assert_eq!(food_requirement(0.0, 25.0), 1);
        assert_eq!(food_requirement(1.1, 7.0), 8);
    }

    #[test]
    fn descriptors_have_valid_ranges() {
        for species in Species::ALL {
            let descriptor = species.descriptor();
            assert!(descriptor.min_weight > 0.0);
            assert!(descriptor.min_weight < descriptor.max_weight);
            assert!(descriptor.food_per_kg_per_month > 0.0);
        }
        assert_eq!(Species::Dog.descriptor().food_per_kg_per_month, 2.0);
        assert_eq!(Species::Cow.key(), "cow");
    }

    #[test]
    fn random_species_is_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts: HashMap<Species, usize> = HashMap::new();
        for _ in 0..3_000 {
            *counts.entry(Species::random(&mut rng)).or_default() += 1;
        }
        for species in Species::ALL {
            let count = counts.get(&species).copied().unwrap_or(0);
            assert!(
                (800..1_200).contains(&count),
                "{species:?} drawn {count} times"
            );
        }
    }
}
