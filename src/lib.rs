#![crate_name = "inheritance_models"]
//! Checks whether a variant's genotypes across a family are consistent
//! with a Mendelian inheritance model.
//!
//! Each check takes a [`Variant`] and a [`Family`] and answers pass or fail.
//! A pass is classified with a [`ReasonCode`](rules::ReasonCode) and handed
//! to an [`EvidenceSink`](evidence::EvidenceSink) chosen by the caller.
//!
//! ```
//! use inheritance_models::prelude::*;
//!
//! let mut family = Family::new("fam1");
//! family.insert(Individual::new("father", Sex::Male, Phenotype::Healthy));
//! family.insert(Individual::new("mother", Sex::Female, Phenotype::Healthy));
//! family.insert(Individual::new("son", Sex::Male, Phenotype::Affected));
//!
//! let mut variant = Variant::new("X_153296777_G_A");
//! variant.insert("father", Genotype::hom_ref());
//! variant.insert("mother", Genotype::het());
//! variant.insert("son", Genotype::hom_alt());
//!
//! let sink = MemorySink::new();
//! assert!(evaluate_x_linked_recessive(&variant, &family, false, &sink).unwrap());
//! assert_eq!(sink.records()[0].1, ReasonCode::AffectedGenotypedMaleHet);
//! ```
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

pub mod prelude;

pub mod checker;
pub mod config;
pub mod error;
pub mod evidence;
pub mod genotype;
pub mod models;
pub mod rules;

use crate::error::{ModelError, ParsePedigreeCodeError};
use crate::genotype::Genotype;

pub type Individuals = BTreeMap<String, Individual>;
pub type Genotypes = HashMap<String, Genotype>;

/// Result type for model checking.
pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Accepts PED codes (`1` male, `2` female) or the names.
impl FromStr for Sex {
    type Err = ParsePedigreeCodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "male" | "m" => Ok(Self::Male),
            "2" | "female" | "f" => Ok(Self::Female),
            _ => Err(ParsePedigreeCodeError {
                field: "sex",
                input: s.to_owned(),
            }),
        }
    }
}

/// Affection status. `Unknown` individuals constrain nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenotype {
    Healthy,
    Affected,
    Unknown,
}

/// Accepts PED codes (`1` healthy, `2` affected, `0`/`-9` unknown) or the names.
impl FromStr for Phenotype {
    type Err = ParsePedigreeCodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "healthy" | "unaffected" => Ok(Self::Healthy),
            "2" | "affected" => Ok(Self::Affected),
            "0" | "-9" | "unknown" => Ok(Self::Unknown),
            _ => Err(ParsePedigreeCodeError {
                field: "phenotype",
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    id: String,
    sex: Sex,
    phenotype: Phenotype,
}

impl Individual {
    pub fn new(id: &str, sex: Sex, phenotype: Phenotype) -> Self {
        Self {
            id: id.into(),
            sex,
            phenotype,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn phenotype(&self) -> Phenotype {
        self.phenotype
    }
}

/// A pedigree: individuals keyed by their unique id.
#[derive(Debug, Clone, Default)]
pub struct Family {
    id: String,
    individuals: Individuals,
}

impl Family {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            individuals: Individuals::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds an individual, returning any previous member with the same id.
    pub fn insert(&mut self, individual: Individual) -> Option<Individual> {
        self.individuals.insert(individual.id.clone(), individual)
    }

    pub fn get(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

impl std::iter::FromIterator<Individual> for Family {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        let mut family = Family::default();
        for individual in iter {
            family.insert(individual);
        }
        family
    }
}

/// A variant and the genotype call of each sample at it.
#[derive(Debug, Clone, Default)]
pub struct Variant {
    id: String,
    genotypes: Genotypes,
}

impl Variant {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            genotypes: Genotypes::new(),
        }
    }

    pub fn with_genotypes(id: &str, genotypes: Genotypes) -> Self {
        Self {
            id: id.into(),
            genotypes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn insert(&mut self, individual: &str, genotype: Genotype) -> Option<Genotype> {
        self.genotypes.insert(individual.into(), genotype)
    }

    pub fn genotype(&self, individual: &str) -> Option<&Genotype> {
        self.genotypes.get(individual)
    }

    pub fn genotypes(&self) -> &Genotypes {
        &self.genotypes
    }
}
