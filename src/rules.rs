//! Per-individual rule tables and the evaluator shared by every model.
//!
//! A model is described by which call states it allows for each
//! (phenotype, sex) cell. [`evaluate`] walks the family once, stops at the
//! first individual whose call the table rejects, and otherwise collects the
//! [`Evidence`] flags that the model's classifier turns into a [`ReasonCode`].

use crate::error::ModelError;
use crate::genotype::GenotypeState;
use crate::{Family, Individual, Phenotype, Result, Sex, Variant};
use serde::{Deserialize, Serialize};

/// The call states one (phenotype, sex) cell accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowed {
    pub hom_ref: bool,
    pub het: bool,
    pub hom_alt: bool,
}

impl Allowed {
    pub const ANY: Allowed = Allowed::new(true, true, true);

    pub const fn new(hom_ref: bool, het: bool, hom_alt: bool) -> Self {
        Self {
            hom_ref,
            het,
            hom_alt,
        }
    }

    /// No-calls are always allowed here; strict mode is handled by the evaluator.
    pub fn admits(&self, state: GenotypeState) -> bool {
        match state {
            GenotypeState::NoCall => true,
            GenotypeState::HomRef => self.hom_ref,
            GenotypeState::Het => self.het,
            GenotypeState::HomAlt => self.hom_alt,
        }
    }
}

/// Allowed call states for healthy and affected individuals of each sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    pub healthy_male: Allowed,
    pub healthy_female: Allowed,
    pub affected_male: Allowed,
    pub affected_female: Allowed,
}

impl RuleTable {
    /// `None` for individuals of unknown phenotype.
    pub fn cell(&self, phenotype: Phenotype, sex: Sex) -> Option<&Allowed> {
        match (phenotype, sex) {
            (Phenotype::Healthy, Sex::Male) => Some(&self.healthy_male),
            (Phenotype::Healthy, Sex::Female) => Some(&self.healthy_female),
            (Phenotype::Affected, Sex::Male) => Some(&self.affected_male),
            (Phenotype::Affected, Sex::Female) => Some(&self.affected_female),
            (Phenotype::Unknown, _) => None,
        }
    }
}

/// What was seen across a family that passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Evidence {
    pub affected_seen: bool,
    /// An affected individual had a call.
    pub genotyped_seen: bool,
    /// An affected female was homozygous alternate.
    pub female_hom_alt_seen: bool,
}

/// Which evidentiary pattern explains a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NoAffectedNoVariant,
    AffectedUngenotyped,
    AffectedGenotypedMaleHet,
    #[serde(rename = "AFFECTED_GENOTYPED_FEMALE_HOMALT")]
    AffectedGenotypedFemaleHomAlt,
    AffectedGenotyped,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAffectedNoVariant => "NO_AFFECTED_NO_VARIANT",
            Self::AffectedUngenotyped => "AFFECTED_UNGENOTYPED",
            Self::AffectedGenotypedMaleHet => "AFFECTED_GENOTYPED_MALE_HET",
            Self::AffectedGenotypedFemaleHomAlt => "AFFECTED_GENOTYPED_FEMALE_HOMALT",
            Self::AffectedGenotyped => "AFFECTED_GENOTYPED",
        }
    }

    /// A sentence describing the pattern, for audit output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoAffectedNoVariant => "Parents without variant and no affected individual",
            Self::AffectedUngenotyped => {
                "Parents are not genotyped or carry the variant compatibly and affected offspring is not genotyped"
            }
            Self::AffectedGenotypedMaleHet => {
                "Parents are not genotyped or carry the variant compatibly and affected offspring is male carrying the variant"
            }
            Self::AffectedGenotypedFemaleHomAlt => {
                "Parents are not genotyped or carry the variant compatibly and affected offspring is female homozygous alternative"
            }
            Self::AffectedGenotyped => {
                "Mother heterozygous or father without variant and affected offspring carries the variant"
            }
        }
    }

    /// Classifier for X-linked recessive passes.
    pub fn x_recessive(evidence: &Evidence) -> Self {
        match (
            evidence.affected_seen,
            evidence.genotyped_seen,
            evidence.female_hom_alt_seen,
        ) {
            (true, true, true) => Self::AffectedGenotypedFemaleHomAlt,
            (true, true, false) => Self::AffectedGenotypedMaleHet,
            (true, false, _) => Self::AffectedUngenotyped,
            (false, _, _) => Self::NoAffectedNoVariant,
        }
    }

    /// Classifier for X-linked dominant passes.
    pub fn x_dominant(evidence: &Evidence) -> Self {
        match (evidence.affected_seen, evidence.genotyped_seen) {
            (true, true) => Self::AffectedGenotyped,
            (true, false) => Self::AffectedUngenotyped,
            (false, _) => Self::NoAffectedNoVariant,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Strict mode and the individual has no call.
    Ungenotyped,
    HealthyHomozygousAlternate,
    /// A healthy male carries the variant.
    HealthyMaleCarrier,
    AffectedHomozygousReference,
    AffectedFemaleNotHomozygousAlternate,
}

impl ViolationKind {
    /// Names the rejected cell. Only meaningful for called, constrained individuals.
    fn of(phenotype: Phenotype, sex: Sex, state: GenotypeState) -> Self {
        match (phenotype, sex, state) {
            (_, _, GenotypeState::NoCall) => Self::Ungenotyped,
            (Phenotype::Healthy, _, GenotypeState::HomAlt) => Self::HealthyHomozygousAlternate,
            (Phenotype::Healthy, _, _) => Self::HealthyMaleCarrier,
            (_, _, GenotypeState::HomRef) => Self::AffectedHomozygousReference,
            _ => Self::AffectedFemaleNotHomozygousAlternate,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Ungenotyped => "not genotyped in strict mode",
            Self::HealthyHomozygousAlternate => "healthy and homozygous alternate",
            Self::HealthyMaleCarrier => "healthy male carrying the variant",
            Self::AffectedHomozygousReference => "affected and homozygous reference",
            Self::AffectedFemaleNotHomozygousAlternate => {
                "affected female not homozygous alternate"
            }
        };
        f.write_str(msg)
    }
}

/// The first individual found to contradict a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub individual: String,
    pub kind: ViolationKind,
}

/// Outcome of checking one variant against one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Pass(ReasonCode),
    Fail(Violation),
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            Self::Pass(reason) => Some(*reason),
            Self::Fail(_) => None,
        }
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Pass(_) => None,
            Self::Fail(violation) => Some(violation),
        }
    }
}

/// Looks up and validates every member's call before any rule is applied.
fn resolve<'a>(
    variant: &Variant,
    family: &'a Family,
) -> Result<Vec<(&'a Individual, GenotypeState)>> {
    family
        .individuals()
        .map(|individual| -> Result<(&'a Individual, GenotypeState)> {
            let genotype =
                variant
                    .genotype(individual.id())
                    .ok_or_else(|| ModelError::MissingGenotype {
                        variant: variant.id().to_owned(),
                        individual: individual.id().to_owned(),
                    })?;
            let state = genotype
                .state()
                .map_err(|reason| ModelError::InvalidGenotype {
                    variant: variant.id().to_owned(),
                    individual: individual.id().to_owned(),
                    reason,
                })?;
            Ok((individual, state))
        })
        .collect()
}

/// Checks `variant` against `table`, stopping at the first violation.
///
/// On a pass the collected [`Evidence`] is returned for classification.
pub fn evaluate(
    table: &RuleTable,
    variant: &Variant,
    family: &Family,
    strict: bool,
) -> Result<std::result::Result<Evidence, Violation>> {
    let mut evidence = Evidence::default();

    for (individual, state) in resolve(variant, family)? {
        let violation = |kind| Violation {
            individual: individual.id().to_owned(),
            kind,
        };

        if strict && !state.is_called() {
            return Ok(Err(violation(ViolationKind::Ungenotyped)));
        }

        let allowed = match table.cell(individual.phenotype(), individual.sex()) {
            Some(allowed) => allowed,
            None => continue,
        };

        if !allowed.admits(state) {
            return Ok(Err(violation(ViolationKind::of(
                individual.phenotype(),
                individual.sex(),
                state,
            ))));
        }

        if individual.phenotype() == Phenotype::Affected {
            evidence.affected_seen = true;
            if state.is_called() {
                evidence.genotyped_seen = true;
                if individual.sex() == Sex::Female && state == GenotypeState::HomAlt {
                    evidence.female_hom_alt_seen = true;
                }
            }
        }
    }

    Ok(Ok(evidence))
}
