use crate::error::{InvalidGenotypeReason, ParseGenotypeError};
use std::str::FromStr;

/// The call state a valid `Genotype` collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenotypeState {
    NoCall,
    HomRef,
    Het,
    HomAlt,
}

impl GenotypeState {
    pub fn is_called(&self) -> bool {
        !matches!(self, Self::NoCall)
    }

    pub fn has_variant(&self) -> bool {
        matches!(self, Self::Het | Self::HomAlt)
    }
}

/// One individual's call for one variant.
///
/// The flags are public because upstream readers fill them in directly.
/// Use [`Genotype::state`] to validate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Genotype {
    pub genotyped: bool,
    pub homozygous_reference: bool,
    pub homozygous_alternate: bool,
    pub heterozygous: bool,
    pub has_variant: bool,
}

impl Genotype {
    pub fn no_call() -> Self {
        Self::from(GenotypeState::NoCall)
    }

    pub fn hom_ref() -> Self {
        Self::from(GenotypeState::HomRef)
    }

    pub fn het() -> Self {
        Self::from(GenotypeState::Het)
    }

    pub fn hom_alt() -> Self {
        Self::from(GenotypeState::HomAlt)
    }

    /// Validates the flags and returns the call state they describe.
    pub fn state(&self) -> Result<GenotypeState, InvalidGenotypeReason> {
        let set = [
            self.homozygous_reference,
            self.heterozygous,
            self.homozygous_alternate,
        ]
        .iter()
        .filter(|flag| **flag)
        .count();

        let state = match (self.genotyped, set) {
            (false, 0) => GenotypeState::NoCall,
            (false, _) => return Err(InvalidGenotypeReason::StateWithoutCall),
            (true, 0) => return Err(InvalidGenotypeReason::NoCallState),
            (true, 1) if self.homozygous_reference => GenotypeState::HomRef,
            (true, 1) if self.heterozygous => GenotypeState::Het,
            (true, 1) => GenotypeState::HomAlt,
            (true, _) => return Err(InvalidGenotypeReason::ConflictingStates),
        };

        if self.has_variant != state.has_variant() {
            return Err(InvalidGenotypeReason::HasVariantMismatch);
        }
        Ok(state)
    }
}

impl From<GenotypeState> for Genotype {
    fn from(state: GenotypeState) -> Self {
        Self {
            genotyped: state.is_called(),
            homozygous_reference: state == GenotypeState::HomRef,
            homozygous_alternate: state == GenotypeState::HomAlt,
            heterozygous: state == GenotypeState::Het,
            has_variant: state.has_variant(),
        }
    }
}

/// Parses a VCF `GT` value such as `0/1`, `1|1`, `./.` or a haploid `1`.
///
/// Equal alleles are homozygous (reference if `0`), different alleles are
/// heterozygous. A missing allele anywhere makes the call a no-call.
impl FromStr for Genotype {
    type Err = ParseGenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |message: &str| ParseGenotypeError {
            input: s.to_owned(),
            message: message.to_owned(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err("empty call"));
        }

        let mut alleles = vec![];
        for allele in trimmed.split(&['/', '|'][..]) {
            match allele {
                "." => alleles.push(None),
                _ => alleles.push(Some(
                    allele
                        .parse::<u32>()
                        .map_err(|_| err("allele is not an index or '.'"))?,
                )),
            }
        }
        if alleles.len() > 2 {
            return Err(err("only haploid and diploid calls are supported"));
        }

        let called: Option<Vec<u32>> = alleles.into_iter().collect();
        let state = match called.as_deref() {
            None => GenotypeState::NoCall,
            Some([0]) | Some([0, 0]) => GenotypeState::HomRef,
            Some([_]) => GenotypeState::HomAlt,
            Some([a, b]) if a == b => GenotypeState::HomAlt,
            Some(_) => GenotypeState::Het,
        };
        Ok(Self::from(state))
    }
}
