//! The X-linked inheritance models and their entry points.

use crate::error::{ModelError, ParseModelError};
use crate::evidence::EvidenceSink;
use crate::rules::{self, Allowed, Evaluation, Evidence, ReasonCode, RuleTable};
use crate::{Family, Result, Variant};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Healthy individuals may not be homozygous alternate and healthy males may
/// not carry the variant. Affected males carry it; affected females must be
/// homozygous alternate.
pub const X_RECESSIVE: RuleTable = RuleTable {
    healthy_male: Allowed::new(true, false, false),
    healthy_female: Allowed::new(true, true, false),
    affected_male: Allowed::new(false, true, true),
    affected_female: Allowed::new(false, false, true),
};

/// As recessive for healthy individuals, but any affected individual
/// carrying the variant is consistent.
pub const X_DOMINANT: RuleTable = RuleTable {
    healthy_male: Allowed::new(true, false, false),
    healthy_female: Allowed::new(true, true, false),
    affected_male: Allowed::new(false, true, true),
    affected_female: Allowed::new(false, true, true),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "XR")]
    XLinkedRecessive,
    #[serde(rename = "XD")]
    XLinkedDominant,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::XLinkedRecessive, Model::XLinkedDominant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XLinkedRecessive => "XR",
            Self::XLinkedDominant => "XD",
        }
    }

    pub fn rules(&self) -> &'static RuleTable {
        match self {
            Self::XLinkedRecessive => &X_RECESSIVE,
            Self::XLinkedDominant => &X_DOMINANT,
        }
    }

    pub fn classify(&self, evidence: &Evidence) -> ReasonCode {
        match self {
            Self::XLinkedRecessive => ReasonCode::x_recessive(evidence),
            Self::XLinkedDominant => ReasonCode::x_dominant(evidence),
        }
    }

    /// Checks the variant without recording anything.
    pub fn evaluate_detailed(
        &self,
        variant: &Variant,
        family: &Family,
        strict: bool,
    ) -> Result<Evaluation> {
        let evaluation = match rules::evaluate(self.rules(), variant, family, strict)? {
            Ok(evidence) => Evaluation::Pass(self.classify(&evidence)),
            Err(violation) => Evaluation::Fail(violation),
        };

        match &evaluation {
            Evaluation::Pass(reason) => {
                trace!("{} {}: pass ({})", self, variant.id(), reason)
            }
            Evaluation::Fail(violation) => debug!(
                "{} {}: {} is {}",
                self,
                variant.id(),
                violation.individual,
                violation.kind
            ),
        }
        Ok(evaluation)
    }

    /// Checks the variant and records the reason for a pass in `sink`.
    ///
    /// A sink failure is returned as [`ModelError::EvidenceSink`], which
    /// still carries the verdict.
    pub fn evaluate(
        &self,
        variant: &Variant,
        family: &Family,
        strict: bool,
        sink: &dyn EvidenceSink,
    ) -> Result<bool> {
        match self.evaluate_detailed(variant, family, strict)? {
            Evaluation::Pass(reason) => {
                sink.record(variant.id(), reason).map_err(|source| {
                    warn!("{} {}: could not record evidence: {}", self, variant.id(), source);
                    ModelError::EvidenceSink {
                        variant: variant.id().to_owned(),
                        passed: true,
                        source,
                    }
                })?;
                Ok(true)
            }
            Evaluation::Fail(_) => Ok(false),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = ParseModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "XR" | "x_recessive" | "x-linked-recessive" => Ok(Self::XLinkedRecessive),
            "XD" | "x_dominant" | "x-linked-dominant" => Ok(Self::XLinkedDominant),
            _ => Err(ParseModelError(s.to_owned())),
        }
    }
}

/// Whether `variant` follows the X-linked recessive pattern in `family`.
pub fn evaluate_x_linked_recessive(
    variant: &Variant,
    family: &Family,
    strict: bool,
    sink: &dyn EvidenceSink,
) -> Result<bool> {
    Model::XLinkedRecessive.evaluate(variant, family, strict, sink)
}

/// Whether `variant` follows the X-linked dominant pattern in `family`.
pub fn evaluate_x_linked_dominant(
    variant: &Variant,
    family: &Family,
    strict: bool,
    sink: &dyn EvidenceSink,
) -> Result<bool> {
    Model::XLinkedDominant.evaluate(variant, family, strict, sink)
}
