//! Error types for inheritance model checking
//!
//! A variant that does not follow a model is an ordinary `Ok(false)`.
//! Everything in here is either a caller contract violation (missing or
//! malformed genotypes) or a failure of the evidence sink.

use thiserror::Error;

/// Why a set of genotype flags does not describe a valid call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidGenotypeReason {
    /// `genotyped` is set but none of hom-ref, het, hom-alt is.
    NoCallState,
    /// More than one of hom-ref, het, hom-alt is set.
    ConflictingStates,
    /// `genotyped` is unset but a call state is set.
    StateWithoutCall,
    /// `has_variant` disagrees with the call state.
    HasVariantMismatch,
}

impl std::fmt::Display for InvalidGenotypeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::NoCallState => "genotyped but no call state is set",
            Self::ConflictingStates => "more than one call state is set",
            Self::StateWithoutCall => "call state is set on an ungenotyped call",
            Self::HasVariantMismatch => "has_variant does not match the call state",
        };
        f.write_str(msg)
    }
}

/// Failure to append a record to an [`EvidenceSink`](crate::evidence::EvidenceSink).
#[derive(Debug, Error)]
pub enum EvidenceSinkError {
    #[error("evidence sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("evidence sink CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A writer panicked while holding the sink lock.
    #[error("evidence sink lock poisoned")]
    Poisoned,
}

/// Errors raised while checking a variant against a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("variant {variant}: no genotype for pedigree member {individual}")]
    MissingGenotype { variant: String, individual: String },

    #[error("variant {variant}: invalid genotype for {individual}: {reason}")]
    InvalidGenotype {
        variant: String,
        individual: String,
        reason: InvalidGenotypeReason,
    },

    /// The verdict was reached but could not be recorded.
    ///
    /// `passed` holds the verdict so the caller can still use it.
    #[error("variant {variant}: failed to record evidence: {source}")]
    EvidenceSink {
        variant: String,
        passed: bool,
        #[source]
        source: EvidenceSinkError,
    },
}

impl ModelError {
    /// The model verdict, if one was reached before the error.
    pub fn verdict(&self) -> Option<bool> {
        match self {
            Self::EvidenceSink { passed, .. } => Some(*passed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid genotype call '{input}': {message}")]
pub struct ParseGenotypeError {
    pub input: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {field} code '{input}'")]
pub struct ParsePedigreeCodeError {
    pub field: &'static str,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown inheritance model '{0}'")]
pub struct ParseModelError(pub String);
