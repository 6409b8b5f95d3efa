pub use crate::checker::{Checker, CheckerBuilder};
pub use crate::config::CheckerConfig;
pub use crate::error::{EvidenceSinkError, InvalidGenotypeReason, ModelError};
pub use crate::evidence::{CsvSink, CsvSinkBuilder, EvidenceSink, LogSink, MemorySink, NoopSink};
pub use crate::genotype::{Genotype, GenotypeState};
pub use crate::models::{evaluate_x_linked_dominant, evaluate_x_linked_recessive, Model};
pub use crate::rules::{Evaluation, ReasonCode, Violation, ViolationKind};
pub use crate::{Family, Individual, Phenotype, Sex, Variant};
