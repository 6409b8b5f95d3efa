use crate::config::CheckerConfig;
use crate::evidence::{EvidenceSink, NoopSink};
use crate::models::Model;
use crate::{Family, Result, Variant};
use std::sync::Arc;

/// A run-scoped handle pairing a configuration with an evidence sink.
///
/// Cloning is cheap and clones share the sink, so one `Checker` can be
/// handed to every worker of a run.
#[derive(Clone)]
pub struct Checker {
    config: CheckerConfig,
    sink: Arc<dyn EvidenceSink>,
}

impl Checker {
    pub fn new(config: CheckerConfig, sink: Arc<dyn EvidenceSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Checks one model, recording the reason for a pass.
    pub fn evaluate(&self, model: Model, variant: &Variant, family: &Family) -> Result<bool> {
        model.evaluate(variant, family, self.config.strict, &*self.sink)
    }

    /// The configured models that `variant` does not contradict, in
    /// configuration order.
    pub fn passing_models(&self, variant: &Variant, family: &Family) -> Result<Vec<Model>> {
        let mut passing = vec![];
        for model in self.config.models.iter() {
            if self.evaluate(*model, variant, family)? {
                passing.push(*model);
            }
        }
        Ok(passing)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckerConfig::default(), Arc::new(NoopSink))
    }
}

pub struct CheckerBuilder {
    config: CheckerConfig,
    sink: Arc<dyn EvidenceSink>,
}

impl CheckerBuilder {
    /// Construct a new Checker builder
    pub fn new() -> Self {
        Self {
            config: CheckerConfig::default(),
            sink: Arc::new(NoopSink),
        }
    }

    pub fn config(&mut self, config: CheckerConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.config.strict = strict;
        self
    }

    pub fn models(&mut self, models: &[Model]) -> &mut Self {
        self.config.models = models.to_vec();
        self
    }

    pub fn sink(&mut self, sink: Arc<dyn EvidenceSink>) -> &mut Self {
        self.sink = sink;
        self
    }

    pub fn build(&self) -> Checker {
        Checker::new(self.config.clone(), self.sink.clone())
    }
}

impl Default for CheckerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
