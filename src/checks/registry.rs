//! Ordered registry of document checks
//!
//! Registration order is the order results appear in reports and the order
//! in which the global issue budget is spent.

use super::{
    AcronymsCheck, Check, GrammarCheck, HeadingsCheck, LinksCheck, ParallelListsCheck,
    PassiveVoiceCheck, PercentagesCheck, PunctuationCheck, ReadabilityCheck, WhitespaceCheck,
};
use crate::grammar::GrammarService;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A registered check with its effective weight
#[derive(Clone)]
pub struct CheckSpec {
    pub check: Arc<dyn Check>,
    pub weight: f64,
}

impl CheckSpec {
    pub fn new(check: Arc<dyn Check>) -> Self {
        let weight = check.default_weight();
        Self { check, weight }
    }

    pub fn id(&self) -> &'static str {
        self.check.id()
    }

    pub fn name(&self) -> &'static str {
        self.check.name()
    }
}

impl std::fmt::Debug for CheckSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckSpec")
            .field("id", &self.id())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Every known check, in registration order
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<CheckSpec>,
}

impl Registry {
    /// The reference registry. `grammar` backs the `language_tool` check;
    /// without it that check is always skipped.
    pub fn new(grammar: Option<Arc<dyn GrammarService>>) -> Self {
        let checks: Vec<Arc<dyn Check>> = vec![
            Arc::new(GrammarCheck::new(grammar)),
            Arc::new(ReadabilityCheck),
            Arc::new(PunctuationCheck),
            Arc::new(WhitespaceCheck),
            Arc::new(PercentagesCheck),
            Arc::new(HeadingsCheck),
            Arc::new(PassiveVoiceCheck),
            Arc::new(ParallelListsCheck::default()),
            Arc::new(LinksCheck),
            Arc::new(AcronymsCheck::default()),
        ];
        Self::from_checks(checks)
    }

    pub fn from_checks(checks: impl IntoIterator<Item = Arc<dyn Check>>) -> Self {
        let specs = checks
            .into_iter()
            .map(|check| {
                debug!("Registering check: {}", check.id());
                CheckSpec::new(check)
            })
            .collect();
        Self { specs }
    }

    /// Override weights by check id. Unknown ids are reported and ignored.
    pub fn with_weights(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        for (id, weight) in overrides {
            match self.specs.iter_mut().find(|s| s.id() == id) {
                Some(spec) => {
                    debug!("Weight for {} set to {}", id, weight);
                    spec.weight = *weight;
                }
                None => warn!("Ignoring weight for unknown check '{}'", id),
            }
        }
        self
    }

    pub fn specs(&self) -> &[CheckSpec] {
        &self.specs
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.specs.iter().map(CheckSpec::id).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.specs.iter().any(|s| s.id() == id)
    }

    /// Weight of every registered check, the coverage denominator
    pub fn total_weight(&self) -> f64 {
        self.specs.iter().map(|s| s.weight).sum()
    }

    /// Checks to run: all of `enable` (or everything when it is empty) minus
    /// `disable`, in registration order
    pub fn select(&self, enable: &[String], disable: &[String]) -> Vec<CheckSpec> {
        for id in enable.iter().chain(disable) {
            if !self.contains(id) {
                warn!(
                    "Unknown check id '{}' (known: {})",
                    id,
                    self.ids().join(", ")
                );
            }
        }
        self.specs
            .iter()
            .filter(|s| enable.is_empty() || enable.iter().any(|id| id == s.id()))
            .filter(|s| !disable.iter().any(|id| id == s.id()))
            .cloned()
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(None)
    }
}
