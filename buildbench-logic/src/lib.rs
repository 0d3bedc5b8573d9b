#![warn(missing_docs)]
//! BuildBench Logic - Selection Rules
//!
//! The filtering stages of the selection pipeline:
//! - Hard constraints that drop structurally invalid combinations
//! - Default inference that narrows unconstrained dimensions
//! - The request matcher for explicit user filters
//!
//! Every stage is a pure, order-preserving filter over borrowed variants.

mod constraints;
mod defaults;
mod matcher;
mod request;

pub use constraints::{HARD_RULES, HardRule, apply_hard_constraints, violations};
pub use defaults::{
    DEFAULT_TOOL_VERSIONS, DefaultRule, KeepFn, apply_defaults, standard_rules,
};
pub use matcher::{apply_request, matches_request};
pub use request::{RequestError, RunConfig, SelectionRequest};

/// A rule of the selection pipeline
#[derive(Debug)]
pub enum ConstraintRule {
    /// Excludes variants unconditionally
    Hard(HardRule),
    /// Narrows one dimension unless the user constrained it
    Default(DefaultRule),
}

/// The fixed, ordered rule set compiled at startup
#[derive(Debug)]
pub struct RuleSet {
    hard: Vec<HardRule>,
    defaults: Vec<DefaultRule>,
}

impl RuleSet {
    /// Built-in rules with `tool_versions` as the canonical tool-version set
    pub fn standard(tool_versions: Vec<buildbench_core::Value>) -> Self {
        Self {
            hard: HARD_RULES.to_vec(),
            defaults: standard_rules(tool_versions),
        }
    }

    /// Build from an explicit ordered list; hard rules always run first
    pub fn from_rules(rules: impl IntoIterator<Item = ConstraintRule>) -> Self {
        let mut hard = Vec::new();
        let mut defaults = Vec::new();
        for rule in rules {
            match rule {
                ConstraintRule::Hard(rule) => hard.push(rule),
                ConstraintRule::Default(rule) => defaults.push(rule),
            }
        }
        Self { hard, defaults }
    }

    /// Hard rules
    pub fn hard(&self) -> &[HardRule] {
        &self.hard
    }

    /// Default rules in application order
    pub fn defaults(&self) -> &[DefaultRule] {
        &self.defaults
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard(
            DEFAULT_TOOL_VERSIONS
                .iter()
                .map(|v| buildbench_core::Value::text(*v))
                .collect(),
        )
    }
}
