//! Selection Planner
//!
//! Builds the execution plan by running the selection pipeline:
//!
//! ```text
//! Catalogue ─▶ hard constraints ─▶ default inference ─▶ request matcher ─▶ id regex ─▶ plan
//! ```
//!
//! The plan is a pure function of (catalogue, rule set, request, regex) and
//! keeps catalogue enumeration order. An empty plan is valid; it carries a
//! [`SelectionWarning::EmptySelection`] instead of failing.

use buildbench_core::{Catalogue, Variant};
use buildbench_logic::{
    RuleSet, RunConfig, SelectionRequest, apply_defaults, apply_hard_constraints, apply_request,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Non-fatal findings about a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionWarning {
    /// No variant matched the request
    EmptySelection {
        /// Summary of the request that matched nothing
        request: String,
    },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::EmptySelection { request } => {
                write!(f, "no variants matched the request ({})", request)
            }
        }
    }
}

/// Execution plan handed to the execution engine
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan<'a> {
    /// Ordered list of variants to run
    pub variants: Vec<&'a Variant>,
    /// Pass-through run settings
    pub run_config: RunConfig,
    /// Non-fatal findings
    pub warnings: Vec<SelectionWarning>,
}

impl ExecutionPlan<'_> {
    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Number of selected variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }
}

/// Build the execution plan for `request` against `catalogue`.
///
/// `filter` is an optional regex over variant ids, applied after the request matcher.
pub fn build_plan<'a>(
    catalogue: &'a Catalogue,
    rules: &RuleSet,
    request: &SelectionRequest,
    filter: Option<&regex::Regex>,
) -> ExecutionPlan<'a> {
    let total = catalogue.len();

    let valid = apply_hard_constraints(rules.hard(), catalogue);
    debug!(stage = "hard-constraints", before = total, after = valid.len());

    let before = valid.len();
    let defaulted = apply_defaults(rules.defaults(), valid, request);
    debug!(stage = "default-inference", before, after = defaulted.len());

    let before = defaulted.len();
    let mut selected = apply_request(defaulted, request);
    debug!(stage = "request-matcher", before, after = selected.len());

    if let Some(re) = filter {
        let before = selected.len();
        selected.retain(|v| re.is_match(&v.id()));
        debug!(stage = "id-filter", pattern = re.as_str(), before, after = selected.len());
    }

    let mut warnings = Vec::new();
    if selected.is_empty() {
        let warning = SelectionWarning::EmptySelection {
            request: request.summary(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    } else {
        info!(selected = selected.len(), total, "selection complete");
    }

    ExecutionPlan {
        variants: selected,
        run_config: request.run_config,
        warnings,
    }
}
