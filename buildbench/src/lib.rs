#![warn(missing_docs)]
//! # BuildBench
//!
//! Selects, from the cross-product of build-benchmark parameters, the
//! variants that should actually run, and hands them to an execution engine.
//!
//! - **Typed Dimensions**: every parameter axis has a declared domain; requests are validated up front
//! - **Declarative Catalogue**: variant families are a static table, expanded once at startup
//! - **Hard Constraints**: structurally invalid combinations never reach the plan
//! - **Default Inference**: unconstrained dimensions collapse to typical-usage values
//! - **Explicit Overrides**: any dimension the user names bypasses its default
//!
//! ## Quick Start
//!
//! ```ignore
//! use buildbench::prelude::*;
//!
//! let catalogue = Catalogue::builtin()?;
//! let request = SelectionRequest::parse("DotNet", "", "restore=true|false", RunConfig::default())?;
//! let plan = build_plan(&catalogue, &RuleSet::default(), &request, None);
//! for variant in &plan.variants {
//!     println!("{}", variant);
//! }
//! ```

// Re-export core types
pub use buildbench_core::{
    AxisDef, Catalogue, CatalogueBuilder, CatalogueError, Category, Dimension, DimensionError,
    Domain, FamilyDef, NOT_APPLICABLE, OperationDef, OperationKind, SourceTree, Toolchain, Value,
    Variant,
};

// Re-export selection logic
pub use buildbench_logic::{
    ConstraintRule, DEFAULT_TOOL_VERSIONS, DefaultRule, HARD_RULES, HardRule, RequestError,
    RuleSet, RunConfig, SelectionRequest, apply_defaults, apply_hard_constraints, apply_request,
    matches_request, standard_rules, violations,
};

// Re-export the pipeline and harness
pub use buildbench_cli::{
    BenchConfig, Cli, Commands, ExecutionEngine, ExecutionPlan, OutputFormat, PlanWriter,
    SelectionWarning, build_plan,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Catalogue, Dimension, ExecutionEngine, ExecutionPlan, RuleSet, RunConfig,
        SelectionRequest, Value, Variant, build_plan,
    };
}

/// Run the BuildBench CLI harness.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     buildbench::run()
/// }
/// ```
pub use buildbench_cli::{run, run_with_cli};
