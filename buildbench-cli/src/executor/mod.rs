//! Execution Engine Seam
//!
//! The selected plan is handed to an [`ExecutionEngine`]. Engines that time
//! builds live outside this crate; the built-in [`PlanWriter`] renders the
//! plan for a human or as JSON for an external runner to consume.
//!
//! ```text
//! ExecutionPlan (variants + run config)
//!       │
//!       ▼
//! ┌───────────────┐
//! │ ExecutionEngine│  PlanWriter (human / json) or an external runner
//! └───────────────┘
//! ```

mod formatting;

pub use formatting::{
    OutputFormat, format_catalogue, format_dimensions, format_plan_human, format_plan_json,
};

use crate::planner::ExecutionPlan;
use std::io::Write;

/// Consumer of an execution plan
pub trait ExecutionEngine {
    /// Run (or hand off) every variant of `plan`, in order
    fn execute(&mut self, plan: &ExecutionPlan<'_>) -> anyhow::Result<()>;
}

/// Engine that writes the plan in a chosen format
pub struct PlanWriter<W: Write> {
    format: OutputFormat,
    out: W,
}

impl<W: Write> PlanWriter<W> {
    /// Write plans to `out` using `format`
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ExecutionEngine for PlanWriter<W> {
    fn execute(&mut self, plan: &ExecutionPlan<'_>) -> anyhow::Result<()> {
        let rendered = match self.format {
            OutputFormat::Human => format_plan_human(plan),
            OutputFormat::Json => format_plan_json(plan)?,
        };
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
