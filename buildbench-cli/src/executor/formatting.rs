//! Plan and catalogue rendering

use crate::planner::ExecutionPlan;
use buildbench_core::{Catalogue, Dimension, Variant};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format for plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tree view for terminals
    #[default]
    Human,
    /// Machine-readable plan for an external runner
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Group variants by type name, keeping first-seen order
fn group_by_type<'a>(
    variants: impl IntoIterator<Item = &'a Variant>,
) -> Vec<(&'a str, Vec<&'a Variant>)> {
    let mut groups: Vec<(&str, Vec<&Variant>)> = Vec::new();
    for v in variants {
        match groups.iter_mut().find(|(name, _)| *name == v.type_name) {
            Some((_, members)) => members.push(v),
            None => groups.push((v.type_name.as_str(), vec![v])),
        }
    }
    groups
}

/// Human-readable plan
pub fn format_plan_human(plan: &ExecutionPlan<'_>) -> String {
    let mut output = String::new();

    if plan.is_empty() {
        for warning in &plan.warnings {
            let _ = writeln!(output, "Warning: {}", warning);
        }
        output.push_str("No variants selected.\n");
        return output;
    }

    output.push_str("BuildBench Plan:\n");
    for (type_name, members) in group_by_type(plan.variants.iter().copied()) {
        let _ = writeln!(output, "├── {} ({})", type_name, members[0].category);
        for v in members {
            let params: Vec<String> = v
                .values
                .iter()
                .map(|(d, val)| format!("{}={}", d, val))
                .collect();
            let _ = writeln!(output, "│   ├── {} [{}]", v.operation, params.join(", "));
        }
    }

    let _ = writeln!(
        output,
        "{} variants selected (iterations: {}, warmup: {}{}).",
        plan.len(),
        plan.run_config.iterations,
        plan.run_config.warmup,
        if plan.run_config.debug { ", debug" } else { "" }
    );
    output
}

/// JSON plan
pub fn format_plan_json(plan: &ExecutionPlan<'_>) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(plan)?;
    json.push('\n');
    Ok(json)
}

/// Catalogue overview: variant count per type and per-dimension value counts
pub fn format_catalogue(catalogue: &Catalogue) -> String {
    let mut output = String::from("BuildBench Catalogue:\n");

    for (type_name, members) in group_by_type(catalogue) {
        let mut operations: Vec<&str> = Vec::new();
        for v in &members {
            if !operations.contains(&v.operation.as_str()) {
                operations.push(&v.operation);
            }
        }
        let _ = writeln!(
            output,
            "├── {} ({}): {} variants, operations: {}",
            type_name,
            members[0].category,
            members.len(),
            operations.join(", ")
        );
    }
    let _ = writeln!(output, "{} variants declared.", catalogue.len());

    let mut counts: BTreeMap<Dimension, BTreeMap<String, usize>> = BTreeMap::new();
    for v in catalogue {
        for (d, val) in &v.values {
            *counts.entry(*d).or_default().entry(val.to_string()).or_default() += 1;
        }
    }
    if !counts.is_empty() {
        output.push_str("Dimensions:\n");
        for (d, values) in &counts {
            let values: Vec<String> = values
                .iter()
                .map(|(value, count)| format!("{} ({})", value, count))
                .collect();
            let _ = writeln!(output, "  {}: {}", d, values.join(", "));
        }
    }

    output
}

/// Registry listing: every dimension with its domain
pub fn format_dimensions() -> String {
    let mut output = String::from("Dimensions:\n");
    for d in Dimension::ALL {
        let _ = writeln!(output, "  {:<20} {}", d.name(), d.domain().describe());
    }
    output
}
