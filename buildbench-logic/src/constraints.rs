//! Hard Constraint Set
//!
//! Rules that remove structurally invalid dimension combinations. They apply
//! to every request, before any default inference, and commute: the result
//! does not depend on rule order.

use buildbench_core::{Dimension, Variant};

/// A predicate that excludes a variant regardless of user input
#[derive(Debug, Clone, Copy)]
pub struct HardRule {
    /// Rule identifier, used in logs and diagnostics
    pub name: &'static str,
    /// Returns `true` when the variant must be excluded
    pub excludes: fn(&Variant) -> bool,
}

/// The built-in hard rules
pub const HARD_RULES: &[HardRule] = &[
    HardRule {
        name: "modern-orchestrator-without-node-reuse",
        excludes: |v| {
            v.text_is(Dimension::Orchestrator, "modern") && v.flag(Dimension::NodeReuse) == Some(true)
        },
    },
    HardRule {
        name: "modern-orchestrator-without-legacy-version",
        excludes: |v| {
            v.text_is(Dimension::Orchestrator, "modern")
                && v.value(Dimension::LegacyVersion).is_some()
                && !v.is_not_applicable(Dimension::LegacyVersion)
        },
    },
    HardRule {
        name: "legacy-orchestrator-requires-legacy-version",
        excludes: |v| {
            (v.text_is(Dimension::Orchestrator, "legacy") || v.is_legacy())
                && v.is_not_applicable(Dimension::LegacyVersion)
        },
    },
];

/// Names of the rules `variant` violates; empty when it is valid
pub fn violations(rules: &[HardRule], variant: &Variant) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| (rule.excludes)(variant))
        .map(|rule| rule.name)
        .collect()
}

/// Keep only variants that violate none of `rules`, preserving order
pub fn apply_hard_constraints<'a>(
    rules: &[HardRule],
    variants: impl IntoIterator<Item = &'a Variant>,
) -> Vec<&'a Variant> {
    variants
        .into_iter()
        .filter(|v| !rules.iter().any(|rule| (rule.excludes)(v)))
        .collect()
}
