//! Default Inference Rules
//!
//! Narrow each dimension the user did not constrain to the combinations that
//! mirror real-world usage. Rules run in a fixed order, one dimension each.
//! A rule marked `structural` always runs; the others are skipped for any
//! dimension present in the request's dimension filters.
//!
//! Variants that do not declare a rule's dimension pass through that rule.

use crate::request::SelectionRequest;
use buildbench_core::{Dimension, NOT_APPLICABLE, Value, Variant};
use std::fmt;
use tracing::debug;

/// Keep-predicate of a default rule
pub type KeepFn = Box<dyn Fn(&Variant) -> bool + Send + Sync>;

/// Narrowing rule for a single dimension
pub struct DefaultRule {
    /// Rule identifier, used in logs
    pub name: &'static str,
    /// Dimension the rule narrows
    pub dimension: Dimension,
    /// Structural rules run even when the user constrained the dimension
    pub structural: bool,
    keep: KeepFn,
}

impl DefaultRule {
    /// Rule skipped when the user constrains `dimension`
    pub fn soft(
        name: &'static str,
        dimension: Dimension,
        keep: impl Fn(&Variant) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            dimension,
            structural: false,
            keep: Box::new(keep),
        }
    }

    /// Rule that always runs
    pub fn structural(
        name: &'static str,
        dimension: Dimension,
        keep: impl Fn(&Variant) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            dimension,
            structural: true,
            keep: Box::new(keep),
        }
    }

    /// Whether the rule runs for `request`
    pub fn is_active(&self, request: &SelectionRequest) -> bool {
        self.structural || !request.constrains(self.dimension)
    }

    /// Whether `variant` survives this rule
    pub fn keeps(&self, variant: &Variant) -> bool {
        variant.value(self.dimension).is_none() || (self.keep)(variant)
    }
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultRule")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .field("structural", &self.structural)
            .finish_non_exhaustive()
    }
}

/// Canonical tool versions used when the user does not pick any
pub const DEFAULT_TOOL_VERSIONS: &[&str] = &["2.0.3", "2.1.*"];

/// The built-in rules in application order.
///
/// `tool_versions` is the canonical set for the tool-version rule; entries
/// ending in `*` match by prefix.
pub fn standard_rules(tool_versions: Vec<Value>) -> Vec<DefaultRule> {
    vec![
        DefaultRule::soft("restore", Dimension::Restore, |v| {
            if v.is_modern() {
                v.flag(Dimension::Restore) == Some(true)
            } else if v.is_legacy() {
                v.flag(Dimension::Restore) == Some(false)
            } else {
                true
            }
        }),
        // Same default for both tool categories; kept as one condition per category
        DefaultRule::soft("parallel", Dimension::Parallel, |v| {
            if v.is_modern() || v.is_legacy() {
                v.flag(Dimension::Parallel) == Some(true)
            } else {
                true
            }
        }),
        DefaultRule::soft("tool-version", Dimension::ToolVersion, move |v| {
            if !v.is_modern() {
                return true;
            }
            v.value(Dimension::ToolVersion)
                .is_some_and(|value| tool_versions.iter().any(|canon| value.matches(canon)))
        }),
        DefaultRule::soft("orchestrator", Dimension::Orchestrator, |v| {
            !v.is_modern() || v.text_is(Dimension::Orchestrator, "modern")
        }),
        DefaultRule::soft("node-reuse", Dimension::NodeReuse, |v| {
            if v.is_legacy() || v.text_is(Dimension::Orchestrator, "legacy") {
                v.flag(Dimension::NodeReuse) == Some(true)
            } else {
                true
            }
        }),
        DefaultRule::structural("source-change-scope-shape", Dimension::SourceChangeScope, |v| {
            if v.is_large_incremental() {
                v.text_is(Dimension::SourceChangeScope, "leaf-file-changed")
                    || v.text_is(Dimension::SourceChangeScope, "root-file-changed")
            } else {
                v.text_is(Dimension::SourceChangeScope, NOT_APPLICABLE)
            }
        }),
        DefaultRule::soft("source-change-scope", Dimension::SourceChangeScope, |v| {
            !v.text_is(Dimension::SourceChangeScope, "root-file-changed")
        }),
    ]
}

/// Apply `rules` in order, skipping soft rules for dimensions the request constrains
pub fn apply_defaults<'a>(
    rules: &[DefaultRule],
    variants: Vec<&'a Variant>,
    request: &SelectionRequest,
) -> Vec<&'a Variant> {
    rules.iter().fold(variants, |remaining, rule| {
        if !rule.is_active(request) {
            debug!(rule = rule.name, "skipped: dimension constrained by request");
            return remaining;
        }
        let before = remaining.len();
        let kept: Vec<_> = remaining.into_iter().filter(|v| rule.keeps(v)).collect();
        debug!(rule = rule.name, before, after = kept.len(), "default rule applied");
        kept
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildbench_core::{Category, OperationKind, SourceTree, Toolchain};
    use std::collections::BTreeMap;

    fn rules() -> Vec<DefaultRule> {
        standard_rules(DEFAULT_TOOL_VERSIONS.iter().map(|v| Value::text(*v)).collect())
    }

    fn make_variant(
        category: Category,
        kind: OperationKind,
        values: &[(Dimension, Value)],
    ) -> Variant {
        Variant {
            type_name: "Test".to_string(),
            operation: "Build".to_string(),
            kind,
            category,
            values: values.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }

    fn modern(values: &[(Dimension, Value)]) -> Variant {
        make_variant(
            Category::new(Toolchain::Modern, SourceTree::Standard),
            OperationKind::Build,
            values,
        )
    }

    fn legacy(values: &[(Dimension, Value)]) -> Variant {
        make_variant(
            Category::new(Toolchain::Legacy, SourceTree::Standard),
            OperationKind::Build,
            values,
        )
    }

    fn external(values: &[(Dimension, Value)]) -> Variant {
        make_variant(
            Category::new(Toolchain::External, SourceTree::Standard),
            OperationKind::Build,
            values,
        )
    }

    fn rule(name: &str) -> DefaultRule {
        rules()
            .into_iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_restore_default_depends_on_category() {
        let r = rule("restore");
        assert!(r.keeps(&modern(&[(Dimension::Restore, Value::Flag(true))])));
        assert!(!r.keeps(&modern(&[(Dimension::Restore, Value::Flag(false))])));
        assert!(r.keeps(&legacy(&[(Dimension::Restore, Value::Flag(false))])));
        assert!(!r.keeps(&legacy(&[(Dimension::Restore, Value::Flag(true))])));
        assert!(r.keeps(&external(&[(Dimension::Restore, Value::Flag(true))])));
        assert!(r.keeps(&external(&[(Dimension::Restore, Value::Flag(false))])));
    }

    #[test]
    fn test_parallel_default() {
        let r = rule("parallel");
        assert!(!r.keeps(&modern(&[(Dimension::Parallel, Value::Flag(false))])));
        assert!(!r.keeps(&legacy(&[(Dimension::Parallel, Value::Flag(false))])));
        assert!(r.keeps(&external(&[(Dimension::Parallel, Value::Flag(false))])));
    }

    #[test]
    fn test_tool_version_canonical_set() {
        let r = rule("tool-version");
        let with = |s: &str| modern(&[(Dimension::ToolVersion, Value::text(s))]);
        assert!(r.keeps(&with("2.0.3")));
        assert!(r.keeps(&with("2.1.4")));
        assert!(r.keeps(&with("2.1.300")));
        assert!(!r.keeps(&with("1.1.7")));
        assert!(!r.keeps(&with("2.0.0")));
    }

    #[test]
    fn test_orchestrator_default() {
        let r = rule("orchestrator");
        assert!(r.keeps(&modern(&[(Dimension::Orchestrator, Value::text("modern"))])));
        assert!(!r.keeps(&modern(&[(Dimension::Orchestrator, Value::text("legacy"))])));
        assert!(r.keeps(&external(&[(Dimension::Orchestrator, Value::text("legacy"))])));
    }

    #[test]
    fn test_node_reuse_default() {
        let r = rule("node-reuse");
        assert!(!r.keeps(&legacy(&[(Dimension::NodeReuse, Value::Flag(false))])));
        assert!(!r.keeps(&modern(&[
            (Dimension::Orchestrator, Value::text("legacy")),
            (Dimension::NodeReuse, Value::Flag(false)),
        ])));
        assert!(r.keeps(&modern(&[
            (Dimension::Orchestrator, Value::text("modern")),
            (Dimension::NodeReuse, Value::Flag(false)),
        ])));
    }

    #[test]
    fn test_change_scope_shape() {
        let r = rule("source-change-scope-shape");
        let large = |kind, scope: &str| {
            make_variant(
                Category::new(Toolchain::External, SourceTree::Large),
                kind,
                &[(Dimension::SourceChangeScope, Value::text(scope))],
            )
        };
        assert!(r.keeps(&large(OperationKind::IncrementalChange, "leaf-file-changed")));
        assert!(r.keeps(&large(OperationKind::IncrementalChange, "root-file-changed")));
        assert!(!r.keeps(&large(OperationKind::IncrementalChange, NOT_APPLICABLE)));
        assert!(r.keeps(&large(OperationKind::Build, NOT_APPLICABLE)));
        assert!(!r.keeps(&large(OperationKind::Build, "leaf-file-changed")));
    }

    #[test]
    fn test_missing_dimension_passes() {
        for r in rules() {
            assert!(r.keeps(&modern(&[])), "rule {} rejected an empty variant", r.name);
        }
    }

    #[test]
    fn test_constrained_dimension_skips_soft_rules_only() {
        let request = SelectionRequest::default().with_filter(
            Dimension::SourceChangeScope,
            [Value::text("root-file-changed")],
        );
        let rules = rules();
        let active: Vec<&str> = rules
            .iter()
            .filter(|r| r.is_active(&request))
            .map(|r| r.name)
            .collect();
        assert!(active.contains(&"source-change-scope-shape"));
        assert!(!active.contains(&"source-change-scope"));
        assert!(active.contains(&"restore"));
    }

    #[test]
    fn test_apply_preserves_order() {
        let variants = [
            external(&[(Dimension::Parallel, Value::Flag(false))]),
            modern(&[(Dimension::Parallel, Value::Flag(false))]),
            external(&[(Dimension::Parallel, Value::Flag(true))]),
            modern(&[(Dimension::Parallel, Value::Flag(true))]),
        ];
        let kept = apply_defaults(&rules(), variants.iter().collect(), &SelectionRequest::default());
        assert_eq!(kept, vec![&variants[0], &variants[2], &variants[3]]);
    }
}
