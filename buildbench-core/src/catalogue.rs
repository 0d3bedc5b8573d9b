//! Variant Catalogue
//!
//! Expands declarative [`FamilyDef`] descriptors into the full, immutable list
//! of [`Variant`]s. Each family contributes the cross-product of its axes for
//! every operation it declares, in declaration order.
//!
//! Construction fails fast when a family is internally inconsistent:
//! - an axis value outside the dimension's domain
//! - the same dimension declared twice in one family
//! - a dimension required by the category missing from the family
//! - two variants with identical identity

use crate::dimension::{Dimension, DimensionError};
use crate::value::Value;
use crate::variant::{Category, OperationKind, Variant};
use fxhash::FxHashSet;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CatalogueError {
    /// Two declared variants share type, operation and values.
    #[error("duplicate variant {0}")]
    DuplicateVariant(String),

    /// A family declares the same dimension on two axes.
    #[error("{type_name} declares dimension '{dimension}' more than once")]
    DuplicateAxis {
        /// Offending family
        type_name: String,
        /// Repeated dimension
        dimension: Dimension,
    },

    /// A dimension required by the family's category is not declared.
    #[error("{type_name}.{operation} ({category}) is missing required dimension '{dimension}'")]
    MissingDimension {
        /// Offending family
        type_name: String,
        /// Operation the requirement applies to
        operation: String,
        /// Category demanding the dimension
        category: Category,
        /// Missing dimension
        dimension: Dimension,
    },

    /// An axis declares a value outside the dimension's domain.
    #[error("{type_name}: {source}")]
    InvalidAxisValue {
        /// Offending family
        type_name: String,
        /// Underlying domain violation
        source: DimensionError,
    },

    /// An axis declares no values at all.
    #[error("{type_name} declares no values for dimension '{dimension}'")]
    EmptyAxis {
        /// Offending family
        type_name: String,
        /// Dimension with no values
        dimension: Dimension,
    },
}

/// An operation a family exercises
#[derive(Debug, Clone, Copy)]
pub struct OperationDef {
    /// Operation name as matched by method filters
    pub name: &'static str,
    /// Scenario kind
    pub kind: OperationKind,
}

/// One declared parameter axis of a family
#[derive(Debug, Clone, Copy)]
pub struct AxisDef {
    /// Dimension the axis varies
    pub dimension: Dimension,
    /// Raw values, validated against the dimension's domain at build time
    pub values: &'static [&'static str],
}

/// Declarative descriptor of a benchmark family
#[derive(Debug, Clone, Copy)]
pub struct FamilyDef {
    /// Type-like name of the family
    pub type_name: &'static str,
    /// Category tag shared by every variant of the family
    pub category: Category,
    /// Operations exercised
    pub operations: &'static [OperationDef],
    /// Parameter axes; the cross-product yields one variant per combination
    pub axes: &'static [AxisDef],
}

/// Immutable, ordered collection of every known variant
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    variants: Vec<Variant>,
}

impl Catalogue {
    /// Start an empty builder
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    /// Build the catalogue from the built-in scenario table
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::builder()
            .families(crate::scenarios::FAMILIES.iter().copied())
            .build()
    }

    /// All variants in enumeration order
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Iterate variants in enumeration order
    pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
        self.variants.iter()
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the catalogue holds no variants
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

/// Collects family descriptors and expands them into a [`Catalogue`]
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    families: Vec<FamilyDef>,
}

impl CatalogueBuilder {
    /// Register one family
    pub fn family(mut self, family: FamilyDef) -> Self {
        self.families.push(family);
        self
    }

    /// Register several families
    pub fn families(mut self, families: impl IntoIterator<Item = FamilyDef>) -> Self {
        self.families.extend(families);
        self
    }

    /// Expand and validate every registered family
    pub fn build(self) -> Result<Catalogue, CatalogueError> {
        let mut variants = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for family in &self.families {
            let axes = parse_axes(family)?;

            for op in family.operations {
                for dimension in family.category.required_dimensions(op.kind) {
                    if !axes.iter().any(|(d, _)| *d == dimension) {
                        return Err(CatalogueError::MissingDimension {
                            type_name: family.type_name.to_string(),
                            operation: op.name.to_string(),
                            category: family.category,
                            dimension,
                        });
                    }
                }

                for values in cross_product(&axes) {
                    let variant = Variant {
                        type_name: family.type_name.to_string(),
                        operation: op.name.to_string(),
                        kind: op.kind,
                        category: family.category,
                        values,
                    };
                    let id = variant.id();
                    if !seen.insert(id.clone()) {
                        return Err(CatalogueError::DuplicateVariant(id));
                    }
                    variants.push(variant);
                }
            }
        }

        Ok(Catalogue { variants })
    }
}

fn parse_axes(family: &FamilyDef) -> Result<Vec<(Dimension, Vec<Value>)>, CatalogueError> {
    let mut axes: Vec<(Dimension, Vec<Value>)> = Vec::with_capacity(family.axes.len());

    for axis in family.axes {
        if axes.iter().any(|(d, _)| *d == axis.dimension) {
            return Err(CatalogueError::DuplicateAxis {
                type_name: family.type_name.to_string(),
                dimension: axis.dimension,
            });
        }
        if axis.values.is_empty() {
            return Err(CatalogueError::EmptyAxis {
                type_name: family.type_name.to_string(),
                dimension: axis.dimension,
            });
        }

        let values = axis
            .values
            .iter()
            .map(|raw| {
                let value = axis.dimension.parse_value(raw)?;
                // Declared values are concrete; patterns only make sense in requests
                if value.as_text().is_some_and(|t| t.ends_with('*')) {
                    return Err(DimensionError::InvalidValue {
                        dimension: axis.dimension,
                        value: raw.to_string(),
                        expected: "a concrete value".to_string(),
                    });
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogueError::InvalidAxisValue {
                type_name: family.type_name.to_string(),
                source,
            })?;

        axes.push((axis.dimension, values));
    }

    Ok(axes)
}

/// Cross-product of the axes; the last axis varies fastest.
fn cross_product(axes: &[(Dimension, Vec<Value>)]) -> Vec<BTreeMap<Dimension, Value>> {
    let mut combos = vec![BTreeMap::new()];
    for (dimension, values) in axes {
        combos = combos
            .into_iter()
            .flat_map(|combo| {
                values.iter().map(move |value| {
                    let mut next = combo.clone();
                    next.insert(*dimension, value.clone());
                    next
                })
            })
            .collect();
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{SourceTree, Toolchain};

    const BUILD: &[OperationDef] = &[OperationDef {
        name: "Build",
        kind: OperationKind::Build,
    }];

    fn external(axes: &'static [AxisDef]) -> FamilyDef {
        FamilyDef {
            type_name: "MavenMvc",
            category: Category::new(Toolchain::External, SourceTree::Standard),
            operations: BUILD,
            axes,
        }
    }

    #[test]
    fn test_cross_product_order() {
        let catalogue = Catalogue::builder()
            .family(external(&[
                AxisDef {
                    dimension: Dimension::Parallel,
                    values: &["true", "false"],
                },
                AxisDef {
                    dimension: Dimension::TargetFramework,
                    values: &["netcoreapp2.0", "net461"],
                },
            ]))
            .build()
            .unwrap();

        let ids: Vec<String> = catalogue.iter().map(Variant::id).collect();
        assert_eq!(
            ids,
            vec![
                "MavenMvc.Build(parallel=true, target-framework=netcoreapp2.0)",
                "MavenMvc.Build(parallel=true, target-framework=net461)",
                "MavenMvc.Build(parallel=false, target-framework=netcoreapp2.0)",
                "MavenMvc.Build(parallel=false, target-framework=net461)",
            ]
        );
    }

    #[test]
    fn test_family_without_axes_yields_one_variant_per_operation() {
        let catalogue = Catalogue::builder().family(external(&[])).build().unwrap();
        assert_eq!(catalogue.len(), 1);
        assert!(catalogue.variants()[0].values.is_empty());
    }

    #[test]
    fn test_duplicate_family_rejected() {
        let family = external(&[AxisDef {
            dimension: Dimension::Parallel,
            values: &["true"],
        }]);
        let err = Catalogue::builder()
            .family(family)
            .family(family)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogueError::DuplicateVariant("MavenMvc.Build(parallel=true)".to_string())
        );
    }

    #[test]
    fn test_duplicate_axis_value_rejected() {
        let err = Catalogue::builder()
            .family(external(&[AxisDef {
                dimension: Dimension::Parallel,
                values: &["true", "TRUE"],
            }]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateVariant(_)));
    }

    #[test]
    fn test_duplicate_axis_rejected() {
        let err = Catalogue::builder()
            .family(external(&[
                AxisDef {
                    dimension: Dimension::Parallel,
                    values: &["true"],
                },
                AxisDef {
                    dimension: Dimension::Parallel,
                    values: &["false"],
                },
            ]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateAxis { .. }));
    }

    #[test]
    fn test_missing_required_dimension() {
        let err = Catalogue::builder()
            .family(FamilyDef {
                type_name: "MSBuildMvc",
                category: Category::new(Toolchain::Legacy, SourceTree::Standard),
                operations: BUILD,
                axes: &[
                    AxisDef {
                        dimension: Dimension::Restore,
                        values: &["true"],
                    },
                    AxisDef {
                        dimension: Dimension::Parallel,
                        values: &["true"],
                    },
                    AxisDef {
                        dimension: Dimension::LegacyVersion,
                        values: &["15.6"],
                    },
                ],
            })
            .build()
            .unwrap_err();

        match err {
            CatalogueError::MissingDimension { dimension, .. } => {
                assert_eq!(dimension, Dimension::NodeReuse)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_outside_domain_rejected() {
        let err = Catalogue::builder()
            .family(external(&[AxisDef {
                dimension: Dimension::SourceChangeScope,
                values: &["everything-changed"],
            }]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogueError::InvalidAxisValue { .. }));
    }

    #[test]
    fn test_pattern_value_rejected_in_declarations() {
        let err = Catalogue::builder()
            .family(external(&[AxisDef {
                dimension: Dimension::ToolVersion,
                values: &["2.1.*"],
            }]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogueError::InvalidAxisValue { .. }));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let err = Catalogue::builder()
            .family(external(&[AxisDef {
                dimension: Dimension::Parallel,
                values: &[],
            }]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogueError::EmptyAxis { .. }));
    }
}
